use crate::{
    app::config::PadConfig,
    drawing::ink::InkSurface,
    drawing::manager::{DrawContext, DrawingManager},
    foundation::clock::Clock,
    foundation::core::{Canvas, Cell},
    foundation::error::{WritepadError, WritepadResult},
    geometry::grid::GridConfig,
    input::pointer::PointerEvent,
    record::recorder::StrokeRecorder,
    record::stroke::StrokeData,
    session::flags::SessionFlags,
    session::rounds::{DrawingData, DrawingMetadata, RoundData, RoundsMap},
    session::validate::{ValidationResult, validate_session},
};

/// A handwriting pad: grid, live ink, stroke recording and the rounds captured so far.
///
/// Owns every piece of per-session state and lends it out to the drawing manager one pointer
/// event at a time.
#[derive(Debug)]
pub struct Pad<C: Clock, S: InkSurface> {
    grid: GridConfig,
    margin: f64,
    flags: SessionFlags,
    recorder: StrokeRecorder<C>,
    manager: DrawingManager,
    surface: S,
    rounds: RoundsMap,
    open_round: Option<String>,
}

impl<C: Clock, S: InkSurface> Pad<C, S> {
    pub fn new(config: &PadConfig, clock: C, surface: S) -> Self {
        Self {
            grid: config.grid,
            margin: config.margin,
            flags: SessionFlags::default(),
            recorder: StrokeRecorder::new(clock),
            manager: DrawingManager::new(config.ink.clone()),
            surface,
            rounds: RoundsMap::new(),
            open_round: None,
        }
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn recorder(&self) -> &StrokeRecorder<C> {
        &self.recorder
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn rounds(&self) -> &RoundsMap {
        &self.rounds
    }

    pub fn into_rounds(self) -> RoundsMap {
        self.rounds
    }

    pub fn open_round(&self) -> Option<&str> {
        self.open_round.as_deref()
    }

    pub fn start_session(&mut self) {
        self.flags.session_active = true;
        tracing::info!(target: "writepad::record", "session started");
    }

    pub fn end_session(&mut self) {
        self.flags.session_active = false;
        tracing::info!(
            target: "writepad::record",
            rounds = self.rounds.len(),
            "session ended"
        );
    }

    /// Clear the ink and start recording a round keyed by `timestamp`.
    ///
    /// A round that is still open is discarded.
    pub fn begin_round(&mut self, timestamp: impl Into<String>) {
        let timestamp = timestamp.into();
        if let Some(prev) = self.open_round.replace(timestamp.clone()) {
            tracing::warn!(
                target: "writepad::record",
                round = %prev,
                "round replaced before it was finished"
            );
        }
        self.surface.clear();
        self.recorder.start_recording();
        tracing::debug!(target: "writepad::record", round = %timestamp, "round started");
    }

    /// Stop recording and store the round with its cell images and stroke data. The stroke data
    /// `endTime` is the stop time. A round stored under the same timestamp is replaced.
    pub fn finish_round(&mut self, images: Vec<DrawingData>) -> WritepadResult<()> {
        let Some(timestamp) = self.open_round.take() else {
            return Err(WritepadError::validation("no round in progress"));
        };
        let snapshot = self.recorder.stop_recording();
        let stroke_data = serde_json::to_value(StrokeData::from(snapshot))?;
        self.rounds.insert(
            timestamp.clone(),
            RoundData {
                timestamp,
                images,
                stroke_data: Some(stroke_data),
            },
        );
        Ok(())
    }

    /// Image record for `cell` carrying the current cell dimensions.
    pub fn drawing_for_cell(&self, cell: Cell, image_data: impl Into<String>) -> DrawingData {
        DrawingData {
            image_data: image_data.into(),
            metadata: Some(DrawingMetadata::for_cell(
                cell,
                self.grid.cell_width,
                self.grid.cell_height,
            )),
        }
    }

    /// Refit the grid to a new canvas size. A gesture in progress keeps its cell and follows the
    /// cell's new origin.
    pub fn resize(&mut self, canvas: Canvas) {
        self.grid.fit_to_canvas(canvas, self.margin);
        tracing::debug!(
            target: "writepad::record",
            width = canvas.width,
            height = canvas.height,
            cell = self.grid.cell_width,
            "grid refit"
        );
    }

    pub fn validate(&self) -> ValidationResult {
        validate_session(&self.rounds, &self.grid)
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) {
        let (manager, cx) = self.split();
        manager.pointer_down(event, cx);
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        let (manager, cx) = self.split();
        manager.pointer_move(event, cx);
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) {
        let (manager, cx) = self.split();
        manager.pointer_up(event, cx);
    }

    pub fn pointer_out(&mut self) {
        let (manager, cx) = self.split();
        manager.pointer_out(cx);
    }

    fn split(&mut self) -> (&mut DrawingManager, DrawContext<'_, GridConfig, C, S>) {
        let Self {
            grid,
            flags,
            recorder,
            manager,
            surface,
            ..
        } = self;
        let cx = DrawContext {
            geometry: &*grid,
            recorder,
            surface,
            session: *flags,
        };
        (manager, cx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/pad.rs"]
mod tests;
