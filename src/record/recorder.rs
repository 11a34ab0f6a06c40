use crate::{
    foundation::clock::{Clock, SystemClock},
    foundation::core::{Cell, Point},
    geometry::provider::GeometryProvider,
    input::pointer::PointerEvent,
    record::stroke::{
        PointKind, RecordingSnapshot, Stroke, StrokeData, StrokeMetadata, StrokePoint,
    },
};

const TARGET: &str = "writepad::record";

/// Pointer-to-stroke state machine.
///
/// While recording, each `start_stroke -> add_point* -> end_stroke` gesture becomes exactly one
/// [`Stroke`]. Calls that arrive out of sequence (not recording, or no gesture in progress) are
/// dropped without error: real pointer hardware loses events, and capture must keep going.
///
/// Every accessor hands out independent copies of the stroke buffer.
#[derive(Debug)]
pub struct StrokeRecorder<C = SystemClock> {
    clock: C,
    is_recording: bool,
    start_time: Option<u64>,
    current_stroke: Vec<StrokePoint>,
    current_stroke_cell: Option<Cell>,
    strokes: Vec<Stroke>,
}

impl Default for StrokeRecorder<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> StrokeRecorder<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            is_recording: false,
            start_time: None,
            current_stroke: Vec::new(),
            current_stroke_cell: None,
            strokes: Vec::new(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// `true` between `start_stroke` and the matching `end_stroke`.
    pub fn has_active_stroke(&self) -> bool {
        !self.current_stroke.is_empty()
    }

    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    /// Completed strokes of the current recording.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Enable recording and reset the time origin to now.
    ///
    /// Completed strokes and any half-finished gesture from a previous recording are discarded.
    /// Calling this while already recording restarts the recording.
    pub fn start_recording(&mut self) {
        let now = self.clock.now_ms();
        self.is_recording = true;
        self.start_time = Some(now);
        self.strokes.clear();
        self.reset_gesture();
        tracing::debug!(target: TARGET, start_time = now, "recording started");
    }

    /// Disable recording. Completed strokes stay in place; the snapshot owns its own copy.
    pub fn stop_recording(&mut self) -> RecordingSnapshot {
        self.is_recording = false;
        let snapshot = RecordingSnapshot {
            start_time: self.start_time,
            end_time: self.clock.now_ms(),
            strokes: self.strokes.clone(),
        };
        tracing::debug!(
            target: TARGET,
            strokes = snapshot.strokes.len(),
            dangling_points = self.current_stroke.len(),
            "recording stopped"
        );
        snapshot
    }

    /// Begin a gesture.
    ///
    /// The first point is cell-relative when both `cell` and `cell_relative` are given, and the
    /// event's canvas position otherwise. `cell` binds the gesture for its whole lifetime.
    /// A gesture already in progress is abandoned.
    pub fn start_stroke(
        &mut self,
        event: &PointerEvent,
        cell: Option<Cell>,
        cell_relative: Option<Point>,
    ) {
        if !self.is_recording {
            return;
        }
        if self.has_active_stroke() {
            tracing::debug!(
                target: TARGET,
                points = self.current_stroke.len(),
                "abandoning unfinished gesture"
            );
        }
        self.reset_gesture();
        self.current_stroke_cell = cell;

        let pos = match (cell, cell_relative) {
            (Some(_), Some(rel)) => rel,
            _ => event.position(),
        };
        self.push_point(pos, event, PointKind::Start);
    }

    /// Append a `move` point. `global` is the canvas position of the event.
    pub fn add_point<G: GeometryProvider + ?Sized>(
        &mut self,
        geometry: &G,
        event: &PointerEvent,
        global: Point,
    ) {
        if !self.accepts_gesture_input("add_point") {
            return;
        }
        let pos = self.resolve_position(geometry, global);
        self.push_point(pos, event, PointKind::Move);
    }

    /// Append the `end` point and commit the gesture as a [`Stroke`].
    pub fn end_stroke<G: GeometryProvider + ?Sized>(
        &mut self,
        geometry: &G,
        event: &PointerEvent,
        global: Point,
    ) {
        if !self.accepts_gesture_input("end_stroke") {
            return;
        }
        let pos = self.resolve_position(geometry, global);
        self.push_point(pos, event, PointKind::End);

        let stroke = Stroke {
            cell: self.current_stroke_cell.take(),
            points: std::mem::take(&mut self.current_stroke),
        };
        tracing::trace!(
            target: TARGET,
            cell = ?stroke.cell,
            points = stroke.points.len(),
            "stroke committed"
        );
        self.strokes.push(stroke);
    }

    /// Current state as an export document. Works whether or not recording is active.
    pub fn get_stroke_data(&self) -> StrokeData {
        StrokeData {
            start_time: self.start_time,
            end_time: self.clock.now_ms(),
            strokes: self.strokes.clone(),
            metadata: StrokeMetadata::summarize(&self.strokes),
        }
    }

    fn accepts_gesture_input(&self, op: &'static str) -> bool {
        if !self.is_recording {
            return false;
        }
        if self.current_stroke.is_empty() {
            tracing::debug!(target: TARGET, op, "no gesture in progress; input dropped");
            return false;
        }
        true
    }

    // Cell origin is looked up per call so a gesture follows grid geometry recomputed mid-stroke.
    fn resolve_position<G: GeometryProvider + ?Sized>(&self, geometry: &G, global: Point) -> Point {
        match self.current_stroke_cell {
            Some(cell) => {
                let origin = geometry.cell_origin(cell);
                Point::new(global.x - origin.x, global.y - origin.y)
            }
            None => global,
        }
    }

    fn push_point(&mut self, pos: Point, event: &PointerEvent, kind: PointKind) {
        let now = self.clock.now_ms();
        let timestamp = now.saturating_sub(self.start_time.unwrap_or(now));
        self.current_stroke.push(StrokePoint {
            x: pos.x,
            y: pos.y,
            timestamp,
            pressure: event.pressure(),
            kind,
        });
    }

    fn reset_gesture(&mut self) {
        self.current_stroke.clear();
        self.current_stroke_cell = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/recorder.rs"]
mod tests;
