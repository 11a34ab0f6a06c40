use crate::{
    drawing::ink::{InkStyle, InkSurface},
    foundation::clock::Clock,
    foundation::core::{Line, Point},
    geometry::provider::GeometryProvider,
    input::pointer::PointerEvent,
    record::recorder::StrokeRecorder,
    session::flags::SessionFlags,
};

/// Collaborators a pointer event touches, borrowed for the duration of one call.
pub struct DrawContext<'a, G: ?Sized, C, S: ?Sized> {
    pub geometry: &'a G,
    pub recorder: &'a mut StrokeRecorder<C>,
    pub surface: &'a mut S,
    pub session: SessionFlags,
}

/// Pen-down tracking between raw pointer events and the stroke recorder.
///
/// Ink is always painted while the pen is down. Events reach the recorder only while the session
/// is active.
#[derive(Clone, Debug, Default)]
pub struct DrawingManager {
    drawing: bool,
    last: Point,
    last_event: Option<PointerEvent>,
    style: InkStyle,
}

impl DrawingManager {
    pub fn new(style: InkStyle) -> Self {
        Self {
            drawing: false,
            last: Point::ORIGIN,
            last_event: None,
            style,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn last_position(&self) -> Point {
        self.last
    }

    pub fn style(&self) -> &InkStyle {
        &self.style
    }

    pub fn pointer_down<G, C, S>(&mut self, event: &PointerEvent, cx: DrawContext<'_, G, C, S>)
    where
        G: GeometryProvider + ?Sized,
        C: Clock,
        S: InkSurface + ?Sized,
    {
        self.drawing = true;
        let pos = event.position();
        self.last = pos;
        self.last_event = Some(*event);

        if !cx.session.session_active {
            return;
        }
        match cx.geometry.cell_at(pos) {
            Some(cell) => {
                let origin = cx.geometry.cell_origin(cell);
                let rel = Point::new(pos.x - origin.x, pos.y - origin.y);
                cx.recorder.start_stroke(event, Some(cell), Some(rel));
            }
            None => cx.recorder.start_stroke(event, None, None),
        }
    }

    pub fn pointer_move<G, C, S>(&mut self, event: &PointerEvent, cx: DrawContext<'_, G, C, S>)
    where
        G: GeometryProvider + ?Sized,
        C: Clock,
        S: InkSurface + ?Sized,
    {
        if !self.drawing {
            return;
        }
        let pos = event.position();
        cx.surface.draw_segment(Line::new(self.last, pos), &self.style);
        self.last = pos;
        self.last_event = Some(*event);

        if cx.session.session_active {
            cx.recorder.add_point(cx.geometry, event, pos);
        }
    }

    pub fn pointer_up<G, C, S>(&mut self, event: &PointerEvent, cx: DrawContext<'_, G, C, S>)
    where
        G: GeometryProvider + ?Sized,
        C: Clock,
        S: InkSurface + ?Sized,
    {
        self.finish(event, event.position(), cx);
    }

    /// Pointer left the canvas. Leave events carry no usable position, so the gesture is closed
    /// with a repeat of the last event seen, keeping its device kind and pressure.
    pub fn pointer_out<G, C, S>(&mut self, cx: DrawContext<'_, G, C, S>)
    where
        G: GeometryProvider + ?Sized,
        C: Clock,
        S: InkSurface + ?Sized,
    {
        let event = self
            .last_event
            .unwrap_or_else(|| PointerEvent::mouse(self.last));
        self.finish(&event, self.last, cx);
    }

    fn finish<G, C, S>(&mut self, event: &PointerEvent, pos: Point, cx: DrawContext<'_, G, C, S>)
    where
        G: GeometryProvider + ?Sized,
        C: Clock,
        S: InkSurface + ?Sized,
    {
        if self.drawing && cx.session.session_active {
            cx.recorder.end_stroke(cx.geometry, event, pos);
        }
        self.drawing = false;
        self.last_event = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawing/manager.rs"]
mod tests;
