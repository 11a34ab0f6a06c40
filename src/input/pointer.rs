use crate::foundation::{
    core::{Point, Rect},
    math::unit_clamp,
};

/// Pressure used when the device reports none.
pub const DEFAULT_PRESSURE: f64 = 1.0;

/// Normalized pointer input in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Mouse or pen pointer. `pressure` is whatever the platform reported, if anything.
    Mouse {
        position: Point,
        pressure: Option<f64>,
    },
    /// First active touch. `force` is the touch's normalized force, if reported.
    Touch { position: Point, force: Option<f64> },
}

impl PointerEvent {
    pub fn mouse(position: Point) -> Self {
        Self::Mouse {
            position,
            pressure: None,
        }
    }

    pub fn touch(position: Point) -> Self {
        Self::Touch {
            position,
            force: None,
        }
    }

    pub fn position(&self) -> Point {
        match *self {
            Self::Mouse { position, .. } | Self::Touch { position, .. } => position,
        }
    }

    /// Pressure in `[0, 1]`: the reported pressure, else the touch force, else
    /// [`DEFAULT_PRESSURE`].
    pub fn pressure(&self) -> f64 {
        let raw = match *self {
            Self::Mouse { pressure, .. } => pressure,
            Self::Touch { force, .. } => force,
        };
        raw.map_or(DEFAULT_PRESSURE, |p| unit_clamp(p, DEFAULT_PRESSURE))
    }
}

/// One entry of a platform touch list, in client (viewport) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub client: Point,
    pub force: Option<f64>,
}

/// Turns client-space mouse and touch input into [`PointerEvent`]s relative to the drawing
/// canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerAdapter {
    canvas_bounds: Rect,
}

impl PointerAdapter {
    /// `canvas_bounds` is the canvas' bounding rect in client coordinates.
    pub fn new(canvas_bounds: Rect) -> Self {
        Self { canvas_bounds }
    }

    pub fn set_canvas_bounds(&mut self, canvas_bounds: Rect) {
        self.canvas_bounds = canvas_bounds;
    }

    pub fn canvas_bounds(&self) -> Rect {
        self.canvas_bounds
    }

    pub fn mouse(&self, client: Point, pressure: Option<f64>) -> PointerEvent {
        PointerEvent::Mouse {
            position: self.to_canvas(client),
            pressure,
        }
    }

    /// Uses the first active touch, falling back to the first changed touch (touch-end events
    /// have an empty active list). `None` when both lists are empty.
    pub fn touch(&self, touches: &[TouchPoint], changed: &[TouchPoint]) -> Option<PointerEvent> {
        let t = touches.first().or_else(|| changed.first())?;
        Some(PointerEvent::Touch {
            position: self.to_canvas(t.client),
            force: t.force,
        })
    }

    pub fn get_pos(&self, event: &PointerEvent) -> Point {
        event.position()
    }

    fn to_canvas(&self, client: Point) -> Point {
        Point::new(client.x - self.canvas_bounds.x0, client.y - self.canvas_bounds.y0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/pointer.rs"]
mod tests;
