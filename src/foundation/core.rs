use crate::foundation::error::{WritepadError, WritepadResult};

pub use kurbo::{Line, Point, Rect, Vec2};

/// Address of one grid cell. Both indices are 1-based, matching exported image metadata.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Key used by exporters to name per-cell images (`"{row}_{col}"`).
    pub fn key(self) -> String {
        format!("{}_{}", self.row, self.col)
    }
}

/// Pixel size of the drawing canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> WritepadResult<Self> {
        if width == 0 || height == 0 {
            return Err(WritepadError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
