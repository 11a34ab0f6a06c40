use crate::{
    foundation::core::{Canvas, Cell, Point, Rect},
    foundation::error::{WritepadError, WritepadResult},
    geometry::provider::GeometryProvider,
};

/// Grid of `ROW_COUNT x GROUP_COUNT` equally sized cells laid over the drawing canvas.
///
/// JSON keys are the screaming-case names used by session exports (`ROW_COUNT`, `CELL_WIDTH`, ...).
/// Only the two counts are required; pixel fields default to zero so a config that exists purely
/// for session validation can omit them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GridConfig {
    /// Number of rows.
    pub row_count: u32,
    /// Number of columns ("groups" of letters per row).
    pub group_count: u32,
    #[serde(default)]
    pub cell_width: f64,
    #[serde(default)]
    pub cell_height: f64,
    #[serde(default)]
    pub spacing_x: f64,
    #[serde(default)]
    pub spacing_y: f64,
    #[serde(default)]
    pub start_x: f64,
    #[serde(default)]
    pub start_y: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_count: 4,
            group_count: 6,
            cell_width: 100.0,
            cell_height: 100.0,
            spacing_x: 20.0,
            spacing_y: 20.0,
            start_x: 40.0,
            start_y: 40.0,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> WritepadResult<()> {
        if self.row_count == 0 || self.group_count == 0 {
            return Err(WritepadError::validation(
                "grid ROW_COUNT and GROUP_COUNT must be > 0",
            ));
        }
        let lengths = [
            ("CELL_WIDTH", self.cell_width),
            ("CELL_HEIGHT", self.cell_height),
            ("SPACING_X", self.spacing_x),
            ("SPACING_Y", self.spacing_y),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v < 0.0 {
                return Err(WritepadError::validation(format!(
                    "grid {name} must be finite and >= 0"
                )));
            }
        }
        if !self.start_x.is_finite() || !self.start_y.is_finite() {
            return Err(WritepadError::validation("grid START_X/START_Y must be finite"));
        }
        Ok(())
    }

    /// Upper bound on distinct cells a round can cover.
    pub fn max_possible_cells(&self) -> u64 {
        u64::from(self.row_count).saturating_mul(u64::from(self.group_count))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (1..=self.row_count).contains(&cell.row) && (1..=self.group_count).contains(&cell.col)
    }

    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::from_origin_size(
            self.cell_origin(cell),
            (self.cell_width, self.cell_height),
        )
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (1..=self.row_count)
            .flat_map(move |row| (1..=self.group_count).map(move |col| Cell::new(row, col)))
    }

    /// Bounding box of the whole grid.
    pub fn bounds(&self) -> Rect {
        let w = span(self.group_count, self.cell_width, self.spacing_x);
        let h = span(self.row_count, self.cell_height, self.spacing_y);
        Rect::new(self.start_x, self.start_y, self.start_x + w, self.start_y + h)
    }

    /// Recompute cell size and start offset so the grid fits `canvas` inset by `margin`.
    ///
    /// Row/column counts and spacing are kept; cells stay square and the grid is centered in
    /// the available area.
    pub fn fit_to_canvas(&mut self, canvas: Canvas, margin: f64) {
        let margin = margin.max(0.0);
        let avail_w = (f64::from(canvas.width) - 2.0 * margin).max(0.0);
        let avail_h = (f64::from(canvas.height) - 2.0 * margin).max(0.0);

        let cols = f64::from(self.group_count.max(1));
        let rows = f64::from(self.row_count.max(1));
        let fit_w = (avail_w - self.spacing_x * (cols - 1.0)) / cols;
        let fit_h = (avail_h - self.spacing_y * (rows - 1.0)) / rows;
        let side = fit_w.min(fit_h).max(0.0);

        self.cell_width = side;
        self.cell_height = side;

        let total_w = span(self.group_count, side, self.spacing_x);
        let total_h = span(self.row_count, side, self.spacing_y);
        self.start_x = margin + (avail_w - total_w).max(0.0) * 0.5;
        self.start_y = margin + (avail_h - total_h).max(0.0) * 0.5;
    }
}

impl GeometryProvider for GridConfig {
    fn cell_at(&self, p: Point) -> Option<Cell> {
        let col = axis_index(
            p.x - self.start_x,
            self.cell_width,
            self.spacing_x,
            self.group_count,
        )?;
        let row = axis_index(p.y - self.start_y, self.cell_height, self.spacing_y, self.row_count)?;
        Some(Cell::new(row, col))
    }

    fn cell_origin(&self, cell: Cell) -> Point {
        let col = f64::from(cell.col.saturating_sub(1));
        let row = f64::from(cell.row.saturating_sub(1));
        Point::new(
            self.start_x + col * (self.cell_width + self.spacing_x),
            self.start_y + row * (self.cell_height + self.spacing_y),
        )
    }
}

// 1-based index along one axis, or None when `offset` lands before the grid, in a gap, or past
// the last cell.
fn axis_index(offset: f64, size: f64, spacing: f64, count: u32) -> Option<u32> {
    if !(offset >= 0.0) || size <= 0.0 {
        return None;
    }
    let pitch = size + spacing;
    let idx = (offset / pitch).floor();
    if offset - idx * pitch >= size || idx >= f64::from(count) {
        return None;
    }
    Some(idx as u32 + 1)
}

fn span(count: u32, size: f64, spacing: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let n = f64::from(count);
    n * size + (n - 1.0) * spacing
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/grid.rs"]
mod tests;
