use crate::foundation::core::{Cell, Point};

/// Maps canvas pixels to grid cells and back.
///
/// The stroke recorder receives a provider at call time rather than owning one, so geometry
/// recomputed after a canvas resize is picked up by the next pointer event of an in-flight gesture.
pub trait GeometryProvider {
    /// Cell containing `p`, or `None` for points in spacing gaps or outside the grid.
    fn cell_at(&self, p: Point) -> Option<Cell>;

    /// Top-left pixel of `cell`.
    fn cell_origin(&self, cell: Cell) -> Point;
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn cell_at(&self, p: Point) -> Option<Cell> {
        (**self).cell_at(p)
    }

    fn cell_origin(&self, cell: Cell) -> Point {
        (**self).cell_origin(cell)
    }
}
