use super::*;

#[test]
fn cell_key_matches_export_naming() {
    assert_eq!(Cell::new(2, 5).key(), "2_5");
}

#[test]
fn cells_order_row_major() {
    let mut cells = vec![Cell::new(2, 1), Cell::new(1, 3), Cell::new(1, 1)];
    cells.sort();
    assert_eq!(cells, vec![Cell::new(1, 1), Cell::new(1, 3), Cell::new(2, 1)]);
}

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(640, 480).unwrap();
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 640.0, 480.0));
}

#[test]
fn cell_json_shape_is_row_col() {
    let v = serde_json::to_value(Cell::new(1, 4)).unwrap();
    assert_eq!(v, serde_json::json!({ "row": 1, "col": 4 }));
}
