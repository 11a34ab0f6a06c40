use super::*;
use crate::foundation::core::Cell;
use crate::session::rounds::{DrawingData, DrawingMetadata};

fn grid(rows: u32, groups: u32) -> GridConfig {
    GridConfig {
        row_count: rows,
        group_count: groups,
        ..GridConfig::default()
    }
}

fn image(row: u32, col: u32) -> DrawingData {
    DrawingData {
        image_data: "data:image/png;base64,AAAA".to_string(),
        metadata: Some(DrawingMetadata::for_cell(Cell::new(row, col), 100.0, 100.0)),
    }
}

fn bare_image(row: u32, col: u32) -> DrawingData {
    DrawingData {
        image_data: String::new(),
        metadata: Some(DrawingMetadata {
            row: Some(row),
            col: Some(col),
            ..DrawingMetadata::default()
        }),
    }
}

fn rounds(entries: Vec<(&str, Vec<DrawingData>)>) -> RoundsMap {
    entries
        .into_iter()
        .map(|(ts, images)| {
            (
                ts.to_string(),
                RoundData {
                    timestamp: ts.to_string(),
                    images,
                    stroke_data: None,
                },
            )
        })
        .collect()
}

#[test]
fn empty_session_is_valid() {
    let r = validate_session(&RoundsMap::new(), &grid(4, 6));
    assert_eq!(
        r,
        ValidationResult {
            status: ValidationStatus::Valid,
            issues: vec![],
            stats: ValidationStats {
                total_rounds: 0,
                total_images: 0,
                images_per_round: vec![],
                cell_coverage: vec![],
            },
        }
    );
}

#[test]
fn complete_round_is_valid() {
    let m = rounds(vec![("r1", vec![image(1, 1), image(1, 2), image(2, 1)])]);
    let r = validate_session(&m, &grid(2, 2));
    assert_eq!(r.status, ValidationStatus::Valid);
    assert!(r.issues.is_empty());
    assert_eq!(r.stats.images_per_round, vec![3]);
    assert_eq!(r.stats.cell_coverage, vec![3]);
    assert_eq!(r.stats.total_images, 3);
    assert!(r.is_exportable());
}

#[test]
fn round_without_images_warns() {
    let m = rounds(vec![("r1", vec![])]);
    let r = validate_session(&m, &grid(4, 6));
    assert_eq!(r.status, ValidationStatus::Warning);
    assert_eq!(r.issues.len(), 1);
    assert!(r.issues[0].contains("no images"));
    assert_eq!(r.stats.images_per_round, vec![0]);
    assert_eq!(r.stats.cell_coverage, vec![0]);
}

#[test]
fn more_unique_cells_than_grid_is_error() {
    let m = rounds(vec![(
        "r1",
        vec![image(1, 1), image(1, 2), image(2, 1), image(2, 2), image(3, 1)],
    )]);
    let r = validate_session(&m, &grid(2, 2));
    assert_eq!(r.status, ValidationStatus::Error);
    assert!(r.issues[0].contains("more unique drawing cells (5)"));
    assert!(r.issues[0].contains("(4)"));
    assert!(!r.is_exportable());
}

#[test]
fn shared_cell_without_dimensions_warns_once() {
    let m = rounds(vec![(
        "r1",
        vec![bare_image(1, 1), bare_image(1, 1), bare_image(1, 1)],
    )]);
    let r = validate_session(&m, &grid(2, 2));
    assert_eq!(r.status, ValidationStatus::Warning);
    assert_eq!(
        r.issues,
        vec!["Round r1 has images missing cell dimension metadata".to_string()]
    );
    assert_eq!(r.stats.cell_coverage, vec![1]);
    assert_eq!(r.stats.images_per_round, vec![3]);
}

#[test]
fn more_images_than_cells_in_few_cells_warns() {
    let images = vec![image(1, 1); 5];
    let m = rounds(vec![("r1", images)]);
    let r = validate_session(&m, &grid(2, 2));
    assert_eq!(r.status, ValidationStatus::Warning);
    assert!(r.issues[0].contains("more images (5) than available cells (4)"));
}

#[test]
fn images_missing_row_col_get_one_issue_each() {
    let mut no_col = image(1, 1);
    no_col.metadata.as_mut().unwrap().col = None;
    let no_meta = DrawingData {
        image_data: String::new(),
        metadata: None,
    };
    let m = rounds(vec![("r1", vec![no_col, no_meta, image(1, 2)])]);
    let r = validate_session(&m, &grid(2, 2));

    assert_eq!(r.status, ValidationStatus::Warning);
    let missing = r
        .issues
        .iter()
        .filter(|i| i.contains("missing row/col"))
        .count();
    assert_eq!(missing, 2);
    // the image with no metadata also lacks dimensions
    assert!(r.issues.last().unwrap().contains("cell dimension"));
    assert_eq!(r.stats.cell_coverage, vec![1]);
    assert_eq!(r.stats.images_per_round, vec![3]);
}

#[test]
fn error_is_not_downgraded_by_later_warnings() {
    let m = rounds(vec![
        (
            "r1",
            vec![image(1, 1), image(1, 2), image(2, 1), image(2, 2), image(9, 9)],
        ),
        ("r2", vec![]),
        ("r3", vec![bare_image(1, 1)]),
    ]);
    let r = validate_session(&m, &grid(2, 2));
    assert_eq!(r.status, ValidationStatus::Error);
    assert_eq!(r.issues.len(), 3);
    assert!(r.issues[0].starts_with("Round r1"));
    assert!(r.issues[1].starts_with("Round r2"));
    assert!(r.issues[2].starts_with("Round r3"));
    assert_eq!(r.stats.images_per_round, vec![5, 0, 1]);
    assert_eq!(r.stats.total_images, 6);
}

#[test]
fn rounds_without_any_image_do_not_add_final_warning_when_already_warned() {
    let m = rounds(vec![("r1", vec![]), ("r2", vec![])]);
    let r = validate_session(&m, &grid(2, 2));
    assert_eq!(r.status, ValidationStatus::Warning);
    assert_eq!(r.issues.len(), 2);
    assert!(!r.issues.iter().any(|i| i.contains("no valid images")));
}

#[test]
fn validation_is_repeatable_and_leaves_input_untouched() {
    let m = rounds(vec![("r1", vec![image(1, 1), bare_image(1, 1)]), ("r2", vec![])]);
    let before = m.clone();
    let g = grid(2, 2);
    let a = validate_session(&m, &g);
    let b = validate_session(&m, &g);
    assert_eq!(a, b);
    assert_eq!(m, before);
}

#[test]
fn status_escalation_never_lowers() {
    let mut s = ValidationStatus::Valid;
    s.escalate(ValidationStatus::Error);
    s.escalate(ValidationStatus::Warning);
    assert_eq!(s, ValidationStatus::Error);
    assert!(ValidationStatus::Valid < ValidationStatus::Warning);
}

#[test]
fn result_json_shape() {
    let m = rounds(vec![("r1", vec![])]);
    let v = serde_json::to_value(validate_session(&m, &grid(1, 1))).unwrap();
    assert_eq!(v["status"], "warning");
    assert_eq!(v["stats"]["totalRounds"], 1);
    assert_eq!(v["stats"]["imagesPerRound"], serde_json::json!([0]));
    assert_eq!(v["stats"]["cellCoverage"], serde_json::json!([0]));
}

#[test]
fn malformed_rounds_still_get_a_verdict() {
    let rounds: RoundsMap = serde_json::from_str(
        r#"{
            "1": {"timestamp": "1", "images": null},
            "2": {"timestamp": "2", "images": [
                {"imageData": "x", "metadata": {"row": "1", "col": 2, "cellWidth": 100, "cellHeight": 100}},
                {"imageData": "y", "metadata": {"row": -1, "col": 2, "cellWidth": 100, "cellHeight": 100}}
            ]}
        }"#,
    )
    .unwrap();
    let v = validate_session(&rounds, &grid(4, 6));
    assert_eq!(v.status, ValidationStatus::Warning);
    assert_eq!(
        v.issues,
        vec![
            "Round 1 has no images",
            "Round 2 has an image missing row/col metadata.",
            "Round 2 has an image missing row/col metadata.",
        ]
    );
    assert_eq!(v.stats.images_per_round, vec![0, 2]);
    assert_eq!(v.stats.cell_coverage, vec![0, 0]);
}
