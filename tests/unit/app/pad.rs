use super::*;
use crate::drawing::ink::SegmentLog;
use crate::foundation::clock::ManualClock;
use crate::foundation::core::Point;
use crate::geometry::provider::GeometryProvider;
use crate::record::stroke::PointKind;
use crate::session::validate::ValidationStatus;

fn pad(clock: &ManualClock) -> Pad<ManualClock, SegmentLog> {
    Pad::new(&PadConfig::default(), clock.clone(), SegmentLog::new())
}

fn at(x: f64, y: f64) -> PointerEvent {
    PointerEvent::mouse(Point::new(x, y))
}

#[test]
fn ink_without_session_records_nothing() {
    let clock = ManualClock::new(0);
    let mut p = pad(&clock);
    p.begin_round("1");
    p.pointer_down(&at(50.0, 50.0));
    p.pointer_move(&at(60.0, 50.0));
    p.pointer_up(&at(70.0, 50.0));

    assert_eq!(p.surface().segments().len(), 1);
    assert!(p.recorder().strokes().is_empty());
}

#[test]
fn finish_without_open_round_fails() {
    let clock = ManualClock::new(0);
    let mut p = pad(&clock);
    let err = p.finish_round(Vec::new()).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"), "{err}");
    assert!(p.rounds().is_empty());
}

#[test]
fn round_stores_images_and_stroke_data() {
    let clock = ManualClock::new(1_000);
    let mut p = pad(&clock);
    p.start_session();
    p.begin_round("1000");
    assert_eq!(p.open_round(), Some("1000"));

    p.pointer_down(&at(50.0, 60.0));
    clock.advance(16);
    p.pointer_move(&at(70.0, 80.0));
    clock.advance(16);
    p.pointer_up(&at(90.0, 100.0));

    let cell = Cell::new(1, 1);
    let image = p.drawing_for_cell(cell, "data:image/png;base64,AAAA");
    p.finish_round(vec![image]).unwrap();
    assert_eq!(p.open_round(), None);
    assert!(!p.recorder().is_recording());

    let round = p.rounds().get("1000").unwrap();
    assert_eq!(round.timestamp, "1000");
    assert_eq!(round.images.len(), 1);

    let data = round.stroke_data.as_ref().unwrap();
    assert_eq!(data["startTime"], 1_000);
    assert_eq!(data["endTime"], 1_032);
    assert_eq!(data["metadata"]["totalStrokes"], 1);
    assert_eq!(data["metadata"]["totalPoints"], 3);
    assert_eq!(data["metadata"]["strokesInCells"], 1);
    let first = &data["strokes"][0]["points"][0];
    assert_eq!(first["x"], 10.0);
    assert_eq!(first["y"], 20.0);
    assert_eq!(first["type"], "start");

    let verdict = p.validate();
    assert_eq!(verdict.status, ValidationStatus::Valid, "{:?}", verdict.issues);
    assert_eq!(verdict.stats.total_images, 1);
    assert_eq!(verdict.stats.cell_coverage, vec![1]);
}

#[test]
fn empty_round_is_a_warning() {
    let clock = ManualClock::new(0);
    let mut p = pad(&clock);
    p.start_session();
    p.begin_round("5");
    p.finish_round(Vec::new()).unwrap();

    let verdict = p.validate();
    assert_eq!(verdict.status, ValidationStatus::Warning);
    assert_eq!(verdict.issues[0], "Round 5 has no images");
}

#[test]
fn resize_mid_gesture_follows_new_cell_origin() {
    let clock = ManualClock::new(0);
    let mut p = pad(&clock);
    p.start_session();
    p.begin_round("1");
    p.pointer_down(&at(50.0, 50.0));

    p.resize(Canvas::new(1000, 700).unwrap());
    let origin = p.grid().cell_origin(Cell::new(1, 1));
    assert_ne!(origin, Point::new(40.0, 40.0));
    p.pointer_up(&at(origin.x + 5.0, origin.y + 7.0));

    let stroke = &p.recorder().strokes()[0];
    let end = stroke.points.last().unwrap();
    assert_eq!(end.kind, PointKind::End);
    assert!((end.x - 5.0).abs() < 1e-9);
    assert!((end.y - 7.0).abs() < 1e-9);
}

#[test]
fn pointer_out_closes_gesture_at_last_point() {
    let clock = ManualClock::new(0);
    let mut p = pad(&clock);
    p.start_session();
    p.begin_round("1");
    p.pointer_down(&at(500.0, 500.0));
    p.pointer_move(&at(510.0, 505.0));
    p.pointer_out();

    let stroke = &p.recorder().strokes()[0];
    assert_eq!(stroke.cell, None);
    let end = stroke.points.last().unwrap();
    assert_eq!((end.x, end.y), (510.0, 505.0));
}

#[test]
fn begin_round_clears_ink_and_previous_strokes() {
    let clock = ManualClock::new(0);
    let mut p = pad(&clock);
    p.start_session();
    p.begin_round("1");
    p.pointer_down(&at(50.0, 50.0));
    p.pointer_move(&at(60.0, 60.0));
    p.pointer_up(&at(60.0, 60.0));
    p.finish_round(Vec::new()).unwrap();

    p.begin_round("2");
    assert!(p.surface().segments().is_empty());
    assert!(p.recorder().strokes().is_empty());
    p.finish_round(Vec::new()).unwrap();

    let keys: Vec<&str> = p.rounds().keys().collect();
    assert_eq!(keys, vec!["1", "2"]);
}
