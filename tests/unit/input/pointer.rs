use super::*;

fn adapter() -> PointerAdapter {
    PointerAdapter::new(Rect::new(10.0, 30.0, 810.0, 630.0))
}

#[test]
fn mouse_position_is_canvas_relative() {
    let e = adapter().mouse(Point::new(15.0, 40.0), None);
    assert_eq!(e.position(), Point::new(5.0, 10.0));
    assert_eq!(adapter().get_pos(&e), Point::new(5.0, 10.0));
}

#[test]
fn touch_prefers_active_touch_then_changed() {
    let a = adapter();
    let active = [TouchPoint {
        client: Point::new(20.0, 30.0),
        force: Some(0.25),
    }];
    let changed = [TouchPoint {
        client: Point::new(99.0, 99.0),
        force: None,
    }];

    let e = a.touch(&active, &changed).unwrap();
    assert_eq!(e.position(), Point::new(10.0, 0.0));
    assert_eq!(e.pressure(), 0.25);

    let e = a.touch(&[], &changed).unwrap();
    assert_eq!(e.position(), Point::new(89.0, 69.0));

    assert!(a.touch(&[], &[]).is_none());
}

#[test]
fn pressure_defaults_to_one() {
    assert_eq!(PointerEvent::mouse(Point::ORIGIN).pressure(), 1.0);
    assert_eq!(PointerEvent::touch(Point::ORIGIN).pressure(), 1.0);
}

#[test]
fn pressure_is_clamped_to_unit_range() {
    let e = PointerEvent::Mouse {
        position: Point::ORIGIN,
        pressure: Some(3.0),
    };
    assert_eq!(e.pressure(), 1.0);
    let e = PointerEvent::Touch {
        position: Point::ORIGIN,
        force: Some(-1.0),
    };
    assert_eq!(e.pressure(), 0.0);
}

#[test]
fn event_json_is_tagged_by_kind() {
    let e = PointerEvent::Touch {
        position: Point::new(1.0, 2.0),
        force: Some(0.5),
    };
    let v = serde_json::to_value(e).unwrap();
    assert_eq!(v["kind"], "touch");
    let back: PointerEvent = serde_json::from_value(v).unwrap();
    assert_eq!(back, e);
}
