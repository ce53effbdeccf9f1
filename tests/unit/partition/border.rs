use super::*;

fn tween(kind: TweenKind) -> BorderTween {
    BorderTween {
        kind,
        from_value: 100.0,
        to_value: 200.0,
        from_time: 1.0,
        to_time: 3.0,
    }
}

#[test]
fn tween_is_linear_and_unclamped() {
    let t = tween(TweenKind::In);
    assert_eq!(t.value_at(1.0), 100.0);
    assert_eq!(t.value_at(2.0), 150.0);
    assert_eq!(t.value_at(3.0), 200.0);
    assert_eq!(t.value_at(4.0), 250.0);
    assert!(!t.is_done(2.9));
    assert!(t.is_done(3.0));
}

#[test]
fn zero_length_tween_is_at_target() {
    let mut t = tween(TweenKind::Out);
    t.to_time = t.from_time;
    assert_eq!(t.value_at(0.0), 200.0);
}

#[test]
fn border_value_clamps_after_window() {
    let b = Border {
        value: 100.0,
        tween: Some(tween(TweenKind::In)),
    };
    assert!(b.is_tweening());
    assert_eq!(b.value_at(2.0), 150.0);
    assert_eq!(b.value_at(10.0), 200.0);
    assert_eq!(Border::at(7.0).value_at(10.0), 7.0);
}

#[test]
fn snap_jumps_to_target() {
    let mut b = Border {
        value: 120.0,
        tween: Some(tween(TweenKind::Out)),
    };
    b.snap();
    assert_eq!(b, Border::at(200.0));
    b.snap();
    assert_eq!(b.value, 200.0);
}
