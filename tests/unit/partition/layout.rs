use super::*;
use crate::partition::border::{BorderTween, TweenKind};

fn canvas() -> Canvas {
    Canvas {
        width: 400,
        height: 200,
    }
}

fn values(p: &Partition) -> Vec<f64> {
    p.borders().iter().map(|b| b.value).collect()
}

fn unindexed(_: ClipId) -> Option<usize> {
    None
}

#[test]
fn empty_partition_spans_the_canvas() {
    let p = Partition::new(canvas(), Orientation::Columns);
    assert_eq!(values(&p), vec![0.0, 400.0]);
    assert!(p.is_empty());
    assert_eq!(p.region(0), None);
    p.validate().unwrap();
}

#[test]
fn insert_splices_zero_width_region() {
    let mut p = Partition::new(canvas(), Orientation::Columns);
    assert_eq!(p.insert(ClipId(0), 0, unindexed), 0);
    assert_eq!(values(&p), vec![0.0, 400.0]);

    assert_eq!(p.insert(ClipId(1), 1, unindexed), 1);
    assert_eq!(p.slots(), &[ClipId(0), ClipId(1)]);
    assert_eq!(values(&p), vec![0.0, 400.0, 400.0]);
    assert_eq!(p.region(1).unwrap().width(), 0.0);

    assert_eq!(p.insert(ClipId(2), 0, unindexed), 0);
    assert_eq!(values(&p), vec![0.0, 0.0, 400.0, 400.0]);
    p.validate().unwrap();
}

#[test]
fn spread_evenly_spaces_borders() {
    let mut p = Partition::new(canvas(), Orientation::Columns);
    for i in 0..4 {
        p.insert(ClipId(i), i, unindexed);
    }
    p.spread_evenly();
    assert_eq!(values(&p), vec![0.0, 100.0, 200.0, 300.0, 400.0]);
    assert!(p.borders().iter().all(|b| !b.is_tweening()));
}

#[test]
fn regions_follow_orientation() {
    let mut p = Partition::new(canvas(), Orientation::Columns);
    p.insert(ClipId(0), 0, unindexed);
    p.insert(ClipId(1), 1, unindexed);
    p.spread_evenly();
    assert_eq!(p.region(1), Some(Region::new(200.0, 0.0, 400.0, 200.0)));

    assert!(p.set_orientation(Orientation::Rows));
    assert_eq!(values(&p), vec![0.0, 100.0, 200.0]);
    assert_eq!(p.region(0), Some(Region::new(0.0, 0.0, 400.0, 100.0)));
}

#[test]
fn orientation_switch_is_idempotent_and_rescales_tweens() {
    let mut p = Partition::new(canvas(), Orientation::Columns);
    p.insert(ClipId(0), 0, unindexed);
    p.insert(ClipId(1), 1, unindexed);
    p.spread_evenly();
    p.borders_mut()[1].tween = Some(BorderTween {
        kind: TweenKind::In,
        from_value: 100.0,
        to_value: 300.0,
        from_time: 0.0,
        to_time: 1.0,
    });

    assert!(!p.set_orientation(Orientation::Columns));
    assert_eq!(values(&p), vec![0.0, 200.0, 400.0]);

    p.set_orientation(Orientation::Rows);
    let t = p.borders()[1].tween.unwrap();
    assert_eq!((t.from_value, t.to_value), (50.0, 150.0));
    p.set_orientation(Orientation::Columns);
    assert_eq!(values(&p), vec![0.0, 200.0, 400.0]);
}

#[test]
fn remove_drops_adjacent_border_and_keeps_edges() {
    let mut p = Partition::new(canvas(), Orientation::Columns);
    for i in 0..3 {
        p.insert(ClipId(i), i, unindexed);
    }
    p.spread_evenly();

    assert_eq!(p.remove(ClipId(2)), Some(2));
    assert_eq!(p.len(), 2);
    assert_eq!(p.borders().len(), 3);
    assert_eq!(p.borders().last().unwrap().value, 400.0);

    assert_eq!(p.remove(ClipId(0)), Some(0));
    assert_eq!(p.remove(ClipId(1)), Some(0));
    assert_eq!(values(&p), vec![0.0, 400.0]);
    assert_eq!(p.remove(ClipId(1)), None);
    p.validate().unwrap();
}

#[test]
fn targets_collapse_flagged_clips() {
    let mut p = Partition::new(canvas(), Orientation::Columns);
    for i in 0..3 {
        p.insert(ClipId(i), i, unindexed);
    }
    let t = p.targets(|id| id == ClipId(1)).unwrap();
    assert_eq!(t, vec![0.0, 200.0, 200.0, 400.0]);
    assert!(p.targets(|_| true).is_none());
}

#[test]
fn validate_reports_broken_order() {
    let mut p = Partition::new(canvas(), Orientation::Columns);
    p.insert(ClipId(0), 0, unindexed);
    p.insert(ClipId(1), 1, unindexed);
    p.borders_mut()[1].value = 450.0;
    let err = p.validate().unwrap_err().to_string();
    assert!(err.starts_with("layout error:"), "{err}");
}

#[test]
fn indexed_clips_keep_their_slot() {
    let idx = |id: ClipId| (id == ClipId(0)).then_some(1);
    // A (index 1) first, then B unindexed placed in front of it.
    assert_eq!(
        place_slots(&[ClipId(0), ClipId(1)], idx),
        vec![ClipId(1), ClipId(0)]
    );
    // Third clip C, wherever it lands in arrival order, cannot move A.
    for order in [
        [ClipId(2), ClipId(1), ClipId(0)],
        [ClipId(1), ClipId(0), ClipId(2)],
    ] {
        let placed = place_slots(&order, idx);
        assert_eq!(placed[1], ClipId(0));
        assert_eq!(placed.len(), 3);
    }
}

#[test]
fn index_collisions_and_overflow_fill_every_slot() {
    let idx = |id: ClipId| match id.0 {
        0 | 1 => Some(0),
        2 => Some(9),
        3 => Some(5),
        _ => None,
    };
    let placed = place_slots(&[ClipId(0), ClipId(1), ClipId(2), ClipId(3), ClipId(4)], idx);
    // 0 keeps its index, 1 and 4 fill first-fit, 3 and 2 take the right end by index.
    assert_eq!(
        placed,
        vec![ClipId(0), ClipId(1), ClipId(4), ClipId(3), ClipId(2)]
    );
}
