use super::*;
use crate::clip::player::SwatchPlayer;

fn pool(n: usize) -> ClipPool {
    ClipPool::new(n, |_| Box::new(SwatchPlayer::new())).unwrap()
}

#[test]
fn zero_capacity_is_rejected() {
    assert!(ClipPool::new(0, |_| Box::new(SwatchPlayer::new())).is_err());
}

#[test]
fn acquire_until_exhausted() {
    let mut p = pool(2);
    assert!(p.acquire().is_some());
    assert!(p.acquire().is_some());
    assert!(p.acquire().is_none());
    assert_eq!(p.active().len(), 2);
    p.validate().unwrap();
}

#[test]
fn released_clips_wait_for_reconcile() {
    let mut p = pool(2);
    let a = p.acquire().unwrap();
    let _b = p.acquire().unwrap();

    assert!(p.release(a));
    assert!(!p.release(a));
    assert_eq!(p.stopped(), &[a]);
    assert!(p.acquire().is_none(), "stopped clips are not reusable mid-frame");
    p.validate().unwrap();

    assert_eq!(p.reconcile(), 1);
    assert!(p.stopped().is_empty());
    assert_eq!(p.acquire(), Some(a));
    p.validate().unwrap();
}

#[test]
fn capacity_never_grows() {
    let mut p = pool(3);
    for _ in 0..10 {
        while let Some(id) = p.acquire() {
            p.release(id);
        }
        p.reconcile();
    }
    assert_eq!(p.capacity(), 3);
    assert_eq!(p.idle().len(), 3);
    p.validate().unwrap();
}
