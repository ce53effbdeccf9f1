use super::*;
use crate::foundation::core::Canvas;

fn data(start: f64, end: f64) -> ClipData {
    ClipData {
        start,
        end,
        index: None,
        z_index: 0,
        resource_ref: "cam-1".to_string(),
    }
}

fn canvas() -> FrameCanvas {
    FrameCanvas::new(
        Canvas {
            width: 20,
            height: 20,
        },
        [0, 0, 0, 255],
    )
    .unwrap()
}

#[test]
fn swatch_color_is_stable_and_opaque() {
    assert_eq!(swatch_color("a"), swatch_color("a"));
    assert_eq!(swatch_color("a")[3], 255);
    assert_ne!(swatch_color("a"), swatch_color("b"));
}

#[test]
fn playback_progress_follows_timeline() {
    let mut p = SwatchPlayer::new();
    p.start(&data(2.0, 6.0), PlaybackMode::Playback, 2.0);
    assert_eq!(p.progress(), 0.0);
    p.update(4.0);
    assert_eq!(p.progress(), 0.5);
    p.update(10.0);
    assert_eq!(p.progress(), 1.0);
}

#[test]
fn capture_steps_one_frame_per_call() {
    let fps = Fps::new(10, 1).unwrap();
    let mut p = SwatchPlayer::new();
    p.start(
        &data(0.0, 1.0),
        PlaybackMode::Capture { fps },
        0.0,
    );
    let mut c = canvas();
    c.begin_frame();
    let region = Region::new(0.0, 0.0, 20.0, 20.0);
    for _ in 0..5 {
        p.capture(&mut c, region, fps).unwrap();
        // Timeline updates do not move a capturing player.
        p.update(100.0);
    }
    // Fifth capture drew frame index 4 => 0.4 s into a 1 s clip.
    assert!((p.progress() - 0.4).abs() < 1e-9);
}

#[test]
fn draw_fills_region_with_swatch() {
    let mut p = SwatchPlayer::new();
    p.start(&data(0.0, 1.0), PlaybackMode::Playback, 0.0);
    let mut c = canvas();
    c.begin_frame();
    p.draw(&mut c, Region::new(0.0, 0.0, 10.0, 20.0)).unwrap();
    let f = c.finish_frame();
    assert_eq!(f.pixel(5, 5), Some(p.color()));
    assert_eq!(f.pixel(15, 5), Some([0, 0, 0, 255]));
}
