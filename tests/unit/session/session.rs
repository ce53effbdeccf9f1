use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Fps};
use crate::score::event::{ClipData, ScoreEvent};

fn cfg() -> EngineConfig {
    EngineConfig {
        canvas: Canvas {
            width: 64,
            height: 32,
        },
        pool_size: 4,
        ..EngineConfig::default()
    }
}

fn score() -> Score {
    let clip = |start: f64, end: f64, r: &str| {
        ScoreEvent::Clip(ClipData {
            start,
            end,
            index: None,
            z_index: 0,
            resource_ref: r.to_string(),
        })
    };
    Score::from_events(vec![clip(0.0, 2.0, "a"), clip(0.5, 3.0, "b"), clip(1.0, 1.5, "c")])
}

fn capture_opts(start_offset: f64) -> SessionOpts {
    SessionOpts {
        mode: PlaybackMode::Capture {
            fps: Fps::new(30, 1).unwrap(),
        },
        start_offset,
        ticks_per_frame: 1,
    }
}

struct FailingSink {
    fail_at: u64,
    pushed: u64,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> SplitreelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, number: FrameNumber, _frame: &FrameRGBA) -> SplitreelResult<()> {
        if number.0 == self.fail_at {
            return Err(SplitreelError::sink("disk full"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> SplitreelResult<()> {
        Ok(())
    }
}

#[test]
fn capture_requires_capture_mode() {
    let mut s = Session::with_swatches(&cfg(), score(), SessionOpts::default()).unwrap();
    let mut sink = InMemorySink::new();
    assert!(s.capture_until(1.0, &mut sink).is_err());
}

#[test]
fn capture_numbers_frames_and_steps_exactly() {
    let mut s = Session::with_swatches(&cfg(), score(), capture_opts(0.0)).unwrap();
    let mut sink = InMemorySink::new();
    let stats = s.capture_until(1.0, &mut sink).unwrap();

    assert_eq!(stats.frames, 30);
    assert_eq!(stats.first_time, 0.0);
    assert!((stats.last_time - 29.0 / 30.0).abs() < 1e-9);
    assert_eq!(stats.clips_started, 2);
    assert!(sink.is_ended());
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 64,
            height: 32,
            fps: Fps::new(30, 1).unwrap()
        })
    );

    let labels: Vec<String> = sink.frames().iter().map(|(n, _)| n.label()).collect();
    assert_eq!(labels[0], "00000");
    assert_eq!(labels[1], "00001");
    assert_eq!(labels[29], "00029");

    // The next capture continues the timeline where the previous one stopped.
    let more = s.capture_until(2.0, &mut sink).unwrap();
    assert!((more.first_time - 1.0).abs() < 1e-9);
    assert_eq!(more.clips_started, 1);
    s.compositor().check_invariants().unwrap();
}

#[test]
fn sink_failure_propagates_and_session_survives() {
    let mut s = Session::with_swatches(&cfg(), score(), capture_opts(0.0)).unwrap();
    let mut bad = FailingSink {
        fail_at: 3,
        pushed: 0,
    };
    let err = s.capture_until(1.0, &mut bad).unwrap_err();
    assert!(err.to_string().contains("disk full"));
    assert_eq!(bad.pushed, 3);
    s.compositor().check_invariants().unwrap();

    let mut sink = InMemorySink::new();
    let stats = s.capture_until(1.5, &mut sink).unwrap();
    assert!(stats.frames > 0);
}

#[test]
fn start_offset_skips_earlier_events() {
    let s = Session::with_swatches(&cfg(), score(), capture_opts(0.75)).unwrap();
    assert_eq!(s.cursor().remaining(), 1);
    assert_eq!(s.clock().time(), 0.75);
}

#[test]
fn playback_step_renders_every_tick() {
    let mut s = Session::with_swatches(&cfg(), score(), SessionOpts::default()).unwrap();
    let first = s.step(Duration::from_millis(16)).unwrap().unwrap();
    assert_eq!((first.width, first.height), (64, 32));
    assert_eq!(s.compositor().partition().len(), 1);

    s.step(Duration::from_millis(600)).unwrap().unwrap();
    assert_eq!(s.compositor().partition().len(), 2);
}
