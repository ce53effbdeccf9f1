use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "splitreel", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture a score as a PNG frame sequence.
    Capture(CaptureArgs),
    /// Print the layout of every captured frame as JSON lines.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Score JSON (array of clip/action events).
    #[arg(long)]
    score: PathBuf,

    /// Engine config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for `frame_NNNNN.png`.
    #[arg(long)]
    out: PathBuf,

    /// Timeline time to stop at, in seconds.
    #[arg(long)]
    seconds: f64,

    /// Timeline time to start at, in seconds.
    #[arg(long, default_value_t = 0.0)]
    start: f64,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Score JSON (array of clip/action events).
    #[arg(long)]
    score: PathBuf,

    /// Engine config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Timeline time to stop at, in seconds.
    #[arg(long)]
    seconds: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Capture(args) => cmd_capture(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn load(
    score: &Path,
    config: Option<&Path>,
) -> anyhow::Result<(splitreel::EngineConfig, splitreel::Score)> {
    let cfg = match config {
        Some(p) => splitreel::EngineConfig::from_path(p)?,
        None => splitreel::EngineConfig::default(),
    };
    cfg.validate()?;
    let score = splitreel::Score::from_path(score)
        .with_context(|| format!("load score '{}'", score.display()))?;
    if score.skipped() > 0 {
        tracing::warn!(skipped = score.skipped(), "score contained malformed events");
    }
    Ok((cfg, score))
}

fn capture_opts(cfg: &splitreel::EngineConfig, start: f64) -> splitreel::SessionOpts {
    splitreel::SessionOpts {
        mode: splitreel::PlaybackMode::Capture { fps: cfg.framerate },
        start_offset: start,
        ticks_per_frame: 1,
    }
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let (cfg, score) = load(&args.score, args.config.as_deref())?;
    let mut session =
        splitreel::Session::with_swatches(&cfg, score, capture_opts(&cfg, args.start))?;
    let mut sink = splitreel::PngSequenceSink::new(&args.out);
    let stats = session.capture_until(args.seconds, &mut sink)?;
    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out.display()
    );
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let (cfg, score) = load(&args.score, args.config.as_deref())?;
    let mut session = splitreel::Session::with_swatches(&cfg, score, capture_opts(&cfg, 0.0))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    while session.clock().next_frame_time() < args.seconds {
        if session.step(Duration::ZERO)?.is_none() {
            continue;
        }
        let snapshot = session.compositor().layout();
        serde_json::to_writer(&mut out, &snapshot).context("serialize layout snapshot")?;
        writeln!(out).context("write layout line")?;
    }
    Ok(())
}
