use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use settle_core::capture::infrastructure::paced_frame_source::PacedFrameSource;
use settle_core::detection::domain::target_selector::TargetSelector;
use settle_core::detection::infrastructure::scripted_detector::ScriptedDetector;
use settle_core::motion::domain::motion_config::MotionConfig;
use settle_core::motion::domain::motion_tracker::MotionTracker;
use settle_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use settle_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use settle_core::pipeline::track_target_use_case::TrackTargetUseCase;
use settle_core::render::domain::motion_sink::MotionSink;
use settle_core::render::infrastructure::json_lines_motion_sink::JsonLinesMotionSink;
use settle_core::render::infrastructure::log_motion_sink::LogMotionSink;
use settle_core::shared::constants::{
    DEFAULT_FPS, SMOOTHING_WINDOW_SECONDS, STILLNESS_THRESHOLD, TARGET_LABEL,
};

/// Replays scripted detections through the frame gate and motion tracker.
#[derive(Parser)]
#[command(name = "settle")]
struct Cli {
    /// JSON detection script: an array of per-inference detection lists.
    script: PathBuf,

    /// Simulated camera rate in frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: f64,

    /// Number of frames to capture.
    #[arg(long, default_value = "300")]
    frames: usize,

    /// Simulated inference latency in milliseconds.
    #[arg(long, default_value = "50")]
    latency_ms: u64,

    /// Detector label to track.
    #[arg(long, default_value = TARGET_LABEL)]
    label: String,

    /// Ignore detections below this confidence (0.0-1.0).
    #[arg(long, default_value = "0.0")]
    min_confidence: f32,

    /// Seconds of history the smoothing window spans.
    #[arg(long, default_value_t = SMOOTHING_WINDOW_SECONDS)]
    window_seconds: f64,

    /// Smoothed motion per second below which the target is still.
    #[arg(long, default_value_t = STILLNESS_THRESHOLD)]
    stillness_threshold: f64,

    /// Emit one JSON object per update on stdout instead of log lines.
    #[arg(long)]
    json: bool,

    /// Deliver frames as fast as possible instead of at --fps.
    #[arg(long)]
    unpaced: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let motion_config = MotionConfig {
        window_seconds: cli.window_seconds,
        stillness_threshold: cli.stillness_threshold,
        ..MotionConfig::default()
    };
    motion_config.validate()?;

    let detector = ScriptedDetector::from_path(&cli.script)?
        .with_latency(Duration::from_millis(cli.latency_ms));
    log::info!(
        "Loaded {} scripted inferences from {}",
        detector.len(),
        cli.script.display()
    );

    let source = PacedFrameSource::new(cli.fps, cli.frames)?.with_realtime(!cli.unpaced);
    let selector = TargetSelector::new(cli.label).with_min_confidence(cli.min_confidence);
    let sink: Box<dyn MotionSink> = if cli.json {
        Box::new(JsonLinesMotionSink::new(io::stdout()))
    } else {
        Box::new(LogMotionSink)
    };

    let mut use_case = TrackTargetUseCase::new(
        Box::new(source),
        Box::new(detector),
        selector,
        MotionTracker::new(motion_config),
        sink,
        Box::new(ThreadedPipelineExecutor::new()),
    )
    .with_logger(Box::new(StdoutPipelineLogger::default()));

    let stats = use_case.execute()?;
    log::info!(
        "Done: {} inferences, {} moving, {} settled, {} without target",
        stats.inferences,
        stats.moving_updates,
        stats.settled_updates,
        stats.missed
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.script.exists() {
        return Err(format!("Script file not found: {}", cli.script.display()).into());
    }
    if !cli.fps.is_finite() || cli.fps <= 0.0 {
        return Err(format!("FPS must be positive, got {}", cli.fps).into());
    }
    if cli.frames == 0 {
        return Err("Frame count must be at least 1".into());
    }
    if !(0.0..=1.0).contains(&cli.min_confidence) {
        return Err(format!(
            "Min confidence must be between 0.0 and 1.0, got {}",
            cli.min_confidence
        )
        .into());
    }
    if cli.label.trim().is_empty() {
        return Err("Label must not be empty".into());
    }
    Ok(())
}
