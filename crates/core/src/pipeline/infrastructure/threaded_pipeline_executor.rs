use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::detection::domain::target_selector::TargetSelector;
use crate::gate::domain::admission_gate::{Admission, FrameGate, InferencePermit};
use crate::motion::domain::motion_tracker::MotionTracker;
use crate::pipeline::pipeline_error::PipelineError;
use crate::pipeline::pipeline_executor::{
    PipelineComponents, PipelineConfig, PipelineExecutor, PipelineStats, UpdateCallback,
};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::render::domain::motion_sink::MotionSink;
use crate::shared::frame::Frame;

/// The gate admits one frame at a time, so one slot is enough.
const ADMITTED_CHANNEL_CAPACITY: usize = 1;

type Admitted = (Frame, InferencePermit);

/// Runs capture and inference on dedicated threads.
///
/// Layout: `capture [gate] → inference [detect → select → track → render]`
///
/// The capture thread offers every frame to a [`FrameGate`] and forwards
/// only admitted frames. The inference thread owns the tracker and completes
/// each permit once the update has been rendered, so tracker updates are
/// strictly serialized and the gate is released on a different thread than
/// the one that acquired it.
pub struct ThreadedPipelineExecutor {
    gate: FrameGate,
}

impl ThreadedPipelineExecutor {
    pub fn new() -> Self {
        Self::with_gate(FrameGate::new())
    }

    /// Uses an externally owned gate, e.g. to inspect its counters.
    pub fn with_gate(gate: FrameGate) -> Self {
        Self { gate }
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

struct InferenceStage {
    detector: Box<dyn ObjectDetector>,
    selector: TargetSelector,
    tracker: MotionTracker,
    sink: Box<dyn MotionSink>,
    logger: Box<dyn PipelineLogger>,
    on_update: Option<UpdateCallback>,
}

#[derive(Default)]
struct InferenceCounts {
    inferences: u64,
    missed: u64,
    moving: u64,
    settled: u64,
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        components: PipelineComponents,
        config: PipelineConfig,
    ) -> Result<PipelineStats, PipelineError> {
        let PipelineComponents {
            source,
            detector,
            selector,
            tracker,
            sink,
            mut logger,
        } = components;

        logger.info(&format!(
            "Tracking '{}' from a {:.1} fps source",
            selector.label(),
            source.fps()
        ));

        let gate_before = self.gate.stats();
        let stop = Arc::new(AtomicBool::new(false));
        let (admitted_tx, admitted_rx) =
            crossbeam_channel::bounded::<Admitted>(ADMITTED_CHANNEL_CAPACITY);

        let capture_handle = spawn_capture(
            source,
            self.gate.clone(),
            admitted_tx,
            config.cancelled.clone(),
            stop.clone(),
        );
        let stage = InferenceStage {
            detector,
            selector,
            tracker,
            sink,
            logger,
            on_update: config.on_update,
        };
        let inference_handle = spawn_inference(stage, admitted_rx, stop);

        let (offered, (mut logger, counts)) = join_threads(capture_handle, inference_handle)?;

        let gate_after = self.gate.stats();
        let stats = PipelineStats {
            frames_offered: offered,
            frames_admitted: gate_after.admitted - gate_before.admitted,
            frames_dropped: gate_after.dropped - gate_before.dropped,
            inferences: counts.inferences,
            missed: counts.missed,
            moving_updates: counts.moving,
            settled_updates: counts.settled,
        };

        logger.info(&format!(
            "Frames: {} offered, {} admitted, {} dropped",
            stats.frames_offered, stats.frames_admitted, stats.frames_dropped
        ));
        logger.summary();

        Ok(stats)
    }
}

fn spawn_capture(
    mut source: Box<dyn FrameSource>,
    gate: FrameGate,
    admitted_tx: Sender<Admitted>,
    cancelled: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<Result<u64, PipelineError>> {
    std::thread::spawn(move || {
        let mut offered = 0u64;
        for frame_result in source.frames() {
            if cancelled.load(Ordering::Relaxed) || stop.load(Ordering::Relaxed) {
                break;
            }
            let frame = frame_result.map_err(|e| PipelineError::Source(e.to_string()))?;
            offered += 1;

            match gate.offer() {
                Admission::Admitted(permit) => {
                    // On a closed channel the permit comes back inside the
                    // error and is released when it drops.
                    if admitted_tx.send((frame, permit)).is_err() {
                        break;
                    }
                }
                Admission::Dropped => {
                    log::trace!("Dropped frame {} (inference in flight)", frame.index());
                }
            }
        }
        Ok(offered)
    })
}

fn spawn_inference(
    mut stage: InferenceStage,
    admitted_rx: Receiver<Admitted>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<Result<(Box<dyn PipelineLogger>, InferenceCounts), PipelineError>> {
    std::thread::spawn(move || {
        let mut counts = InferenceCounts::default();

        for (frame, permit) in admitted_rx {
            if let Err(e) = run_inference(&mut stage, &frame, &mut counts) {
                stop.store(true, Ordering::Relaxed);
                return Err(e);
            }
            permit.complete();
            stage.logger.progress(counts.inferences as usize);
        }

        Ok((stage.logger, counts))
    })
}

/// One admitted frame: detect, pick the target, classify, render.
///
/// Detector failures count as "no target" and never stop the pipeline.
fn run_inference(
    stage: &mut InferenceStage,
    frame: &Frame,
    counts: &mut InferenceCounts,
) -> Result<(), PipelineError> {
    let started = Instant::now();
    let detections = match stage.detector.detect(frame) {
        Ok(detections) => detections,
        Err(e) => {
            log::warn!("Detection failed on frame {}: {e}", frame.index());
            Vec::new()
        }
    };
    stage
        .logger
        .timing("detect", started.elapsed().as_secs_f64() * 1000.0);
    stage.logger.metric("detections", detections.len() as f64);

    let observation = stage.selector.select(&detections);
    counts.inferences += 1;

    let Some(update) = stage.tracker.update(&observation, frame.timestamp()) else {
        counts.missed += 1;
        return Ok(());
    };

    if update.moving {
        counts.moving += 1;
    } else {
        counts.settled += 1;
    }

    stage
        .sink
        .render(&update, frame.timestamp())
        .map_err(|e| PipelineError::Sink(e.to_string()))?;

    if let Some(ref callback) = stage.on_update {
        callback(&update, frame.timestamp());
    }

    Ok(())
}

/// Joins both pipeline threads and reports the first error encountered.
#[allow(clippy::type_complexity)]
fn join_threads(
    capture_handle: JoinHandle<Result<u64, PipelineError>>,
    inference_handle: JoinHandle<Result<(Box<dyn PipelineLogger>, InferenceCounts), PipelineError>>,
) -> Result<(u64, (Box<dyn PipelineLogger>, InferenceCounts)), PipelineError> {
    let capture = capture_handle.join();
    let inference = inference_handle.join();

    let capture = capture.map_err(|_| PipelineError::ThreadPanicked("Capture"))?;
    let inference = inference.map_err(|_| PipelineError::ThreadPanicked("Inference"))?;

    // Inference errors are the root cause when both fail.
    let inference = inference?;
    Ok((capture?, inference))
}
