use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::detection::domain::target_selector::TargetSelector;
use crate::motion::domain::motion_tracker::MotionTracker;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::render::domain::motion_sink::MotionSink;

use super::pipeline_error::PipelineError;
use super::pipeline_executor::{
    PipelineComponents, PipelineConfig, PipelineExecutor, PipelineStats, UpdateCallback,
};

/// Orchestrates a live target-tracking session.
///
/// Wires domain components together and delegates execution to a
/// `PipelineExecutor`. Single-use: `execute` consumes the owned components,
/// so a second call fails with [`PipelineError::AlreadyExecuted`].
pub struct TrackTargetUseCase {
    source: Option<Box<dyn FrameSource>>,
    detector: Option<Box<dyn ObjectDetector>>,
    selector: TargetSelector,
    tracker: Option<MotionTracker>,
    sink: Option<Box<dyn MotionSink>>,
    logger: Option<Box<dyn PipelineLogger>>,
    executor: Box<dyn PipelineExecutor>,
    on_update: Option<UpdateCallback>,
    cancelled: Arc<AtomicBool>,
}

impl TrackTargetUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn ObjectDetector>,
        selector: TargetSelector,
        tracker: MotionTracker,
        sink: Box<dyn MotionSink>,
        executor: Box<dyn PipelineExecutor>,
    ) -> Self {
        Self {
            source: Some(source),
            detector: Some(detector),
            selector,
            tracker: Some(tracker),
            sink: Some(sink),
            logger: None,
            executor,
            on_update: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_logger(mut self, logger: Box<dyn PipelineLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_on_update(mut self, on_update: UpdateCallback) -> Self {
        self.on_update = Some(on_update);
        self
    }

    /// Flag that stops capture when set; in-flight inference still finishes.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn execute(&mut self) -> Result<PipelineStats, PipelineError> {
        let source = self.source.take().ok_or(PipelineError::AlreadyExecuted)?;
        let detector = self.detector.take().ok_or(PipelineError::AlreadyExecuted)?;
        let tracker = self.tracker.take().ok_or(PipelineError::AlreadyExecuted)?;
        let sink = self.sink.take().ok_or(PipelineError::AlreadyExecuted)?;
        let logger = self
            .logger
            .take()
            .unwrap_or_else(|| Box::new(NullPipelineLogger));

        let components = PipelineComponents {
            source,
            detector,
            selector: self.selector.clone(),
            tracker,
            sink,
            logger,
        };
        let config = PipelineConfig {
            cancelled: self.cancelled.clone(),
            on_update: self.on_update.take(),
        };

        self.executor.execute(components, config)
    }
}
