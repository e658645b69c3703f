use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::detection::domain::target_selector::TargetSelector;
use crate::motion::domain::motion_tracker::{MotionTracker, MotionUpdate};
use crate::pipeline::pipeline_error::PipelineError;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::render::domain::motion_sink::MotionSink;

/// Called with each classification and the capture timestamp of its frame.
pub type UpdateCallback = Box<dyn Fn(&MotionUpdate, f64) + Send>;

/// Configuration for a pipeline execution run.
pub struct PipelineConfig {
    pub cancelled: Arc<AtomicBool>,
    pub on_update: Option<UpdateCallback>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            on_update: None,
        }
    }
}

/// Counters describing one finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames_offered: u64,
    pub frames_admitted: u64,
    pub frames_dropped: u64,
    /// Inferences that ran to completion.
    pub inferences: u64,
    /// Inferences in which the target was not found.
    pub missed: u64,
    pub moving_updates: u64,
    pub settled_updates: u64,
}

impl PipelineStats {
    pub fn updates(&self) -> u64 {
        self.moving_updates + self.settled_updates
    }
}

/// The pieces a run is assembled from.
pub struct PipelineComponents {
    pub source: Box<dyn FrameSource>,
    pub detector: Box<dyn ObjectDetector>,
    pub selector: TargetSelector,
    pub tracker: MotionTracker,
    pub sink: Box<dyn MotionSink>,
    pub logger: Box<dyn PipelineLogger>,
}

/// Abstracts how the capture → gate → detect → track → render pipeline
/// is executed.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations.
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        components: PipelineComponents,
        config: PipelineConfig,
    ) -> Result<PipelineStats, PipelineError>;
}
