use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("frame source failed: {0}")]
    Source(String),
    #[error("motion sink failed: {0}")]
    Sink(String),
    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),
    #[error("pipeline already executed")]
    AlreadyExecuted,
}
