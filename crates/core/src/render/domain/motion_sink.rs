use crate::motion::domain::motion_tracker::MotionUpdate;

/// Consumes classified target boxes, e.g. to draw an overlay.
///
/// Boxes arrive in normalized top-left-origin coordinates; mapping them to a
/// drawing surface is the sink's concern.
pub trait MotionSink: Send {
    fn render(
        &mut self,
        update: &MotionUpdate,
        timestamp: f64,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
