use crate::shared::frame::Frame;

/// Delivers timestamped frames from a camera or other capture device.
///
/// The pipeline pulls frames as fast as the source yields them; pacing to
/// the capture rate is the source's job.
pub trait FrameSource: Send {
    /// Nominal frames per second, used for logging only.
    fn fps(&self) -> f64;

    /// Returns an iterator over frames in capture order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;
}
