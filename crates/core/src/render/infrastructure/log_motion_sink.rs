use crate::motion::domain::motion_tracker::MotionUpdate;
use crate::render::domain::motion_sink::MotionSink;

/// Reports every update through the `log` facade.
#[derive(Debug, Default)]
pub struct LogMotionSink;

impl MotionSink for LogMotionSink {
    fn render(
        &mut self,
        update: &MotionUpdate,
        timestamp: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let b = &update.bbox;
        log::info!(
            "t={timestamp:.3}s {} box=({:.3}, {:.3}, {:.3}x{:.3})",
            if update.moving { "MOVING " } else { "SETTLED" },
            b.min_x,
            b.min_y,
            b.width,
            b.height
        );
        Ok(())
    }
}
