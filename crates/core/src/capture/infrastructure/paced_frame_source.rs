use std::thread;
use std::time::{Duration, Instant};

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

const DEFAULT_WIDTH: u32 = 64;
const DEFAULT_HEIGHT: u32 = 48;
const CHANNELS: u8 = 3;

/// Synthetic camera that emits blank frames at a fixed rate.
///
/// Timestamps are `index / fps`. With `realtime` enabled the iterator sleeps
/// until each frame's due time, so a slow consumer sees frames pile up the
/// way a live camera would.
pub struct PacedFrameSource {
    fps: f64,
    count: usize,
    width: u32,
    height: u32,
    realtime: bool,
}

impl PacedFrameSource {
    pub fn new(fps: f64, count: usize) -> Result<Self, &'static str> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err("fps must be positive");
        }
        Ok(Self {
            fps,
            count,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            realtime: false,
        })
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }
}

impl FrameSource for PacedFrameSource {
    fn fps(&self) -> f64 {
        self.fps
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let start = Instant::now();
        let fps = self.fps;
        let (width, height, realtime) = (self.width, self.height, self.realtime);

        Box::new((0..self.count).map(move |index| {
            let timestamp = index as f64 / fps;
            if realtime {
                let due = start + Duration::from_secs_f64(timestamp);
                let now = Instant::now();
                if due > now {
                    thread::sleep(due - now);
                }
            }
            Ok(Frame::blank(width, height, CHANNELS, index, timestamp))
        }))
    }
}
