use std::io::Write;

use serde::Serialize;

use crate::motion::domain::motion_tracker::MotionUpdate;
use crate::render::domain::motion_sink::MotionSink;
use crate::shared::bounding_box::BoundingBox;

#[derive(Serialize)]
struct Record<'a> {
    timestamp: f64,
    moving: bool,
    bbox: &'a BoundingBox,
}

/// Writes one JSON object per update to any `Write` target.
pub struct JsonLinesMotionSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonLinesMotionSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> MotionSink for JsonLinesMotionSink<W> {
    fn render(
        &mut self,
        update: &MotionUpdate,
        timestamp: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let record = Record {
            timestamp,
            moving: update.moving,
            bbox: &update.bbox,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_line_per_update() {
        let mut sink = JsonLinesMotionSink::new(Vec::new());
        let bbox = BoundingBox::new(0.25, 0.5, 0.25, 0.5);
        sink.render(&MotionUpdate { bbox, moving: true }, 0.5).unwrap();
        sink.render(&MotionUpdate { bbox, moving: false }, 1.0).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["moving"], true);
        assert_eq!(first["timestamp"], 0.5);
        assert_eq!(first["bbox"]["min_x"], 0.25);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["moving"], false);
    }
}
