use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::detection::domain::object_detector::{Detection, ObjectDetector};
use crate::shared::frame::Frame;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read detection script {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid detection script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Detector that replays a prerecorded list of results, one per call.
///
/// The script is a JSON array whose entries are the detection lists for
/// successive inferences. Once exhausted, every call reports nothing.
/// An optional latency simulates a slow model.
pub struct ScriptedDetector {
    script: Vec<Vec<Detection>>,
    cursor: usize,
    latency: Duration,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Vec<Detection>>) -> Self {
        Self {
            script,
            cursor: 0,
            latency: Duration::ZERO,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let json = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Number of inferences served so far.
    pub fn calls(&self) -> usize {
        self.cursor
    }
}

impl ObjectDetector for ScriptedDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let pixels = frame.as_ndarray().ok_or_else(|| {
            format!(
                "Frame {} buffer does not match {}x{}x{}",
                frame.index(),
                frame.width(),
                frame.height(),
                frame.channels()
            )
        })?;
        log::trace!("Frame {} tensor shape {:?}", frame.index(), pixels.shape());
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        let result = self.script.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Instant;

    const SCRIPT: &str = r#"[
        [{"label": "person", "confidence": 0.9,
          "bbox": {"min_x": 0.4, "min_y": 0.4, "width": 0.2, "height": 0.2}}],
        [],
        [{"label": "dog", "confidence": 0.8,
          "bbox": {"min_x": 0.1, "min_y": 0.1, "width": 0.1, "height": 0.1}},
         {"label": "person", "confidence": 0.7,
          "bbox": {"min_x": 0.5, "min_y": 0.4, "width": 0.2, "height": 0.2}}]
    ]"#;

    fn frame() -> Frame {
        Frame::blank(2, 2, 3, 0, 0.0)
    }

    #[test]
    fn test_replays_in_order_then_empty() {
        let mut detector = ScriptedDetector::from_json(SCRIPT).unwrap();
        assert_eq!(detector.len(), 3);

        let first = detector.detect(&frame()).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].label, "person");

        assert!(detector.detect(&frame()).unwrap().is_empty());
        assert_eq!(detector.detect(&frame()).unwrap().len(), 2);
        assert!(detector.detect(&frame()).unwrap().is_empty());
        assert_eq!(detector.calls(), 4);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = ScriptedDetector::from_json("{not json").err().unwrap();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ScriptedDetector::from_path(Path::new("/nonexistent/script.json"))
            .err()
            .unwrap();
        assert!(matches!(err, ScriptError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/script.json"));
    }

    #[test]
    fn test_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        let detector = ScriptedDetector::from_path(file.path()).unwrap();
        assert_eq!(detector.len(), 3);
    }

    #[test]
    fn test_latency_is_applied() {
        let mut detector =
            ScriptedDetector::new(vec![vec![]]).with_latency(Duration::from_millis(20));
        let start = Instant::now();
        detector.detect(&frame()).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
