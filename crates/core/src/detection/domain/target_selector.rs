use crate::detection::domain::object_detector::Detection;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::TARGET_LABEL;

/// What the tracker sees for one inference: the target's box, or nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetObservation {
    pub target: Option<BoundingBox>,
}

impl TargetObservation {
    pub fn found(bbox: BoundingBox) -> Self {
        Self { target: Some(bbox) }
    }

    pub fn missing() -> Self {
        Self { target: None }
    }
}

/// Picks the single tracked target out of a detector's output.
///
/// The first detection whose label matches wins; later matches and other
/// classes are ignored.
#[derive(Clone, Debug)]
pub struct TargetSelector {
    label: String,
    min_confidence: f32,
}

impl TargetSelector {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            min_confidence: 0.0,
        }
    }

    /// Skips detections below `min_confidence` before the first-match rule.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn select(&self, detections: &[Detection]) -> TargetObservation {
        let target = detections
            .iter()
            .filter(|d| d.confidence >= self.min_confidence)
            .find(|d| d.label == self.label)
            .map(|d| d.bbox);
        TargetObservation { target }
    }
}

impl Default for TargetSelector {
    fn default() -> Self {
        Self::new(TARGET_LABEL)
    }
}
