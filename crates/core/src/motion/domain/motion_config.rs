use thiserror::Error;

use crate::shared::constants::{
    CENTER_BAND, HORIZONTAL_WEIGHT, SMOOTHING_WINDOW_SECONDS, STILLNESS_THRESHOLD,
    VERTICAL_WEIGHT,
};

#[derive(Debug, Error, PartialEq)]
pub enum MotionConfigError {
    #[error("window_seconds must be positive, got {0}")]
    WindowSeconds(f64),
    #[error("stillness_threshold must be non-negative, got {0}")]
    StillnessThreshold(f64),
    #[error("center band must satisfy 0 <= low < high <= 1, got ({0}, {1})")]
    CenterBand(f64, f64),
    #[error("weights must be non-negative, got horizontal={0} vertical={1}")]
    Weights(f64, f64),
}

/// Tuning knobs of the motion classifier.
///
/// Defaults are the empirically fixed values from [`crate::shared::constants`].
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub window_seconds: f64,
    pub stillness_threshold: f64,
    /// Exclusive `(low, high)` bounds on `mid_x`.
    pub center_band: (f64, f64),
    pub horizontal_weight: f64,
    pub vertical_weight: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            window_seconds: SMOOTHING_WINDOW_SECONDS,
            stillness_threshold: STILLNESS_THRESHOLD,
            center_band: CENTER_BAND,
            horizontal_weight: HORIZONTAL_WEIGHT,
            vertical_weight: VERTICAL_WEIGHT,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), MotionConfigError> {
        if !self.window_seconds.is_finite() || self.window_seconds <= 0.0 {
            return Err(MotionConfigError::WindowSeconds(self.window_seconds));
        }
        if self.stillness_threshold.is_nan() || self.stillness_threshold < 0.0 {
            return Err(MotionConfigError::StillnessThreshold(
                self.stillness_threshold,
            ));
        }
        let (low, high) = self.center_band;
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low >= high {
            return Err(MotionConfigError::CenterBand(low, high));
        }
        let weights_valid = [self.horizontal_weight, self.vertical_weight]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        if !weights_valid {
            return Err(MotionConfigError::Weights(
                self.horizontal_weight,
                self.vertical_weight,
            ));
        }
        Ok(())
    }
}
