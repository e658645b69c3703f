use crate::motion::domain::motion_config::MotionConfig;
use crate::shared::bounding_box::BoundingBox;

/// Absorbs float noise in `window / elapsed` so that e.g. a 0.1 s step
/// computed as `(0.1 + 0.2) - 0.2` still yields a 15-sample window.
const CAPACITY_EPSILON: f64 = 1e-9;

/// Per-second rate of change between two sightings of the target.
///
/// Horizontal position and width deltas carry `horizontal_weight`, vertical
/// position and height deltas carry `vertical_weight`. `elapsed` must be
/// positive.
pub fn motion_magnitude(
    current: &BoundingBox,
    previous: &BoundingBox,
    elapsed: f64,
    config: &MotionConfig,
) -> f64 {
    let dx = (current.mid_x() - previous.mid_x()).abs();
    let dy = (current.mid_y() - previous.mid_y()).abs();
    let dw = (current.width - previous.width).abs();
    let dh = (current.height - previous.height).abs();

    let raw = config.horizontal_weight * (dx + dw) + config.vertical_weight * (dy + dh);
    raw / elapsed
}

/// Strict horizontal centering test; vertical position is not checked.
pub fn is_centered(bbox: &BoundingBox, config: &MotionConfig) -> bool {
    let (low, high) = config.center_band;
    let mid_x = bbox.mid_x();
    low < mid_x && mid_x < high
}

/// Number of samples that span `window_seconds` at the current frame
/// interval. May be 0; the filter clamps.
pub fn window_capacity(elapsed: f64, window_seconds: f64) -> usize {
    // Float-to-int `as` saturates, NaN maps to 0.
    (window_seconds / elapsed + CAPACITY_EPSILON).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn centered_box(mid_x: f64, mid_y: f64, w: f64, h: f64) -> BoundingBox {
        BoundingBox::from_center(mid_x, mid_y, w, h)
    }

    #[test]
    fn test_identical_boxes_have_zero_magnitude() {
        let b = centered_box(0.5, 0.5, 0.2, 0.2);
        assert_relative_eq!(motion_magnitude(&b, &b, 0.1, &MotionConfig::default()), 0.0);
    }

    #[test]
    fn test_horizontal_shift_weighted_double() {
        let prev = centered_box(0.5, 0.5, 0.2, 0.2);
        let curr = centered_box(0.9, 0.5, 0.2, 0.2);
        // raw = 2 * 0.4 = 0.8, per second over 0.1 s = 8
        assert_relative_eq!(
            motion_magnitude(&curr, &prev, 0.1, &MotionConfig::default()),
            8.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_vertical_shift_weighted_single() {
        let prev = centered_box(0.5, 0.2, 0.2, 0.2);
        let curr = centered_box(0.5, 0.6, 0.2, 0.2);
        assert_relative_eq!(
            motion_magnitude(&curr, &prev, 1.0, &MotionConfig::default()),
            0.4,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_size_changes_weighted() {
        let prev = centered_box(0.5, 0.5, 0.2, 0.2);
        let curr = centered_box(0.5, 0.5, 0.3, 0.4);
        // 2 * 0.1 + 1 * 0.2
        assert_relative_eq!(
            motion_magnitude(&curr, &prev, 1.0, &MotionConfig::default()),
            0.4,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_magnitude_scales_with_elapsed() {
        let prev = centered_box(0.5, 0.5, 0.2, 0.2);
        let curr = centered_box(0.55, 0.5, 0.2, 0.2);
        let config = MotionConfig::default();
        let fast = motion_magnitude(&curr, &prev, 0.05, &config);
        let slow = motion_magnitude(&curr, &prev, 0.5, &config);
        assert_relative_eq!(fast, slow * 10.0, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.35, false)]
    #[case(0.65, false)]
    #[case(0.5, true)]
    #[case(0.3500001, true)]
    #[case(0.1, false)]
    #[case(0.9, false)]
    fn test_centering_band_is_strict(#[case] mid_x: f64, #[case] expected: bool) {
        let bbox = BoundingBox::new(mid_x, 0.0, 0.0, 0.1);
        assert_eq!(is_centered(&bbox, &MotionConfig::default()), expected);
    }

    #[test]
    fn test_centering_ignores_vertical_position() {
        let bbox = centered_box(0.5, 0.95, 0.1, 0.1);
        assert!(is_centered(&bbox, &MotionConfig::default()));
    }

    #[rstest]
    #[case(0.1, 15)]
    #[case(0.5, 3)]
    #[case(2.0, 0)]
    #[case(1.0 / 30.0, 45)]
    #[case(0.3 - 0.2, 15)]
    #[case((0.1 + 0.2) - 0.2, 15)]
    fn test_window_capacity(#[case] elapsed: f64, #[case] expected: usize) {
        assert_eq!(window_capacity(elapsed, 1.5), expected);
    }

    #[test]
    fn test_window_capacity_absorbs_rounding_below_integer() {
        let elapsed = (0.1 + 0.2) - 0.2;
        assert!(1.5 / elapsed < 15.0);
        assert_eq!(window_capacity(elapsed, 1.5), 15);
    }

    #[test]
    fn test_window_capacity_saturates_for_tiny_elapsed() {
        assert_eq!(window_capacity(f64::MIN_POSITIVE, 1.5), usize::MAX);
    }
}
