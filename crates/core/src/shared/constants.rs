/// Detector label of the class the tracker follows.
pub const TARGET_LABEL: &str = "person";

/// Wall-clock span the smoothing window tries to cover, in seconds.
pub const SMOOTHING_WINDOW_SECONDS: f64 = 1.5;

/// Smoothed per-second magnitude below which the target counts as still.
pub const STILLNESS_THRESHOLD: f64 = 0.1;

/// Exclusive horizontal band (normalized `mid_x`) considered centered.
pub const CENTER_BAND: (f64, f64) = (0.35, 0.65);

/// Weight applied to horizontal position and width changes.
pub const HORIZONTAL_WEIGHT: f64 = 2.0;

/// Weight applied to vertical position and height changes.
pub const VERTICAL_WEIGHT: f64 = 1.0;

/// Nominal camera rate.
pub const DEFAULT_FPS: f64 = 30.0;
