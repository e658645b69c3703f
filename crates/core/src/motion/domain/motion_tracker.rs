use crate::detection::domain::target_selector::TargetObservation;
use crate::motion::domain::magnitude::{is_centered, motion_magnitude, window_capacity};
use crate::motion::domain::motion_config::MotionConfig;
use crate::motion::domain::smoothing_filter::SmoothingFilter;
use crate::shared::bounding_box::BoundingBox;

/// Classification emitted for every frame that contains the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionUpdate {
    pub bbox: BoundingBox,
    pub moving: bool,
}

/// Everything the tracker remembers between updates.
///
/// The last location and its timestamp are stored as one pair so they are
/// always set or unset together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackerState {
    last_sighting: Option<(BoundingBox, f64)>,
    filter: SmoothingFilter,
}

impl TrackerState {
    pub fn last_location(&self) -> Option<&BoundingBox> {
        self.last_sighting.as_ref().map(|(bbox, _)| bbox)
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_sighting.map(|(_, ts)| ts)
    }

    pub fn filter(&self) -> &SmoothingFilter {
        &self.filter
    }
}

/// Turns successive target sightings into a debounced moving/settled flag.
///
/// Each sighting is compared only with the one before it. The per-second
/// motion magnitude goes through a sliding window sized to roughly
/// `window_seconds` of history; the target is settled when the windowed mean
/// is below `stillness_threshold` and it sits inside the horizontal center
/// band.
///
/// Not internally synchronized: a single consumer must drive `update`.
#[derive(Debug, Default)]
pub struct MotionTracker {
    config: MotionConfig,
    state: TrackerState,
    last_moving: Option<bool>,
}

impl MotionTracker {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            state: TrackerState::default(),
            last_moving: None,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Forgets all history; the next sighting is treated as the first.
    pub fn reset(&mut self) {
        self.state = TrackerState::default();
        self.last_moving = None;
    }

    /// Feeds one inference result taken at `now` seconds.
    ///
    /// Returns `None` when the target is absent, leaving state untouched.
    pub fn update(&mut self, observation: &TargetObservation, now: f64) -> Option<MotionUpdate> {
        let bbox = observation.target?;

        let moving = match self.state.last_sighting {
            None => true,
            Some((previous, last_ts)) => {
                let elapsed = now - last_ts;
                if !elapsed.is_finite() || elapsed <= 0.0 {
                    log::debug!(
                        "Non-increasing timestamp ({last_ts:.3}s -> {now:.3}s), treating target as moving"
                    );
                    true
                } else {
                    !self.is_settled(&bbox, &previous, elapsed)
                }
            }
        };

        self.state.last_sighting = Some((bbox, now));

        if self.last_moving != Some(moving) {
            log::debug!(
                "Target {} at t={now:.3}s (mid_x={:.3})",
                if moving { "moving" } else { "settled" },
                bbox.mid_x()
            );
            self.last_moving = Some(moving);
        }

        Some(MotionUpdate { bbox, moving })
    }

    fn is_settled(&mut self, current: &BoundingBox, previous: &BoundingBox, elapsed: f64) -> bool {
        let magnitude = motion_magnitude(current, previous, elapsed, &self.config);
        self.state.filter.append(magnitude);
        self.state
            .filter
            .set_capacity(window_capacity(elapsed, self.config.window_seconds));

        let average = self.state.filter.average();
        let not_moving = average < self.config.stillness_threshold;
        let centered = is_centered(current, &self.config);

        log::trace!(
            "magnitude={magnitude:.4} average={average:.4} window={}/{} centered={centered}",
            self.state.filter.len(),
            self.state.filter.capacity()
        );

        not_moving && centered
    }
}
