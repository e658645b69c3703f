use std::collections::VecDeque;

/// Sliding-window mean over the most recent motion magnitudes.
///
/// Samples are kept oldest first. `len() <= capacity()` holds after every
/// call; shrinking the capacity evicts the oldest samples immediately.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingFilter {
    samples: VecDeque<f64>,
    max_count: usize,
}

impl SmoothingFilter {
    /// `max_count` is clamped to at least 1.
    pub fn new(max_count: usize) -> Self {
        let max_count = max_count.max(1);
        Self {
            samples: VecDeque::new(),
            max_count,
        }
    }

    pub fn append(&mut self, value: f64) {
        self.samples.push_back(value);
        self.evict();
    }

    /// Sets the window size (clamped to at least 1) and trims to fit.
    pub fn set_capacity(&mut self, max_count: usize) {
        self.max_count = max_count.max(1);
        self.evict();
    }

    /// Arithmetic mean of the window, 0 when empty.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn capacity(&self) -> usize {
        self.max_count
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn evict(&mut self) {
        while self.samples.len() > self.max_count {
            self.samples.pop_front();
        }
    }
}

impl Default for SmoothingFilter {
    fn default() -> Self {
        Self::new(1)
    }
}
