use serde::{Deserialize, Serialize};

/// Axis-aligned box in normalized `[0, 1]` image coordinates, origin top-left.
///
/// Renderers own the transform to their drawing surface; the core never
/// works in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Builds a box from its center and size.
    pub fn from_center(mid_x: f64, mid_y: f64, width: f64, height: f64) -> Self {
        Self::new(mid_x - width / 2.0, mid_y - height / 2.0, width, height)
    }

    pub fn mid_x(&self) -> f64 {
        self.min_x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.min_y + self.height / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }
}
