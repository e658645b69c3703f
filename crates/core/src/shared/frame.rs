use ndarray::ArrayView3;

/// A captured camera frame: contiguous pixel bytes in row-major order plus
/// the capture timestamp in seconds.
///
/// The core never looks at pixel data; detectors may borrow it through
/// [`Frame::as_ndarray`].
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
    timestamp: f64,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        index: usize,
        timestamp: f64,
    ) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
            timestamp,
        }
    }

    /// Zero-filled frame, used by synthetic capture sources.
    pub fn blank(width: u32, height: u32, channels: u8, index: usize, timestamp: f64) -> Self {
        let len = (width as usize) * (height as usize) * (channels as usize);
        Self::new(vec![0u8; len], width, height, channels, index, timestamp)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Capture time in seconds.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Returns `None` if the buffer does not match the frame dimensions.
    pub fn as_ndarray(&self) -> Option<ArrayView3<'_, u8>> {
        ArrayView3::from_shape(self.shape(), &self.data).ok()
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5, 0.25);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_relative_eq!(frame.timestamp(), 0.25);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_blank_has_matching_length() {
        let frame = Frame::blank(4, 3, 3, 0, 0.0);
        assert_eq!(frame.data().len(), 36);
        assert!(frame.data().iter().all(|&b| b == 0));
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0, 0.0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::blank(4, 2, 3, 0, 0.0);
        let arr = frame.as_ndarray().unwrap();
        assert_eq!(arr.shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        let mut data = vec![0u8; 12];
        data[6] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 2, 2, 3, 0, 0.0);
        let arr = frame.as_ndarray().unwrap();
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }
}
