use image::GrayImage;

use crate::{error::Result, traits::EdgeDetector};

/// Canny edge detector producing bright edges on a dark background
#[derive(Debug, Clone)]
pub struct CannyEdgeDetector {
    pub threshold_low: f32,
    pub threshold_high: f32,
}

impl Default for CannyEdgeDetector {
    fn default() -> Self {
        Self {
            threshold_low: 50.0,
            threshold_high: 150.0,
        }
    }
}

impl EdgeDetector for CannyEdgeDetector {
    fn detect(&self, image: &GrayImage) -> Result<GrayImage> {
        // Out-of-order thresholds are accepted from the sliders; canny itself
        // requires low <= high, so order them here instead of rejecting.
        let low = self.threshold_low.min(self.threshold_high);
        let high = self.threshold_low.max(self.threshold_high);
        Ok(imageproc::edges::canny(image, low, high))
    }
}
