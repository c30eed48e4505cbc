use image::GrayImage;

use crate::{error::Result, traits::ImagePreprocessor};

/// Sigma matching the fixed 5x5 smoothing kernel with automatic sigma
/// selection used by the original pipeline.
pub const FIVE_BY_FIVE_SIGMA: f32 = 1.1;

/// Gaussian blur preprocessor for noise suppression before edge detection
#[derive(Debug, Clone)]
pub struct GaussianBlurPreprocessor {
    pub sigma: f32,
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        Self {
            sigma: FIVE_BY_FIVE_SIGMA,
        }
    }
}

impl ImagePreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        // gaussian_blur_f32 panics on non-positive sigma
        let sigma = self.sigma.max(f32::EPSILON);
        Ok(imageproc::filter::gaussian_blur_f32(image, sigma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_preserves_dimensions() {
        let img = GrayImage::new(16, 9);
        let blurred = GaussianBlurPreprocessor::default()
            .preprocess(&img)
            .unwrap();
        assert_eq!((blurred.width(), blurred.height()), (16, 9));
    }

    #[test]
    fn zero_sigma_does_not_panic() {
        let img = GrayImage::new(8, 8);
        let pre = GaussianBlurPreprocessor { sigma: 0.0 };
        assert!(pre.preprocess(&img).is_ok());
    }
}
