use image::GrayImage;

use crate::{
    error::Result,
    types::{Contour, EdgeMask},
};

/// Trait for image preprocessing algorithms applied before edge detection
pub trait ImagePreprocessor: Send + Sync {
    /// Preprocess the input image (e.g., blur, threshold)
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for edge detection algorithms
pub trait EdgeDetector: Send + Sync {
    /// Produce a bright-on-dark edge raster from a grayscale image
    fn detect(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract an ordered, flat list of contours from a binary mask
    fn extract(&self, mask: &EdgeMask) -> Result<Vec<Contour>>;
}

/// Trait for stroke simplification algorithms
pub trait StrokeSimplifier: Send + Sync {
    /// Thin a contour's point sequence to bound stroke density
    fn simplify(&self, contour: &Contour) -> Contour;
}
