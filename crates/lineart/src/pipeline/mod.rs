pub mod builder;

use image::DynamicImage;
use tracing::debug;

use crate::{
    config::LineartConfig,
    error::Result,
    traits::{ContourExtractor, EdgeDetector, ImagePreprocessor, StrokeSimplifier},
    types::{Contour, EdgeMask},
};

/// Capture-to-strokes processing pipeline.
///
/// Stages run in a fixed order: preprocess (grayscale is implicit), detect
/// edges, optionally invert for display, decompose into contours, thin each
/// contour. The intermediate [`EdgeMask`] is exposed so callers can preview
/// the line art and re-decompose it later without re-running detection.
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    detector: Box<dyn EdgeDetector>,
    invert: bool,
    extractor: Box<dyn ContourExtractor>,
    simplifier: Box<dyn StrokeSimplifier>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub(crate) fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        detector: Box<dyn EdgeDetector>,
        invert: bool,
        extractor: Box<dyn ContourExtractor>,
        simplifier: Box<dyn StrokeSimplifier>,
    ) -> Self {
        Self {
            preprocessors,
            detector,
            invert,
            extractor,
            simplifier,
        }
    }

    /// Standard pipeline for the given detection parameters: gaussian blur,
    /// canny, polarity per `config.invert`, border following, stride 1.
    pub fn from_config(config: &LineartConfig) -> Self {
        Self::builder()
            .add_preprocessor(crate::algorithms::GaussianBlurPreprocessor::default())
            .set_detector(crate::algorithms::CannyEdgeDetector {
                threshold_low: config.threshold_low,
                threshold_high: config.threshold_high,
            })
            .invert(config.invert)
            .build()
    }

    /// Turn a captured image into binary line art.
    pub fn render(&self, capture: &DynamicImage) -> Result<EdgeMask> {
        let mut gray = capture.to_luma8();
        for preprocessor in &self.preprocessors {
            gray = preprocessor.preprocess(&gray)?;
        }
        let mut edges = self.detector.detect(&gray)?;
        if self.invert {
            image::imageops::invert(&mut edges);
        }
        Ok(EdgeMask::new(edges, self.invert))
    }

    /// Decompose line art into an ordered, flat list of contours.
    ///
    /// An empty result is valid: it means the mask holds nothing drawable.
    pub fn decompose(&self, mask: &EdgeMask) -> Result<Vec<Contour>> {
        let contours = self.extractor.extract(mask)?;
        debug!(count = contours.len(), "decomposed line art");
        Ok(contours)
    }

    /// Thin each contour with the configured simplifier.
    pub fn simplify(&self, contours: &[Contour]) -> Vec<Contour> {
        contours.iter().map(|c| self.simplifier.simplify(c)).collect()
    }

    /// Full pass: capture in, line art and simplified contours out.
    pub fn process(&self, capture: &DynamicImage) -> Result<(EdgeMask, Vec<Contour>)> {
        let mask = self.render(capture)?;
        let contours = self.decompose(&mask)?;
        let simplified = self.simplify(&contours);
        Ok((mask, simplified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn square_capture() -> DynamicImage {
        let mut img = RgbImage::from_pixel(40, 40, Rgb([10, 10, 10]));
        for y in 10..30 {
            for x in 10..30 {
                img.put_pixel(x, y, Rgb([240, 240, 240]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    fn solid_capture() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([90, 90, 90])))
    }

    #[test]
    fn solid_capture_yields_blank_mask_and_no_contours() {
        let pipeline = Pipeline::from_config(&LineartConfig::default());
        let (mask, contours) = pipeline.process(&solid_capture()).unwrap();
        assert!(mask.is_blank());
        assert!(contours.is_empty());
    }

    #[test]
    fn square_capture_yields_contours() {
        let pipeline = Pipeline::from_config(&LineartConfig::default());
        let (mask, contours) = pipeline.process(&square_capture()).unwrap();
        assert!(!mask.is_blank());
        assert!(!contours.is_empty());
    }

    #[test]
    fn inversion_flips_the_mask_but_not_the_geometry() {
        let capture = square_capture();
        let normal = Pipeline::from_config(&LineartConfig::default());
        let inverted = Pipeline::from_config(&LineartConfig {
            invert: true,
            ..LineartConfig::default()
        });

        let mask_a = normal.render(&capture).unwrap();
        let mask_b = inverted.render(&capture).unwrap();

        // polarity-flipped raster, same stroke pixels
        assert_ne!(mask_a.as_image(), mask_b.as_image());
        for (pa, pb) in mask_a.as_image().pixels().zip(mask_b.as_image().pixels()) {
            assert_eq!(pa.0[0], 255 - pb.0[0]);
        }

        // decomposition compensates for polarity
        let contours_a = normal.decompose(&mask_a).unwrap();
        let contours_b = inverted.decompose(&mask_b).unwrap();
        assert_eq!(contours_a, contours_b);
    }

    #[test]
    fn rendered_mask_is_two_valued() {
        let pipeline = Pipeline::from_config(&LineartConfig::default());
        let mask = pipeline.render(&square_capture()).unwrap();
        assert!(mask
            .as_image()
            .pixels()
            .all(|p| p.0[0] == 0 || p.0[0] == 255));
    }
}
