use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate relative to the mask origin.
pub type Point = [i32; 2];

/// Cut value used to force a raster back to two levels before contour search.
pub const BINARY_CUTOFF: u8 = 127;

/// Binary line-art raster derived from a capture.
///
/// Every sample is either 0 or 255. `inverted` records the display polarity:
/// `false` means bright strokes on a dark background (the detector's native
/// output), `true` means dark strokes on a bright background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    image: GrayImage,
    inverted: bool,
}

impl EdgeMask {
    /// Wrap a raster as an edge mask, forcing it to two levels.
    ///
    /// The detector output is already binary in practice; thresholding here
    /// guards against callers handing in an arbitrary grayscale image.
    pub fn new(image: GrayImage, inverted: bool) -> Self {
        let image = imageproc::contrast::threshold(&image, BINARY_CUTOFF);
        Self { image, inverted }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Display polarity requested when the mask was rendered.
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    /// Consume the mask, yielding a displayable bitmap for preview rendering.
    pub fn into_image(self) -> GrayImage {
        self.image
    }

    /// The sample value that marks a drawable stroke pixel.
    pub fn stroke_value(&self) -> u8 {
        if self.inverted {
            0
        } else {
            255
        }
    }

    /// True when the mask holds no stroke pixels at all.
    pub fn is_blank(&self) -> bool {
        let stroke = self.stroke_value();
        !self.image.pixels().any(|p| p.0[0] == stroke)
    }
}

/// Ordered point path traced along one connected edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box as (min, max), or `None` for an empty path.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        let mut min = first;
        let mut max = first;
        for &[x, y] in &self.points {
            min = [min[0].min(x), min[1].min(y)];
            max = [max[0].max(x), max[1].max(y)];
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn mask_is_forced_to_two_levels() {
        let mut img = GrayImage::new(4, 4);
        img.put_pixel(0, 0, Luma([13]));
        img.put_pixel(1, 0, Luma([128]));
        img.put_pixel(2, 0, Luma([200]));
        let mask = EdgeMask::new(img, false);
        assert!(mask.as_image().pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn blank_detection_respects_polarity() {
        let dark = GrayImage::new(4, 4);
        assert!(EdgeMask::new(dark.clone(), false).is_blank());
        // all-dark is all-stroke under inverted polarity
        assert!(!EdgeMask::new(dark, true).is_blank());
    }

    #[test]
    fn bounding_box_spans_all_points() {
        let contour = Contour::new(vec![[3, 1], [0, 5], [2, 2]]);
        assert_eq!(contour.bounding_box(), Some(([0, 1], [3, 5])));
        assert_eq!(Contour::new(vec![]).bounding_box(), None);
    }
}
