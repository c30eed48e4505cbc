use crate::{
    error::Result,
    traits::ContourExtractor,
    types::{Contour, EdgeMask, Point},
};

/// Border-following contour extractor backed by
/// `imageproc::contours::find_contours` (Suzuki-Abe).
///
/// Retrieval is flat: outer borders and hole borders are returned as one
/// ordered list, hierarchy discarded. Straight runs are compressed to their
/// endpoints, equivalent to simple polygonal chain approximation.
#[derive(Debug, Clone, Default)]
pub struct BorderFollowingExtractor;

impl ContourExtractor for BorderFollowingExtractor {
    fn extract(&self, mask: &EdgeMask) -> Result<Vec<Contour>> {
        // Border following expects bright strokes on a dark background. An
        // inverted mask (dark strokes) is flipped back before the search.
        let mut binary = mask.as_image().clone();
        if mask.inverted() {
            image::imageops::invert(&mut binary);
        }

        let found = imageproc::contours::find_contours::<i32>(&binary);
        Ok(found
            .into_iter()
            .map(|c| Contour::new(compress_collinear(&c.points)))
            .collect())
    }
}

/// Drop interior points of straight runs, keeping only direction changes.
///
/// The input is treated as a closed border (the tracer's last point is
/// adjacent to its first), so a clean axis-aligned rectangle compresses to
/// exactly its four corners.
fn compress_collinear(points: &[imageproc::point::Point<i32>]) -> Vec<Point> {
    let n = points.len();
    if n <= 2 {
        return points.iter().map(|p| [p.x, p.y]).collect();
    }

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let d1 = (cur.x - prev.x, cur.y - prev.y);
        let d2 = (next.x - cur.x, next.y - cur.y);
        let cross = d1.0 * d2.1 - d1.1 * d2.0;
        let dot = d1.0 * d2.0 + d1.1 * d2.1;
        // keep turns and reversals, drop straight-run interiors
        if cross != 0 || dot <= 0 {
            out.push([cur.x, cur.y]);
        }
    }

    if out.len() < 2 {
        // degenerate loop; fall back to the raw endpoints
        return vec![
            [points[0].x, points[0].y],
            [points[n - 1].x, points[n - 1].y],
        ];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn filled_rect_mask(inverted: bool) -> EdgeMask {
        let mut img = GrayImage::new(20, 20);
        for y in 5..15 {
            for x in 4..16 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        if inverted {
            image::imageops::invert(&mut img);
        }
        EdgeMask::new(img, inverted)
    }

    #[test]
    fn blank_mask_yields_zero_contours() {
        let mask = EdgeMask::new(GrayImage::new(10, 10), false);
        let contours = BorderFollowingExtractor.extract(&mask).unwrap();
        assert!(contours.is_empty());
    }

    #[test]
    fn filled_rectangle_compresses_to_four_corners() {
        let contours = BorderFollowingExtractor
            .extract(&filled_rect_mask(false))
            .unwrap();
        assert_eq!(contours.len(), 1);
        let points = &contours[0].points;
        assert_eq!(points.len(), 4);
        for corner in [[4, 5], [15, 5], [15, 14], [4, 14]] {
            assert!(points.contains(&corner), "missing corner {corner:?}");
        }
    }

    #[test]
    fn inverted_mask_recovers_the_same_geometry() {
        let normal = BorderFollowingExtractor
            .extract(&filled_rect_mask(false))
            .unwrap();
        let inverted = BorderFollowingExtractor
            .extract(&filled_rect_mask(true))
            .unwrap();
        assert_eq!(normal, inverted);
    }

    #[test]
    fn straight_line_keeps_only_its_endpoints() {
        let mut img = GrayImage::new(12, 5);
        for x in 2..10 {
            img.put_pixel(x, 2, Luma([255]));
        }
        let contours = BorderFollowingExtractor
            .extract(&EdgeMask::new(img, false))
            .unwrap();
        assert_eq!(contours.len(), 1);
        let points = &contours[0].points;
        assert!(points.len() <= 3, "line not compressed: {points:?}");
        assert!(points.contains(&[2, 2]));
        assert!(points.contains(&[9, 2]));
    }
}
