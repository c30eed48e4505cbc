use geo_types::{Coord, LineString};

use crate::{
    traits::StrokeSimplifier,
    types::{Contour, Point},
};

/// Fixed-stride point decimation (the "pixel skip" control).
///
/// Keeps points at indices 0, s, 2s, ... with no wraparound duplication of
/// the last point. Strides below 1 behave exactly like a stride of 1.
#[derive(Debug, Clone)]
pub struct StrideSimplifier {
    pub stride: i32,
}

impl Default for StrideSimplifier {
    fn default() -> Self {
        Self { stride: 1 }
    }
}

impl StrokeSimplifier for StrideSimplifier {
    fn simplify(&self, contour: &Contour) -> Contour {
        let step = self.stride.max(1) as usize;
        Contour::new(contour.points.iter().step_by(step).copied().collect())
    }
}

/// Douglas-Peucker simplifier using geo crate's implementation
#[derive(Debug, Clone)]
pub struct DouglasPeuckerSimplifier {
    pub tolerance: f32,
}

impl Default for DouglasPeuckerSimplifier {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

impl StrokeSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, contour: &Contour) -> Contour {
        use geo::Simplify;

        let coords: Vec<Coord<f32>> = contour
            .points
            .iter()
            .map(|&[x, y]| Coord {
                x: x as f32,
                y: y as f32,
            })
            .collect();
        let simplified = LineString::new(coords).simplify(&self.tolerance);
        let points: Vec<Point> = simplified
            .coords()
            .map(|c| [c.x.round() as i32, c.y.round() as i32])
            .collect();
        Contour::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staircase() -> Contour {
        Contour::new((0..10).map(|i| [i, i % 2]).collect())
    }

    #[test]
    fn stride_one_is_identity() {
        let contour = staircase();
        let out = StrideSimplifier { stride: 1 }.simplify(&contour);
        assert_eq!(out, contour);
    }

    #[test]
    fn non_positive_strides_clamp_to_one() {
        let contour = staircase();
        let baseline = StrideSimplifier { stride: 1 }.simplify(&contour);
        for stride in [0, -1, -10] {
            assert_eq!(StrideSimplifier { stride }.simplify(&contour), baseline);
        }
    }

    #[test]
    fn stride_keeps_every_nth_point() {
        let contour = staircase();
        let out = StrideSimplifier { stride: 3 }.simplify(&contour);
        assert_eq!(out.points, vec![[0, 0], [3, 1], [6, 0], [9, 1]]);
    }

    #[test]
    fn douglas_peucker_collapses_collinear_runs() {
        let contour = Contour::new((0..20).map(|i| [i, 0]).collect());
        let out = DouglasPeuckerSimplifier { tolerance: 0.5 }.simplify(&contour);
        assert_eq!(out.points, vec![[0, 0], [19, 0]]);
    }
}
