// src/math/geometry/convex_hull.rs

//! # Convex Hull
//!
//! Convex hull of a team's positions at one frame (the "team shape"),
//! computed with Andrew's Monotone Chain. Hull vertices are returned in
//! counter-clockwise (CCW) order without repeating the first vertex.

use crate::math::{
    error::{MathError, MathResult},
    geometry::polygon::Polygon,
    types::Point2D,
    utils::{constants, simple_geometry::cross},
};

/// Computes the convex hull of a set of 2D points.
pub struct ConvexHullComputer {
    /// Whether to include collinear points that lie on the boundary of the hull.
    include_collinear_points: bool,
    /// Tolerance for floating-point comparisons, e.g., for determining collinearity.
    tolerance: f64,
}

impl Default for ConvexHullComputer {
    /// Default values:
    /// - `include_collinear_points`: `false`
    /// - `tolerance`: `constants::EPSILON`
    fn default() -> Self {
        Self {
            include_collinear_points: false,
            tolerance: constants::EPSILON,
        }
    }
}

impl ConvexHullComputer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether to include collinear points on the hull's boundary.
    pub fn include_collinear(mut self, include: bool) -> Self {
        self.include_collinear_points = include;
        self
    }

    /// Sets the tolerance for floating-point comparisons. Must be non-negative.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Computes the hull vertices of `input_points` in CCW order.
    ///
    /// Duplicate points (within tolerance) are removed first. Returns
    /// `InsufficientPoints` if fewer than 3 hull vertices remain, which also
    /// covers the case of all points being collinear.
    pub fn compute_hull_points(&self, input_points: &[Point2D]) -> MathResult<Vec<Point2D>> {
        if let Some(bad) = input_points.iter().find(|p| !p.is_finite()) {
            return Err(MathError::InvalidInput {
                message: format!("non-finite hull input point {}", bad),
            });
        }

        let mut points = input_points.to_vec();
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
        points.dedup_by(|a, b| a.distance_squared_to(*b) <= self.tolerance * self.tolerance);

        if points.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: points.len(),
            });
        }

        let hull = self.andrew_monotone(&points);
        if hull.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: hull.len(),
            });
        }
        Ok(hull)
    }

    /// `points` must be sorted lexicographically (by x, then y).
    fn andrew_monotone(&self, points: &[Point2D]) -> Vec<Point2D> {
        let n = points.len();
        let mut hull: Vec<Point2D> = Vec::with_capacity(2 * n);

        // Lower hull
        for &p in points {
            while hull.len() >= 2 && self.should_pop(hull[hull.len() - 2], hull[hull.len() - 1], p)
            {
                hull.pop();
            }
            hull.push(p);
        }

        // Upper hull, without the last point of the lower hull
        let t = hull.len() + 1;
        for &p in points.iter().rev().skip(1) {
            while hull.len() >= t && self.should_pop(hull[hull.len() - 2], hull[hull.len() - 1], p)
            {
                hull.pop();
            }
            hull.push(p);
        }

        // Last pushed point is points[0] again
        hull.pop();
        hull
    }

    /// Pop if (o, a, b) is not a left turn.
    fn should_pop(&self, o: Point2D, a: Point2D, b: Point2D) -> bool {
        let turn = cross(o, a, b);
        turn < -self.tolerance || (!self.include_collinear_points && turn.abs() <= self.tolerance)
    }
}

/// Convex hull of one team's positions as a CCW polygon.
pub fn team_hull(points: &[Point2D]) -> MathResult<Polygon> {
    let hull = ConvexHullComputer::default().compute_hull_points(points)?;
    Polygon::new(hull)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::{Orientation, PolygonProperties};
    use approx::assert_relative_eq;

    #[test]
    fn test_hull_of_square_with_interior_point() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(0.5, 0.5), // Interior point
        ];

        let hull = team_hull(&points).unwrap();
        assert_eq!(hull.len(), 4);
        assert!(!hull.vertices().contains(&Point2D::new(0.5, 0.5)));
        assert_eq!(hull.orientation(), Orientation::CounterClockwise);
        assert_relative_eq!(hull.area(), 1.0);
    }

    #[test]
    fn test_collinear_points_handling() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(1.0, 2.0),
        ];
        let hull = ConvexHullComputer::new().compute_hull_points(&points).unwrap();
        assert_eq!(hull.len(), 3);

        let with_collinear = ConvexHullComputer::new()
            .include_collinear(true)
            .compute_hull_points(&points)
            .unwrap();
        assert_eq!(with_collinear.len(), 4);
    }

    #[test]
    fn test_degenerate_inputs_are_errors() {
        let line = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
        ];
        assert!(matches!(
            team_hull(&line),
            Err(MathError::InsufficientPoints { .. })
        ));

        let duplicates = vec![Point2D::new(1.0, 1.0); 5];
        assert_eq!(
            team_hull(&duplicates),
            Err(MathError::InsufficientPoints {
                expected: 3,
                actual: 1
            })
        );
    }
}
