// src/math/types/bounds.rs

use crate::math::types::Point2D;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds2D {
    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut min = first_point;
        let mut max = first_point;

        for point in points_iter {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        Some(Self { min, max })
    }

    /// Breite der Bounding Box
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Höhe der Bounding Box
    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Ausdehnung pro Achse (peak-to-peak der umschlossenen Punktwolke)
    pub fn size(&self) -> Point2D {
        Point2D::new(self.width(), self.height())
    }

    /// Größte Ausdehnung über beide Achsen
    pub fn max_extent(&self) -> f64 {
        let size = self.size();
        size.x.max(size.y)
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds2D({} to {})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_iter_spread() {
        let bounds = Bounds2D::from_points_iter([
            Point2D::new(1.0, 5.0),
            Point2D::new(-3.0, 2.0),
            Point2D::new(4.0, 3.0),
        ])
        .unwrap();

        assert_eq!(bounds.size(), Point2D::new(7.0, 3.0));
        assert_eq!(bounds.max_extent(), 7.0);
        assert_eq!(bounds.to_string(), "Bounds2D((-3, 2) to (4, 5))");
        assert!(Bounds2D::from_points_iter(std::iter::empty()).is_none());
    }
}
