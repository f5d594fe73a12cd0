use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use spade::Point2;
use std::fmt;

/// 2D-Punkt in Spielfeldkoordinaten.
///
/// Gleichheit ist exakte Gleichheit der Koordinaten (ohne Toleranz), das ist
/// die Grundlage für die Duplikat-Entfernung von Polygonen und Segmenten.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared_to(&self, other: Point2D) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    /// Euklidischer Abstand
    pub fn distance_to(&self, other: Point2D) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn from_vector(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// Conversion traits
impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self::from_vector(v)
    }
}

impl From<Point2D> for Vector2<f64> {
    fn from(p: Point2D) -> Self {
        p.to_vector()
    }
}

impl From<Point2<f64>> for Point2D {
    fn from(p: Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point2D> for Point2<f64> {
    fn from(p: Point2D) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<Point2D> for geo::Coord<f64> {
    fn from(p: Point2D) -> Self {
        geo::Coord { x: p.x, y: p.y }
    }
}

impl From<Point2D> for geo::Point<f64> {
    fn from(p: Point2D) -> Self {
        geo::Point::new(p.x, p.y)
    }
}
