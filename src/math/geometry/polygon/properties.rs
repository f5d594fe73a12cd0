// src/math/geometry/polygon/properties.rs

use crate::math::geometry::polygon::core::Polygon; // Zugriff auf die Polygon-Struktur
use crate::math::types::Point2D;
use geo::{Area, Contains};

/// Trait für geometrische Eigenschaften von Polygonen.
pub trait PolygonProperties {
    /// Fläche des Polygons (immer nicht-negativ).
    fn area(&self) -> f64;

    /// Prüft, ob ein Punkt strikt innerhalb des Polygons liegt.
    /// Punkte auf dem Rand zählen nicht als enthalten.
    fn contains_point(&self, point: Point2D) -> bool;

    /// Orientierung anhand des Vorzeichens der Fläche.
    fn orientation(&self) -> Orientation;
}

/// Gibt die Orientierung eines Polygons an.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear, // Alle Punkte liegen auf einer Linie
}

impl PolygonProperties for Polygon {
    fn area(&self) -> f64 {
        if self.len() < 3 {
            return 0.0;
        }
        self.to_geo().unsigned_area()
    }

    fn contains_point(&self, point: Point2D) -> bool {
        if self.len() < 3 {
            return false;
        }
        self.to_geo().contains(&geo::Point::from(point))
    }

    fn orientation(&self) -> Orientation {
        if self.len() < 3 {
            return Orientation::Collinear;
        }
        let signed = self.to_geo().signed_area();
        if signed > 0.0 {
            Orientation::CounterClockwise
        } else if signed < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
}
