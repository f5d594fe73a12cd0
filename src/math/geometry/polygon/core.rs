// src/math/geometry/polygon/core.rs

use crate::math::{error::*, types::*};
use serde::{Deserialize, Serialize};

/// Polygon-Struktur, die eine Sequenz von 2D-Punkten (Vertices) darstellt.
///
/// Der erste Vertex wird am Ende nicht wiederholt; die Kante vom letzten zum
/// ersten Vertex ist implizit. Ein gültiges Polygon hat mindestens 3 Vertices.
/// Das leere Polygon existiert nur als Füllwert für Regionen ohne endliche
/// Vertices (siehe [`crate::math::voronoi::OpenRegionPolicy`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point2D>,
}

impl Polygon {
    /// Erstellt ein Polygon mit mindestens 3 Vertices
    pub fn new(vertices: Vec<Point2D>) -> MathResult<Self> {
        if vertices.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    /// Das leere Polygon (keine Vertices)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zugriff auf Vertices
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Anzahl der Vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Ist das Polygon leer?
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Konvertiert in ein `geo::Polygon` (ohne Löcher)
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: Vec<geo::Coord<f64>> = self.vertices.iter().map(|&v| v.into()).collect();
        geo::Polygon::new(geo::LineString::from(exterior), Vec::new())
    }
}
