// src/math/voronoi/mod.rs

pub mod diagram; // VoronoiDiagram, VertexRef und die Berechnung aus Sites
pub mod extractor; // Polygone und unendliche Grate aus einem Diagramm

pub use self::diagram::{VertexRef, VoronoiDiagram};
pub use self::extractor::{
    OpenRegionPolicy, VoronoiBoundaries, VoronoiExtractor, extract_voronoi_boundaries,
    extract_voronoi_boundaries_with,
};
