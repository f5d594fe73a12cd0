pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;
pub mod voronoi;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{MathError, MathResult},
        geometry::{Polygon, team_hull},
        types::*,
        voronoi::{
            OpenRegionPolicy, VertexRef, VoronoiBoundaries, VoronoiDiagram,
            extract_voronoi_boundaries, extract_voronoi_boundaries_with,
        },
    };
}
