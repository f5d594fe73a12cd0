// src/math/geometry/mod.rs

pub mod convex_hull;
pub mod dedup;
pub mod polygon;

pub use self::convex_hull::team_hull;
pub use self::dedup::dedup_preserving_order;
pub use self::polygon::{Orientation, Polygon, PolygonProperties};
