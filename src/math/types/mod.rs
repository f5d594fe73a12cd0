// src/math/types/mod.rs
pub mod bounds;
pub mod point;
pub mod segment;

pub use bounds::*;
pub use point::*;
pub use segment::*;

// Re-export häufig verwendete externe Typen
pub use spade::Point2;

pub type SpadePoint = Point2<f64>;
