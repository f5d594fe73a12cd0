use super::Point2D;
use serde::{Deserialize, Serialize};

/// Liniensegment zwischen zwei Punkten, z.B. ein geclippter unendlicher
/// Voronoi-Grat oder eine Marking-Linie.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }
}
