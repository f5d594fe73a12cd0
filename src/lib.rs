// src/lib.rs

//! Räumliche Analysen für Tracking-Daten zweier Mannschaften:
//! Voronoi-Territorien pro Frame, Zuordnung zum nächsten Gegenspieler
//! ("Marking") und Laufmetriken pro Spieler.

pub mod analysis;
pub mod math;
pub mod tracking;

pub use analysis::{
    AverageSpeed, MarkingReport, MarkingStat, MatchAnalysis, MovementMetrics, aggregate_marking,
    assign_nearest, movement_metrics,
};
pub use math::{
    MathError, MathResult,
    voronoi::{VoronoiDiagram, extract_voronoi_boundaries},
};
pub use tracking::{AnalysisConfig, FrameSet, TrackingError, TrackingRecord, TrackingResult};
