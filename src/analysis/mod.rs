// src/analysis/mod.rs
pub mod assignment;
pub mod marking;
pub mod movement;
pub mod session;

pub use assignment::{Assignment, assign_nearest, pairwise_distances};
pub use marking::{MarkingStat, aggregate_marking};
pub use movement::{AverageSpeed, MovementMetrics, PlayerMovement, movement_metrics, team_movement};
pub use session::{MarkingReport, MatchAnalysis, TeamHulls};
