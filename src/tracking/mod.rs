// src/tracking/mod.rs

//! Tracking-Daten: Rohdaten, Konfiguration und validierte Frames.

pub mod clock;
pub mod config;
pub mod error;
pub mod frame;
pub mod types;

pub use clock::{ClockDirection, ClockNormalization};
pub use config::{AnalysisConfig, MarkingDirection};
pub use error::{TrackingError, TrackingResult};
pub use frame::{Frame, FrameSet};
pub use types::{PlayerId, PlayerPosition, Side, TeamId, TimedPosition, TrackingRecord};
