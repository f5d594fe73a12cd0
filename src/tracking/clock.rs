// src/tracking/clock.rs

use serde::{Deserialize, Serialize};

/// Laufrichtung der Spieluhr in den Rohdaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockDirection {
    /// Uhr läuft hoch (z.B. Fußball, 0 bis 90 Minuten)
    #[default]
    Ascending,
    /// Uhr läuft herunter (z.B. Basketball, 12 bis 0 Minuten)
    Countdown,
}

/// Abbildung der Rohzeit auf die kanonische, immer aufsteigende Zeitachse.
///
/// `Ascending` übernimmt die Rohzeit unverändert. `Countdown` bildet die Rohzeit
/// `t` auf die verstrichene Zeit `raw_max - t` ab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockNormalization {
    pub direction: ClockDirection,
    /// Größte Rohzeit der Session
    pub raw_max: f64,
}

impl ClockNormalization {
    pub fn new(direction: ClockDirection, raw_max: f64) -> Self {
        Self { direction, raw_max }
    }

    pub fn to_canonical(&self, raw: f64) -> f64 {
        match self.direction {
            ClockDirection::Ascending => raw,
            ClockDirection::Countdown => self.raw_max - raw,
        }
    }

    /// Kanonische Zeit zurück auf die Anzeige der Spieluhr
    pub fn to_display(&self, canonical: f64) -> f64 {
        match self.direction {
            ClockDirection::Ascending => canonical,
            ClockDirection::Countdown => self.raw_max - canonical,
        }
    }
}
