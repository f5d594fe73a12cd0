// src/tracking/config.rs

use super::{
    clock::ClockDirection,
    error::{TrackingError, TrackingResult},
    types::{Side, TeamId},
};
use crate::math::voronoi::OpenRegionPolicy;
use serde::{Deserialize, Serialize};

/// Wer markiert wen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkingDirection {
    /// Angreifer sind die markierenden Spieler, Verteidiger die markierten.
    #[default]
    AttackersMark,
    /// Verteidiger sind die markierenden Spieler, Angreifer die markierten.
    DefendersMark,
}

impl MarkingDirection {
    /// Mannschaft der markierenden Spieler (Quelle der Zuordnung)
    pub fn source(self) -> Side {
        match self {
            MarkingDirection::AttackersMark => Side::Attacking,
            MarkingDirection::DefendersMark => Side::Defending,
        }
    }

    /// Mannschaft der markierten Spieler (Ziel der Zuordnung)
    pub fn target(self) -> Side {
        self.source().opponent()
    }
}

/// Konfiguration einer Analyse-Session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// ID der angreifenden Mannschaft
    pub attacking_team: TeamId,
    /// ID der verteidigenden Mannschaft
    pub defending_team: TeamId,
    /// Richtung der Marking-Zuordnung
    pub direction: MarkingDirection,
    /// Mindestanzahl gemeinsamer Frames, ab der ein Paar berichtet wird
    pub marking_threshold: usize,
    /// Abstand zwischen zwei Samples in Einheiten der Spieluhr
    pub sampling_interval: f64,
    /// Laufrichtung der Spieluhr in den Rohdaten
    pub clock: ClockDirection,
    /// Umgang mit offenen Voronoi-Regionen
    pub open_region_policy: OpenRegionPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            attacking_team: TeamId::from("attack"),
            defending_team: TeamId::from("defense"),
            direction: MarkingDirection::default(),
            marking_threshold: 0,
            sampling_interval: 1.0,
            clock: ClockDirection::default(),
            open_region_policy: OpenRegionPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn new(attacking_team: impl Into<TeamId>, defending_team: impl Into<TeamId>) -> Self {
        Self {
            attacking_team: attacking_team.into(),
            defending_team: defending_team.into(),
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: MarkingDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.marking_threshold = threshold;
        self
    }

    pub fn with_sampling_interval(mut self, interval: f64) -> Self {
        self.sampling_interval = interval;
        self
    }

    pub fn with_clock(mut self, clock: ClockDirection) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_open_region_policy(mut self, policy: OpenRegionPolicy) -> Self {
        self.open_region_policy = policy;
        self
    }

    pub fn team(&self, side: Side) -> &TeamId {
        match side {
            Side::Attacking => &self.attacking_team,
            Side::Defending => &self.defending_team,
        }
    }

    pub fn validate(&self) -> TrackingResult<()> {
        if self.attacking_team.as_str().is_empty() || self.defending_team.as_str().is_empty() {
            return Err(TrackingError::InvalidConfiguration {
                message: "team ids must not be empty".to_string(),
            });
        }
        if self.attacking_team == self.defending_team {
            return Err(TrackingError::InvalidConfiguration {
                message: format!(
                    "attacking and defending team must differ, both are '{}'",
                    self.attacking_team
                ),
            });
        }
        if !self.sampling_interval.is_finite() || self.sampling_interval <= 0.0 {
            return Err(TrackingError::InvalidConfiguration {
                message: format!(
                    "sampling interval must be a positive number, got {}",
                    self.sampling_interval
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_validation() {
        let config = AnalysisConfig::new("red", "blue")
            .with_threshold(3)
            .with_sampling_interval(0.5)
            .with_direction(MarkingDirection::DefendersMark);
        assert!(config.validate().is_ok());
        assert_eq!(config.team(Side::Defending).as_str(), "blue");
        assert_eq!(config.direction.source(), Side::Defending);
        assert_eq!(config.direction.target(), Side::Attacking);
    }

    #[test]
    fn test_invalid_configurations() {
        assert!(AnalysisConfig::new("a", "a").validate().is_err());
        assert!(AnalysisConfig::new("", "b").validate().is_err());
        for interval in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = AnalysisConfig::new("a", "b").with_sampling_interval(interval);
            assert!(matches!(
                config.validate(),
                Err(TrackingError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_default_direction_matches_attackers_marking() {
        let config = AnalysisConfig::default();
        assert_eq!(config.direction.source(), Side::Attacking);
        assert_eq!(config.marking_threshold, 0);
        assert_eq!(config.open_region_policy, OpenRegionPolicy::CarryForward);
    }
}
