// src/analysis/movement.rs

use crate::math::{MathError, MathResult, utils::rounding};
use crate::tracking::{
    error::TrackingResult,
    frame::FrameSet,
    types::{PlayerId, Side, TimedPosition},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Durchschnittsgeschwindigkeit; undefiniert bei leerem Zeitfenster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AverageSpeed {
    Defined(f64),
    Undefined,
}

impl AverageSpeed {
    pub fn value(self) -> Option<f64> {
        match self {
            AverageSpeed::Defined(v) => Some(v),
            AverageSpeed::Undefined => None,
        }
    }
}

impl fmt::Display for AverageSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageSpeed::Defined(v) => write!(f, "{:.2}", v),
            AverageSpeed::Undefined => f.write_str("undefined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementMetrics {
    /// Zurückgelegte Strecke, auf ganze Einheiten gerundet
    pub cumulative_distance: f64,
    pub average_speed: AverageSpeed,
}

/// Laufstrecke und Durchschnittsgeschwindigkeit im Fenster `[t_start, t_query]`.
///
/// Die Trajektorie muss zeitlich aufsteigend sein. Die Strecke wird auf ganze
/// Einheiten gerundet (x.5 zur geraden Zahl), die Geschwindigkeit ist der
/// Betrag von `strecke / (t_query - t_start)` auf zwei Nachkommastellen.
pub fn movement_metrics(
    trajectory: &[TimedPosition],
    t_start: f64,
    t_query: f64,
) -> MathResult<MovementMetrics> {
    if !t_start.is_finite() || !t_query.is_finite() {
        return Err(MathError::InvalidInput {
            message: format!("movement window [{}, {}] is not finite", t_start, t_query),
        });
    }

    let distance: f64 = trajectory
        .iter()
        .filter(|s| t_start <= s.time && s.time <= t_query)
        .map(|s| s.position)
        .collect::<Vec<_>>()
        .windows(2)
        .map(|w| w[0].distance_to(w[1]))
        .sum();
    let cumulative_distance = rounding::round_half_even(distance);

    let elapsed = t_query - t_start;
    let average_speed = if elapsed == 0.0 {
        AverageSpeed::Undefined
    } else {
        AverageSpeed::Defined(rounding::round_to_decimals(cumulative_distance / elapsed, 2).abs())
    };

    Ok(MovementMetrics {
        cumulative_distance,
        average_speed,
    })
}

/// Laufmetriken eines Spielers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMovement {
    pub player_id: PlayerId,
    pub metrics: MovementMetrics,
}

/// Laufmetriken aller Spieler einer Mannschaft vom Sessionstart bis `t_query`
pub fn team_movement(
    frames: &FrameSet,
    side: Side,
    t_query: f64,
) -> TrackingResult<Vec<PlayerMovement>> {
    let Some(t_start) = frames.start_time() else {
        return Ok(Vec::new());
    };

    let mut table = Vec::new();
    for player_id in frames.players(side) {
        let trajectory = frames.trajectory(side, &player_id);
        let metrics = movement_metrics(&trajectory, t_start, t_query)?;
        table.push(PlayerMovement { player_id, metrics });
    }

    debug!(
        "team_movement: {} players of {} team up to t={}",
        table.len(),
        side,
        t_query
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn path() -> Vec<TimedPosition> {
        vec![
            TimedPosition::new(0.0, 0.0, 0.0),
            TimedPosition::new(1.0, 3.0, 0.0),
            TimedPosition::new(2.0, 3.0, 4.0),
        ]
    }

    #[test]
    fn test_distance_and_speed_over_window() {
        let m = movement_metrics(&path(), 0.0, 2.0).unwrap();
        assert_eq!(m.cumulative_distance, 7.0);
        assert_eq!(m.average_speed, AverageSpeed::Defined(3.5));
    }

    #[test]
    fn test_window_excludes_samples_outside() {
        let m = movement_metrics(&path(), 0.0, 1.0).unwrap();
        assert_eq!(m.cumulative_distance, 3.0);
        assert_relative_eq!(m.average_speed.value().unwrap(), 3.0);

        let m = movement_metrics(&path(), 1.0, 2.0).unwrap();
        assert_eq!(m.cumulative_distance, 4.0);
    }

    #[test]
    fn test_equal_bounds_give_undefined_speed() {
        let m = movement_metrics(&path(), 1.0, 1.0).unwrap();
        assert_eq!(m.cumulative_distance, 0.0);
        assert_eq!(m.average_speed, AverageSpeed::Undefined);
        assert_eq!(m.average_speed.to_string(), "undefined");
    }

    #[test]
    fn test_distance_rounds_half_to_even() {
        let traj = vec![
            TimedPosition::new(0.0, 0.0, 0.0),
            TimedPosition::new(1.0, 2.5, 0.0),
        ];
        let m = movement_metrics(&traj, 0.0, 1.0).unwrap();
        assert_eq!(m.cumulative_distance, 2.0);
        assert_eq!(m.average_speed, AverageSpeed::Defined(2.0));
    }

    #[test]
    fn test_reversed_window_is_empty_with_non_negative_speed() {
        let m = movement_metrics(&path(), 2.0, 0.0).unwrap();
        assert_eq!(m.cumulative_distance, 0.0);
        assert_eq!(m.average_speed, AverageSpeed::Defined(0.0));
    }

    #[test]
    fn test_non_finite_window_is_rejected() {
        assert!(matches!(
            movement_metrics(&path(), f64::NAN, 1.0),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(movement_metrics(&[], 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_team_movement_covers_every_player() {
        use crate::tracking::{AnalysisConfig, TrackingRecord};

        let records = vec![
            TrackingRecord::new("a", "1", 0.0, 0.0, 0.0),
            TrackingRecord::new("a", "2", 0.0, 10.0, 0.0),
            TrackingRecord::new("b", "9", 0.0, 5.0, 5.0),
            TrackingRecord::new("a", "1", 2.0, 6.0, 8.0),
            TrackingRecord::new("a", "2", 2.0, 10.0, 0.0),
            TrackingRecord::new("b", "9", 2.0, 5.0, 6.0),
        ];
        let frames = FrameSet::from_records(&records, &AnalysisConfig::new("a", "b")).unwrap();
        let table = team_movement(&frames, Side::Attacking, 2.0).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].player_id.as_str(), "1");
        assert_eq!(table[0].metrics.cumulative_distance, 10.0);
        assert_eq!(table[0].metrics.average_speed, AverageSpeed::Defined(5.0));
        assert_eq!(table[1].metrics.cumulative_distance, 0.0);
    }

    #[test]
    fn test_empty_trajectory() {
        let m = movement_metrics(&[], 0.0, 5.0).unwrap();
        assert_eq!(m.cumulative_distance, 0.0);
        assert_eq!(m.average_speed, AverageSpeed::Defined(0.0));
    }
}
