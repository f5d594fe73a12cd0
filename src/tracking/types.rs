// src/tracking/types.rs

use crate::math::types::Point2D;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spieler-ID, eindeutig innerhalb einer Mannschaft und eines Frames
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

/// Mannschafts-ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PlayerId);
string_id!(TeamId);

/// Eine Zeile der Tracking-Daten: Position eines Objekts zu einem Zeitpunkt.
/// Objekte, die keiner der beiden konfigurierten Mannschaften angehören
/// (z.B. der Ball), werden als Voronoi-Sites mitgeführt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub x: f64,
    pub y: f64,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub time: f64,
}

impl TrackingRecord {
    pub fn new(
        team_id: impl Into<TeamId>,
        player_id: impl Into<PlayerId>,
        time: f64,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
            team_id: team_id.into(),
            player_id: player_id.into(),
            time,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Position eines Spielers in einem Frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub player_id: PlayerId,
    pub position: Point2D,
}

impl PlayerPosition {
    pub fn new(player_id: impl Into<PlayerId>, x: f64, y: f64) -> Self {
        Self {
            player_id: player_id.into(),
            position: Point2D::new(x, y),
        }
    }
}

/// Position eines Spielers zu einem (kanonischen) Zeitpunkt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPosition {
    pub time: f64,
    pub position: Point2D,
}

impl TimedPosition {
    pub fn new(time: f64, x: f64, y: f64) -> Self {
        Self {
            time,
            position: Point2D::new(x, y),
        }
    }
}

/// Seite einer Mannschaft in der Analyse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacking,
    Defending,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Attacking => Side::Defending,
            Side::Defending => Side::Attacking,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attacking => f.write_str("attacking"),
            Side::Defending => f.write_str("defending"),
        }
    }
}
