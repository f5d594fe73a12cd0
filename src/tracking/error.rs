// src/tracking/error.rs
use super::types::{PlayerId, Side, TeamId};
use crate::math::MathError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackingError {
    #[error("Invalid tracking record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("{side} team '{team}' does not appear in the tracking data")]
    UnknownTeam { side: Side, team: TeamId },

    #[error("{side} team '{team}' has no players in the frame at time {time}")]
    MissingTeam { side: Side, team: TeamId, time: f64 },

    #[error("Player '{player}' of team '{team}' appears more than once at time {time}")]
    DuplicatePlayer {
        team: TeamId,
        player: PlayerId,
        time: f64,
    },

    #[error("No frame at time {time}")]
    NoFrameAt { time: f64 },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type TrackingResult<T> = Result<T, TrackingError>;
