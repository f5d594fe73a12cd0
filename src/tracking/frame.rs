// src/tracking/frame.rs

use super::{
    clock::ClockNormalization,
    config::AnalysisConfig,
    error::{TrackingError, TrackingResult},
    types::{PlayerId, PlayerPosition, Side, TeamId, TimedPosition, TrackingRecord},
};
use crate::math::{types::Point2D, utils::constants};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info};

/// Alle Positionen zu einem Zeitpunkt (kanonische Zeit).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: f64,
    /// Angreifende Mannschaft, sortiert nach Spieler-ID
    pub attacking: Vec<PlayerPosition>,
    /// Verteidigende Mannschaft, sortiert nach Spieler-ID
    pub defending: Vec<PlayerPosition>,
    /// Objekte ohne konfigurierte Mannschaft (z.B. der Ball)
    pub others: Vec<Point2D>,
    /// Alle Positionen in Sortierreihenfolge, die Voronoi-Sites dieses Frames
    pub sites: Vec<Point2D>,
}

impl Frame {
    pub fn team(&self, side: Side) -> &[PlayerPosition] {
        match side {
            Side::Attacking => &self.attacking,
            Side::Defending => &self.defending,
        }
    }

    pub fn team_points(&self, side: Side) -> Vec<Point2D> {
        self.team(side).iter().map(|p| p.position).collect()
    }

    pub fn position_of(&self, side: Side, player: &PlayerId) -> Option<Point2D> {
        self.team(side)
            .iter()
            .find(|p| &p.player_id == player)
            .map(|p| p.position)
    }
}

/// Validierte Frames einer Session auf der kanonischen Zeitachse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSet {
    frames: Vec<Frame>,
    attacking_team: TeamId,
    defending_team: TeamId,
    clock: ClockNormalization,
}

impl FrameSet {
    /// Baut Frames aus Rohdaten.
    ///
    /// Normalisiert die Uhr einmalig auf aufsteigende Zeit, sortiert stabil nach
    /// (Zeit aufsteigend, Mannschaft absteigend, Spieler aufsteigend) und
    /// gruppiert nach exakt gleicher Zeit. Jeder Frame muss beide Mannschaften
    /// enthalten.
    pub fn from_records(
        records: &[TrackingRecord],
        config: &AnalysisConfig,
    ) -> TrackingResult<Self> {
        config.validate()?;

        for (index, record) in records.iter().enumerate() {
            if !record.time.is_finite() {
                return Err(TrackingError::InvalidRecord {
                    index,
                    reason: format!("non-finite time {}", record.time),
                });
            }
            if !record.position().is_finite() {
                return Err(TrackingError::InvalidRecord {
                    index,
                    reason: format!("non-finite position {}", record.position()),
                });
            }
        }

        for side in [Side::Attacking, Side::Defending] {
            let team = config.team(side);
            if !records.iter().any(|r| &r.team_id == team) {
                return Err(TrackingError::UnknownTeam {
                    side,
                    team: team.clone(),
                });
            }
        }

        let raw_max = records
            .iter()
            .map(|r| r.time)
            .fold(f64::NEG_INFINITY, f64::max);
        let clock = ClockNormalization::new(config.clock, raw_max);

        let mut rows: Vec<(f64, &TrackingRecord)> = records
            .iter()
            .map(|r| (clock.to_canonical(r.time), r))
            .collect();
        rows.sort_by(|(ta, a), (tb, b)| compare_rows(*ta, a, *tb, b));

        let mut frames: Vec<Frame> = Vec::new();
        for group in rows.chunk_by(|(ta, _), (tb, _)| ta == tb) {
            let time = group[0].0;
            frames.push(Self::build_frame(time, group, config)?);
        }

        info!(
            "FrameSet: {} records -> {} frames ({:?} clock)",
            records.len(),
            frames.len(),
            config.clock
        );

        Ok(Self {
            frames,
            attacking_team: config.attacking_team.clone(),
            defending_team: config.defending_team.clone(),
            clock,
        })
    }

    fn build_frame(
        time: f64,
        rows: &[(f64, &TrackingRecord)],
        config: &AnalysisConfig,
    ) -> TrackingResult<Frame> {
        let mut attacking = Vec::new();
        let mut defending = Vec::new();
        let mut others = Vec::new();
        let mut sites = Vec::with_capacity(rows.len());
        let mut seen: HashSet<(&TeamId, &PlayerId)> = HashSet::new();

        for (_, record) in rows {
            let position = record.position();
            sites.push(position);

            let target = if record.team_id == config.attacking_team {
                &mut attacking
            } else if record.team_id == config.defending_team {
                &mut defending
            } else {
                others.push(position);
                continue;
            };

            if !seen.insert((&record.team_id, &record.player_id)) {
                return Err(TrackingError::DuplicatePlayer {
                    team: record.team_id.clone(),
                    player: record.player_id.clone(),
                    time,
                });
            }
            target.push(PlayerPosition {
                player_id: record.player_id.clone(),
                position,
            });
        }

        for (side, players) in [(Side::Attacking, &attacking), (Side::Defending, &defending)] {
            if players.is_empty() {
                return Err(TrackingError::MissingTeam {
                    side,
                    team: config.team(side).clone(),
                    time,
                });
            }
        }

        debug!(
            "Frame {}: {} attacking, {} defending, {} other objects",
            time,
            attacking.len(),
            defending.len(),
            others.len()
        );

        Ok(Frame {
            time,
            attacking,
            defending,
            others,
            sites,
        })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clock(&self) -> ClockNormalization {
        self.clock
    }

    pub fn team_id(&self, side: Side) -> &TeamId {
        match side {
            Side::Attacking => &self.attacking_team,
            Side::Defending => &self.defending_team,
        }
    }

    /// Erste kanonische Zeit der Session
    pub fn start_time(&self) -> Option<f64> {
        self.frames.first().map(|f| f.time)
    }

    /// Letzte kanonische Zeit der Session
    pub fn end_time(&self) -> Option<f64> {
        self.frames.last().map(|f| f.time)
    }

    /// Frame zu einer kanonischen Zeit (mit Toleranz für Rasterzeiten)
    pub fn frame_at(&self, time: f64) -> Option<&Frame> {
        let idx = self
            .frames
            .partition_point(|f| f.time < time - constants::TIME_EPSILON);
        self.frames
            .get(idx)
            .filter(|f| (f.time - time).abs() <= constants::TIME_EPSILON)
    }

    pub fn require_frame(&self, time: f64) -> TrackingResult<&Frame> {
        self.frame_at(time)
            .ok_or(TrackingError::NoFrameAt { time })
    }

    /// Spieler einer Mannschaft in Reihenfolge ihres ersten Auftretens
    pub fn players(&self, side: Side) -> Vec<PlayerId> {
        let mut seen = HashSet::new();
        let mut players = Vec::new();
        for frame in &self.frames {
            for p in frame.team(side) {
                if seen.insert(&p.player_id) {
                    players.push(p.player_id.clone());
                }
            }
        }
        players
    }

    /// Zeitlich geordnete Positionen eines Spielers
    pub fn trajectory(&self, side: Side, player: &PlayerId) -> Vec<TimedPosition> {
        self.frames
            .iter()
            .filter_map(|f| {
                f.position_of(side, player).map(|position| TimedPosition {
                    time: f.time,
                    position,
                })
            })
            .collect()
    }
}

/// Zeit aufsteigend, Mannschaft absteigend, Spieler aufsteigend.
fn compare_rows(ta: f64, a: &TrackingRecord, tb: f64, b: &TrackingRecord) -> Ordering {
    ta.total_cmp(&tb)
        .then_with(|| b.team_id.cmp(&a.team_id))
        .then_with(|| a.player_id.cmp(&b.player_id))
}
