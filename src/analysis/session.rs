// src/analysis/session.rs

//! # Analyse-Session
//!
//! Bündelt die Einzelanalysen über einem validierten [`FrameSet`]:
//! Voronoi-Territorien pro Frame, Marking-Linien, aggregierte
//! Marking-Statistiken, Laufmetriken und Mannschaftshüllen.
//!
//! Für das Marking werden nur Frames auf dem Sampling-Raster
//! `t_min, t_min + step, ...` verwendet.

use super::{
    assignment::{Assignment, assign_nearest},
    marking::{MarkingStat, aggregate_marking},
    movement::{PlayerMovement, team_movement},
};
use crate::math::{
    MathError,
    geometry::{Polygon, team_hull},
    types::Point2D,
    utils::constants,
    voronoi::{VoronoiBoundaries, VoronoiDiagram, extract_voronoi_boundaries_with},
};
use crate::tracking::{
    config::AnalysisConfig,
    error::{TrackingError, TrackingResult},
    frame::{Frame, FrameSet},
    types::{PlayerId, Side},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Aggregierte Marking-Statistiken einer Session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkingReport {
    pub stats: Vec<MarkingStat>,
    /// Markierende Spieler, deren Paare alle unter dem Schwellwert lagen
    pub unmatched_sources: Vec<PlayerId>,
}

/// Konvexe Hüllen beider Mannschaften; `None` bei weniger als drei
/// nicht-kollinearen Spielern
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamHulls {
    pub attacking: Option<Polygon>,
    pub defending: Option<Polygon>,
}

pub struct MatchAnalysis<'a> {
    frames: &'a FrameSet,
    config: AnalysisConfig,
}

impl<'a> MatchAnalysis<'a> {
    pub fn new(frames: &'a FrameSet, config: &AnalysisConfig) -> TrackingResult<Self> {
        config.validate()?;
        for side in [Side::Attacking, Side::Defending] {
            if frames.team_id(side) != config.team(side) {
                return Err(TrackingError::InvalidConfiguration {
                    message: format!(
                        "{} team '{}' does not match the frame set ('{}')",
                        side,
                        config.team(side),
                        frames.team_id(side)
                    ),
                });
            }
        }

        info!(
            "MatchAnalysis: {} frames, {} marks {}, threshold {}, step {}",
            frames.len(),
            config.direction.source(),
            config.direction.target(),
            config.marking_threshold,
            config.sampling_interval
        );

        Ok(Self {
            frames,
            config: config.clone(),
        })
    }

    pub fn frames(&self) -> &FrameSet {
        self.frames
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Sampling-Raster von der ersten bis zur letzten Frame-Zeit
    pub fn sample_times(&self) -> Vec<f64> {
        let (Some(start), Some(end)) = (self.frames.start_time(), self.frames.end_time()) else {
            return Vec::new();
        };
        let step = self.config.sampling_interval;
        let steps = ((end - start) / step + constants::TIME_EPSILON).floor() as usize;
        (0..=steps).map(|k| start + k as f64 * step).collect()
    }

    /// Frames auf dem Sampling-Raster; Rasterzeiten ohne Frame entfallen
    fn grid_frames(&self) -> Vec<&'a Frame> {
        let grid: Vec<&'a Frame> = self
            .sample_times()
            .into_iter()
            .filter_map(|t| self.frames.frame_at(t))
            .collect();

        let off_grid = self.frames.len().saturating_sub(grid.len());
        if off_grid > 0 {
            warn!(
                "{} of {} frames are off the sampling grid (step {}) and not used for marking",
                off_grid,
                self.frames.len(),
                self.config.sampling_interval
            );
        }
        grid
    }

    /// Voronoi-Grenzen aller Objekte eines Frames
    pub fn tessellation(&self, time: f64) -> TrackingResult<VoronoiBoundaries> {
        let frame = self.frames.require_frame(time)?;
        let diagram = VoronoiDiagram::from_sites(&frame.sites)?;
        Ok(extract_voronoi_boundaries_with(
            &diagram,
            self.config.open_region_policy,
        )?)
    }

    /// Zuordnungen eines Frames in der konfigurierten Marking-Richtung
    pub fn marking_lines(&self, time: f64) -> TrackingResult<Vec<Assignment>> {
        let frame = self.frames.require_frame(time)?;
        self.assign_frame(frame)
    }

    fn assign_frame(&self, frame: &Frame) -> TrackingResult<Vec<Assignment>> {
        let source = frame.team(self.config.direction.source());
        let target = frame.team(self.config.direction.target());
        Ok(assign_nearest(frame.time, source, target)?)
    }

    /// Zuordnungen über alle Rasterframes, zeitlich geordnet
    pub fn assignment_stream(&self) -> TrackingResult<Vec<Assignment>> {
        let mut stream = Vec::new();
        for frame in self.grid_frames() {
            stream.extend(self.assign_frame(frame)?);
        }
        debug!("assignment_stream: {} assignments", stream.len());
        Ok(stream)
    }

    pub fn marking_report(&self) -> TrackingResult<MarkingReport> {
        let stream = self.assignment_stream()?;
        let stats = aggregate_marking(
            &stream,
            self.config.marking_threshold,
            self.config.sampling_interval,
        )?;

        let reported: HashSet<&PlayerId> = stats.iter().map(|s| &s.source).collect();
        let mut seen = HashSet::new();
        let unmatched_sources: Vec<PlayerId> = stream
            .iter()
            .map(|a| &a.source)
            .filter(|source| !reported.contains(source) && seen.insert(*source))
            .cloned()
            .collect();

        if !unmatched_sources.is_empty() {
            debug!(
                "marking_report: {} sources below threshold {}",
                unmatched_sources.len(),
                self.config.marking_threshold
            );
        }

        Ok(MarkingReport {
            stats,
            unmatched_sources,
        })
    }

    /// Laufmetriken aller Spieler einer Mannschaft bis `t_query`
    pub fn movement(&self, side: Side, t_query: f64) -> TrackingResult<Vec<PlayerMovement>> {
        team_movement(self.frames, side, t_query)
    }

    pub fn team_hulls(&self, time: f64) -> TrackingResult<TeamHulls> {
        let frame = self.frames.require_frame(time)?;
        Ok(TeamHulls {
            attacking: hull_or_none(&frame.team_points(Side::Attacking))?,
            defending: hull_or_none(&frame.team_points(Side::Defending))?,
        })
    }
}

fn hull_or_none(points: &[Point2D]) -> TrackingResult<Option<Polygon>> {
    match team_hull(points) {
        Ok(hull) => Ok(Some(hull)),
        Err(MathError::InsufficientPoints { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
