// src/analysis/assignment.rs

//! # Nächster Gegenspieler
//!
//! Ordnet jedem Spieler der Quellmannschaft den nächstgelegenen Spieler der
//! Zielmannschaft zu. Grundlage ist die vollständige Distanzmatrix
//! |S| x |T|; pro Zeile gewinnt das erste Minimum in Zielreihenfolge.

use crate::math::{MathError, MathResult, types::Point2D, types::Segment};
use crate::tracking::types::{PlayerId, PlayerPosition};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Zuordnung eines markierenden Spielers zu seinem nächsten Gegenspieler
/// in einem Frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub time: f64,
    pub source: PlayerId,
    pub target: PlayerId,
    pub distance: f64,
    pub source_position: Point2D,
    pub target_position: Point2D,
}

impl Assignment {
    /// Linie vom markierenden zum markierten Spieler
    pub fn marking_line(&self) -> Segment {
        Segment::new(self.source_position, self.target_position)
    }
}

/// Paarweise euklidische Distanzen, Zeilen = Quelle, Spalten = Ziel
pub fn pairwise_distances(source: &[Point2D], target: &[Point2D]) -> DMatrix<f64> {
    DMatrix::from_fn(source.len(), target.len(), |i, j| {
        source[i].distance_to(target[j])
    })
}

/// Index des ersten Minimums einer Zeile.
/// Striktes `<` hält bei Gleichstand den früheren Index.
fn stable_argmin(distances: &DMatrix<f64>, row: usize) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (j, &d) in distances.row(row).iter().enumerate() {
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((j, d));
        }
    }
    best
}

/// Ordnet jeden Quellspieler dem nächsten Zielspieler zu.
///
/// Liefert genau eine Zuordnung pro Quellspieler, in Quellreihenfolge.
/// Leere Quell- oder Zielmengen sind ein Vertragsbruch.
pub fn assign_nearest(
    time: f64,
    source: &[PlayerPosition],
    target: &[PlayerPosition],
) -> MathResult<Vec<Assignment>> {
    if source.is_empty() {
        return Err(MathError::EmptyPointSet { role: "source" });
    }
    if target.is_empty() {
        return Err(MathError::EmptyPointSet { role: "target" });
    }

    let source_points: Vec<Point2D> = source.iter().map(|p| p.position).collect();
    let target_points: Vec<Point2D> = target.iter().map(|p| p.position).collect();
    let distances = pairwise_distances(&source_points, &target_points);

    let mut assignments = Vec::with_capacity(source.len());
    for (i, src) in source.iter().enumerate() {
        let (j, distance) = stable_argmin(&distances, i).ok_or(MathError::IndexOutOfRange {
            table: "target",
            index: 0,
            len: target.len(),
        })?;
        let tgt = &target[j];
        assignments.push(Assignment {
            time,
            source: src.player_id.clone(),
            target: tgt.player_id.clone(),
            distance,
            source_position: src.position,
            target_position: tgt.position,
        });
    }

    debug!(
        "assign_nearest t={}: {} sources -> {} targets",
        time,
        source.len(),
        target.len()
    );
    Ok(assignments)
}
