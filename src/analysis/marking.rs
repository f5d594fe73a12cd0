// src/analysis/marking.rs

use super::assignment::Assignment;
use crate::math::{MathError, MathResult};
use crate::tracking::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Zusammenfassung eines (Quelle, Ziel)-Paares über alle Frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkingStat {
    pub source: PlayerId,
    pub target: PlayerId,
    /// Anzahl der Frames, in denen `target` der nächste Gegenspieler war
    pub occurrence_count: usize,
    /// Anteil an allen berichteten Frames der Quelle, in Prozent
    pub percent_of_source_time: f64,
    /// `occurrence_count * sampling_interval`
    pub total_time_span: f64,
    pub mean_distance: f64,
}

#[derive(Default)]
struct PairAccumulator {
    count: usize,
    distance_sum: f64,
}

/// Aggregiert Zuordnungen zu Paar-Statistiken.
///
/// Paare mit weniger als `threshold` Vorkommen werden verworfen; die
/// Prozentwerte beziehen sich auf die verbleibenden Paare derselben Quelle.
/// Ergebnis ist aufsteigend nach mittlerer Distanz sortiert (stabil, bei
/// Gleichstand in Reihenfolge des ersten Auftretens).
pub fn aggregate_marking(
    assignments: &[Assignment],
    threshold: usize,
    sampling_interval: f64,
) -> MathResult<Vec<MarkingStat>> {
    if !sampling_interval.is_finite() || sampling_interval <= 0.0 {
        return Err(MathError::InvalidConfiguration {
            message: format!(
                "sampling interval must be finite and positive, got {}",
                sampling_interval
            ),
        });
    }

    let mut order: Vec<(&PlayerId, &PlayerId)> = Vec::new();
    let mut pairs: HashMap<(&PlayerId, &PlayerId), PairAccumulator> = HashMap::new();
    for a in assignments {
        let key = (&a.source, &a.target);
        let acc = pairs.entry(key).or_insert_with(|| {
            order.push(key);
            PairAccumulator::default()
        });
        acc.count += 1;
        acc.distance_sum += a.distance;
    }

    let surviving: Vec<((&PlayerId, &PlayerId), &PairAccumulator)> = order
        .iter()
        .filter_map(|key| pairs.get(key).map(|acc| (*key, acc)))
        .filter(|(_, acc)| acc.count >= threshold)
        .collect();

    let mut source_totals: HashMap<&PlayerId, usize> = HashMap::new();
    for ((source, _), acc) in &surviving {
        *source_totals.entry(*source).or_default() += acc.count;
    }

    let mut stats: Vec<MarkingStat> = surviving
        .iter()
        .map(|((source, target), acc)| {
            // jede überlebende Quelle wurde oben summiert
            let total = source_totals[source];
            MarkingStat {
                source: (*source).clone(),
                target: (*target).clone(),
                occurrence_count: acc.count,
                percent_of_source_time: 100.0 * acc.count as f64 / total as f64,
                total_time_span: acc.count as f64 * sampling_interval,
                mean_distance: acc.distance_sum / acc.count as f64,
            }
        })
        .collect();

    stats.sort_by(|a, b| a.mean_distance.total_cmp(&b.mean_distance));

    debug!(
        "aggregate_marking: {} assignments, {} pairs, {} above threshold {}",
        assignments.len(),
        order.len(),
        stats.len(),
        threshold
    );
    Ok(stats)
}
