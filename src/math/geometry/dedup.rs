// src/math/geometry/dedup.rs

/// Entfernt strukturell identische Elemente, das erste Vorkommen gewinnt und
/// die Reihenfolge der ersten Vorkommen bleibt erhalten.
///
/// Vergleicht mit `PartialEq` ohne Toleranz. Quadratisch in der Länge, die
/// Listen pro Frame sind klein (eine Zelle bzw. ein Grat pro Spieler).
pub fn dedup_preserving_order<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::types::{Point2D, Segment};

    #[test]
    fn test_first_occurrence_wins() {
        let deduped = dedup_preserving_order(vec![3, 1, 3, 2, 1]);
        assert_eq!(deduped, vec![3, 1, 2]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let s1 = Segment::new(Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0));
        let s2 = Segment::new(Point2D::new(1.0, 1.0), Point2D::new(0.0, 0.0));
        let once = dedup_preserving_order(vec![s1, s2, s1, s1]);
        assert_eq!(once, vec![s1, s2]);
        assert_eq!(dedup_preserving_order(once.clone()), once);
    }

    #[test]
    fn test_no_tolerance_for_near_duplicates() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(0.0, 1e-12);
        assert_eq!(dedup_preserving_order(vec![a, b]).len(), 2);
    }
}
