// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f64 = 1e-9;
    /// Toleranz, mit der Frame-Zeiten auf das Sampling-Raster gelegt werden
    pub const TIME_EPSILON: f64 = 1e-6;
}

/// Rundung mit "round half to even", wie es numerische Bibliotheken tun
pub mod rounding {
    /// Rundet auf die nächste ganze Zahl, x.5 geht zur geraden Zahl
    pub fn round_half_even(value: f64) -> f64 {
        value.round_ties_even()
    }

    /// Rundet auf `decimals` Nachkommastellen
    pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round_ties_even() / factor
    }
}

/// Geometrische Hilfsfunktionen (einfach, ohne komplexe Strukturen)
pub mod simple_geometry {
    use crate::math::types::Point2D;

    /// Vorzeichen mit echter Null: `sign(0.0) == 0.0`.
    /// `f64::signum` liefert für 0.0 dagegen 1.0.
    pub fn sign(value: f64) -> f64 {
        if value > 0.0 {
            1.0
        } else if value < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    /// Kreuzprodukt (o->a) x (o->b).
    /// - > 0: Linksdrehung (CCW)
    /// - < 0: Rechtsdrehung (CW)
    /// - = 0: kollinear
    pub fn cross(o: Point2D, a: Point2D, b: Point2D) -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }

    /// Arithmetisches Mittel einer Punktmenge, `None` für leere Eingaben
    pub fn mean_point(points: &[Point2D]) -> Option<Point2D> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point2D::new(sx / n, sy / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::types::Point2D;

    #[test]
    fn test_round_half_even() {
        assert_eq!(rounding::round_half_even(2.5), 2.0);
        assert_eq!(rounding::round_half_even(3.5), 4.0);
        assert_eq!(rounding::round_half_even(6.7), 7.0);
        assert_eq!(rounding::round_to_decimals(3.456, 2), 3.46);
    }

    #[test]
    fn test_sign_of_zero_is_zero() {
        assert_eq!(simple_geometry::sign(0.0), 0.0);
        assert_eq!(simple_geometry::sign(-0.0), 0.0);
        assert_eq!(simple_geometry::sign(-3.0), -1.0);
        assert_eq!(simple_geometry::sign(0.1), 1.0);
    }

    #[test]
    fn test_mean_point() {
        let pts = [Point2D::new(0.0, 0.0), Point2D::new(2.0, 4.0)];
        assert_eq!(simple_geometry::mean_point(&pts), Some(Point2D::new(1.0, 2.0)));
        assert_eq!(simple_geometry::mean_point(&[]), None);
    }
}
