//! Pump head curves of the form `h = h0 - r * q^n`.

use crate::common::check_finite;
use crate::error::{ElementError, ElementResult};

/// Power-function head curve fitted from design points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PumpCurve {
    /// Shutoff head (ft)
    pub h0: f64,
    /// Flow coefficient
    pub r: f64,
    /// Flow exponent
    pub n: f64,
    /// Design flow, used as the starting flow estimate (cfs)
    pub q_init: f64,
    /// Flow at zero head (cfs)
    pub q_max: f64,
}

impl PumpCurve {
    /// Curve through a single design point.
    ///
    /// Shutoff head is 4/3 of the design head and the curve runs out at twice
    /// the design flow.
    pub fn single_point(q: f64, h: f64) -> ElementResult<Self> {
        check_finite(q, "pump design flow")?;
        check_finite(h, "pump design head")?;
        if q <= 0.0 || h <= 0.0 {
            return Err(ElementError::InvalidCurve {
                what: "design flow and head must be positive",
            });
        }
        let h0 = h * 4.0 / 3.0;
        Ok(Self {
            h0,
            r: (h0 - h) / (q * q),
            n: 2.0,
            q_init: q,
            q_max: 2.0 * q,
        })
    }

    /// Curve through shutoff head `h0`, design point `(q1, h1)` and a
    /// high-flow point `(q2, h2)`.
    pub fn three_point(h0: f64, q1: f64, h1: f64, q2: f64, h2: f64) -> ElementResult<Self> {
        for (v, what) in [
            (h0, "pump shutoff head"),
            (q1, "pump design flow"),
            (h1, "pump design head"),
            (q2, "pump max flow"),
            (h2, "pump max-flow head"),
        ] {
            check_finite(v, what)?;
        }
        if !(h0 > h1 && h1 > h2 && h2 >= 0.0) {
            return Err(ElementError::InvalidCurve {
                what: "heads must decrease with flow",
            });
        }
        if !(q2 > q1 && q1 > 0.0) {
            return Err(ElementError::InvalidCurve {
                what: "flows must be positive and increasing",
            });
        }

        let n = ((h0 - h1) / (h0 - h2)).ln() / (q1 / q2).ln();
        if !(n > 0.0 && n.is_finite()) {
            return Err(ElementError::InvalidCurve {
                what: "points do not fit a power curve",
            });
        }
        let r = (h0 - h1) / q1.powf(n);
        Ok(Self {
            h0,
            r,
            n,
            q_init: q1,
            q_max: (h0 / r).powf(1.0 / n),
        })
    }

    /// Fit from a list of (flow, head) points: one design point, or three
    /// points where the first is the shutoff head at zero flow.
    pub fn from_points(points: &[(f64, f64)]) -> ElementResult<Self> {
        match points {
            [(q, h)] => Self::single_point(*q, *h),
            [(q0, h0), (q1, h1), (q2, h2)] if *q0 == 0.0 => {
                Self::three_point(*h0, *q1, *h1, *q2, *h2)
            }
            _ => Err(ElementError::InvalidCurve {
                what: "expected one design point or three points starting at zero flow",
            }),
        }
    }

    /// Head delivered at flow `q` and relative speed `speed`.
    pub fn head(&self, q: f64, speed: f64) -> f64 {
        if speed <= 0.0 {
            return 0.0;
        }
        speed * speed * self.h0 - self.r * speed.powf(2.0 - self.n) * q.abs().powf(self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_shape() {
        let c = PumpCurve::single_point(10.0, 150.0).unwrap();
        assert_eq!(c.h0, 200.0);
        assert_eq!(c.q_max, 20.0);
        assert!((c.head(10.0, 1.0) - 150.0).abs() < 1e-9);
        assert!(c.head(20.0, 1.0).abs() < 1e-9);
    }

    #[test]
    fn three_point_passes_through_points() {
        let c = PumpCurve::three_point(200.0, 10.0, 150.0, 20.0, 50.0).unwrap();
        assert!((c.head(0.0, 1.0) - 200.0).abs() < 1e-9);
        assert!((c.head(10.0, 1.0) - 150.0).abs() < 1e-9);
        assert!((c.head(20.0, 1.0) - 50.0).abs() < 1e-9);
        assert!(c.q_max > 20.0);
    }

    #[test]
    fn affinity_law_scaling() {
        let c = PumpCurve::single_point(10.0, 150.0).unwrap();
        // Half speed: half flow gives a quarter of the head
        let full = c.head(10.0, 1.0);
        let half = c.head(5.0, 0.5);
        assert!((half - full / 4.0).abs() < 1e-9);
        assert_eq!(c.head(5.0, 0.0), 0.0);
    }

    #[test]
    fn rejects_bad_points() {
        assert!(PumpCurve::single_point(0.0, 100.0).is_err());
        assert!(PumpCurve::three_point(100.0, 10.0, 120.0, 20.0, 50.0).is_err());
        assert!(PumpCurve::three_point(200.0, 20.0, 150.0, 10.0, 50.0).is_err());
        assert!(PumpCurve::from_points(&[(1.0, 2.0), (3.0, 1.0)]).is_err());
        assert!(matches!(
            PumpCurve::single_point(f64::NAN, 1.0),
            Err(ElementError::NonPhysical { .. })
        ));
    }

    #[test]
    fn from_points_dispatch() {
        let one = PumpCurve::from_points(&[(10.0, 150.0)]).unwrap();
        assert_eq!(one.n, 2.0);
        let three =
            PumpCurve::from_points(&[(0.0, 200.0), (10.0, 150.0), (20.0, 50.0)]).unwrap();
        assert_eq!(three.q_init, 10.0);
    }
}
