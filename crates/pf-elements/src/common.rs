//! Numerical constants and shared head-loss helpers.

use crate::error::{ElementError, ElementResult};
use crate::traits::HeadLoss;
use pf_core::numeric::ensure_finite;

/// Flow carried by a closed link (cfs). Never exactly zero.
pub const ZERO_FLOW: f64 = 1.0e-6;

/// Reynolds number below which head loss is linearized.
pub const RE_THRESH: f64 = 200.0;

/// Smallest flow threshold the model will use (cfs).
pub const MIN_THRESH: f64 = 1.0e-6;

/// Head-loss gradient used to model a closed link.
pub const HIGH_RESISTANCE: f64 = 1.0e8;

/// Smallest head-loss gradient handed to the solver.
pub const MIN_GRADIENT: f64 = 1.0e-6;

/// Loss coefficients below this are treated as zero.
pub const MIN_LOSS_COEFF: f64 = 1.0e-6;

/// Converts a minor-loss K factor into ft/cfs^2 for diameter in ft: 8 / (g pi^2).
pub const MINOR_LOSS_FACTOR: f64 = 0.02517;

/// Ensure a value is finite, returning ElementError if not.
pub fn check_finite(value: f64, what: &'static str) -> ElementResult<()> {
    ensure_finite(value, what).map_err(|_| ElementError::NonPhysical { what })?;
    Ok(())
}

/// Cross-section area of a circular bore.
pub fn circle_area(diameter: f64) -> f64 {
    std::f64::consts::PI * diameter * diameter / 4.0
}

/// Minor-loss K factor expressed as a head-loss resistance (h = km * q^2).
pub fn minor_loss_resistance(k: f64, diameter: f64) -> f64 {
    if k <= 0.0 || diameter <= 0.0 {
        return 0.0;
    }
    MINOR_LOSS_FACTOR * k / diameter.powi(4)
}

/// High-resistance linear law for a link that must not conduct.
pub fn closed_head_loss(flow: f64) -> HeadLoss {
    HeadLoss {
        h_loss: HIGH_RESISTANCE * flow,
        h_grad: HIGH_RESISTANCE,
    }
}

/// Quadratic minor-loss law with a linear fallback near zero.
///
/// Used by fully open valves and loss-only links.
pub fn open_head_loss(flow: f64, km: f64) -> HeadLoss {
    if km < MIN_LOSS_COEFF {
        return HeadLoss {
            h_loss: MIN_GRADIENT * flow,
            h_grad: MIN_GRADIENT,
        };
    }
    let h_grad = 2.0 * km * flow.abs();
    if h_grad < MIN_GRADIENT {
        return HeadLoss {
            h_loss: MIN_GRADIENT * flow,
            h_grad: MIN_GRADIENT,
        };
    }
    HeadLoss {
        h_loss: km * flow * flow.abs(),
        h_grad,
    }
}

/// Reynolds number for flow `q` through a circular bore.
pub fn bore_reynolds(q: f64, diameter: f64, viscosity: f64) -> f64 {
    if diameter <= 0.0 || viscosity <= 0.0 {
        return 0.0;
    }
    4.0 * q.abs() / (std::f64::consts::PI * diameter * viscosity)
}
