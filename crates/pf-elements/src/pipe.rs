//! Pipe with friction and minor losses.

use crate::common::{MIN_GRADIENT, bore_reynolds};
use crate::error::ElementResult;
use crate::options::HeadLossModel;
use crate::traits::{HeadLoss, HeadLossInput, LinkModel, Section};
use pf_core::numeric::ensure_positive;
use pf_core::units::constants::G_FTPS2;
use pf_core::units::{Length, length_internal};

/// Hazen-Williams flow exponent.
const HW_EXPONENT: f64 = 1.852;

// Darcy-Weisbach friction factor constants
const LN10: f64 = std::f64::consts::LN_10;
/// -2 / ln(10)
const DW_A9: f64 = -2.0 / LN10;
/// 5.74 / 4000^0.9
const DW_AB: f64 = 3.288_954_763_453_990_6e-3;
/// (-2 * 0.9 * 2 / ln(10)) * DW_AB
const DW_AC: f64 = -5.142_149_657_990_938_8e-3;
const RE_LAMINAR: f64 = 2000.0;
const RE_TURBULENT: f64 = 4000.0;

/// Pipe segment.
///
/// Diameter and minor-loss coefficient live on the owning link; the pipe
/// holds what only pipes have.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipe {
    /// Length (ft)
    pub length: f64,
    /// Roughness: C factor (H-W), millifeet (D-W) or Manning's n (C-M)
    pub roughness: f64,
}

impl Pipe {
    /// Create a new pipe.
    ///
    /// # Errors
    /// Returns error if length or roughness is not positive.
    pub fn new(length: Length, roughness: f64) -> ElementResult<Self> {
        let length = ensure_positive(length_internal(length), "pipe length must be positive")?;
        let roughness = ensure_positive(roughness, "pipe roughness must be positive")?;
        Ok(Self { length, roughness })
    }

    /// Friction resistance and flow exponent: h = r * |q|^n.
    ///
    /// For Darcy-Weisbach the friction factor is excluded (h = f * r * q^2).
    pub fn resistance(&self, model: HeadLossModel, diameter: f64) -> (f64, f64) {
        if diameter <= 0.0 || self.length <= 0.0 || self.roughness <= 0.0 {
            return (0.0, 1.0);
        }
        match model {
            HeadLossModel::HazenWilliams => (
                4.727 * self.length / self.roughness.powf(HW_EXPONENT) / diameter.powf(4.871),
                HW_EXPONENT,
            ),
            HeadLossModel::ChezyManning => (
                4.66 * self.roughness.powi(2) * self.length / diameter.powf(5.33),
                2.0,
            ),
            HeadLossModel::DarcyWeisbach => {
                let area = crate::common::circle_area(diameter);
                (
                    self.length / (2.0 * G_FTPS2 * diameter * area * area),
                    2.0,
                )
            }
        }
    }

    /// Power-law friction (H-W, C-M) plus minor losses.
    fn power_law_head_loss(&self, input: &HeadLossInput, r: f64, n: f64) -> HeadLoss {
        let q = input.flow.abs();
        let ml = input.section.minor_loss();
        let thresh = input.flow_thresh;

        if q <= thresh {
            // Chord slope at the threshold keeps the law continuous there
            let h_grad = (r * thresh.powf(n - 1.0) + ml * thresh).max(MIN_GRADIENT);
            return HeadLoss {
                h_loss: h_grad * input.flow,
                h_grad,
            };
        }

        let h_grad = n * r * q.powf(n - 1.0) + 2.0 * ml * q;
        let h_loss = (r * q.powf(n) + ml * q * q) * input.flow.signum();
        HeadLoss {
            h_loss,
            h_grad: h_grad.max(MIN_GRADIENT),
        }
    }

    fn darcy_weisbach_head_loss(&self, input: &HeadLossInput, r: f64) -> HeadLoss {
        let q = input.flow.abs();
        let d = input.section.diameter;
        let ml = input.section.minor_loss();
        let re = bore_reynolds(q, d, input.viscosity);

        if q <= input.flow_thresh || re <= RE_LAMINAR {
            // Hagen-Poiseuille: f = 64/Re makes friction loss linear in q
            let r_lam = 16.0 * std::f64::consts::PI * input.viscosity * d * r;
            let h_grad = (r_lam + 2.0 * ml * q).max(MIN_GRADIENT);
            return HeadLoss {
                h_loss: input.flow * (r_lam + ml * q),
                h_grad,
            };
        }

        let e = self.roughness / 1000.0 / d;
        let (f, dfdq) = friction_factor(q, re, e);
        let r1 = f * r + ml;
        HeadLoss {
            h_loss: r1 * q * input.flow,
            h_grad: (2.0 * r1 * q + dfdq * r * q * q).max(MIN_GRADIENT),
        }
    }
}

/// Turbulent and transitional friction factor with its flow derivative.
///
/// Swamee-Jain above Re 4000, Dunlop's cubic interpolation between 2000 and
/// 4000. `e` is relative roughness.
fn friction_factor(q: f64, re: f64, e: f64) -> (f64, f64) {
    if re >= RE_TURBULENT {
        let y1 = 5.74 / re.powf(0.9);
        let y2 = e / 3.7 + y1;
        let y3 = DW_A9 * y2.ln();
        let f = 1.0 / (y3 * y3);
        let dfdq = 1.8 * f * y1 * DW_A9 / y2 / y3 / q;
        return (f, dfdq);
    }

    let y2 = e / 3.7 + DW_AB;
    let y3 = DW_A9 * y2.ln();
    let fa = 1.0 / (y3 * y3);
    let fb = (2.0 + DW_AC / (y2 * y3)) * fa;
    let r = re / RE_LAMINAR;
    let x1 = 7.0 * fa - fb;
    let x2 = 0.128 - 17.0 * fa + 2.5 * fb;
    let x3 = -0.128 + 13.0 * fa - 2.0 * fb;
    let x4 = 0.032 - 3.0 * fa + 0.5 * fb;
    let f = x1 + r * (x2 + r * (x3 + r * x4));
    let dfdq = (x2 + r * (2.0 * x3 + r * 3.0 * x4)) * r / q;
    (f, dfdq)
}

impl LinkModel for Pipe {
    fn type_label(&self) -> &'static str {
        "Pipe"
    }

    /// Flow at a velocity of 1 ft/s.
    fn init_flow(&self, section: &Section, _setting: f64) -> f64 {
        section.area()
    }

    fn head_loss(&self, input: &HeadLossInput) -> HeadLoss {
        if input.status == crate::status::LinkStatus::TempClosed {
            return crate::common::closed_head_loss(input.flow);
        }
        let (r, n) = self.resistance(input.model, input.section.diameter);
        if r <= 0.0 {
            return crate::common::open_head_loss(input.flow, input.section.minor_loss());
        }
        match input.model {
            HeadLossModel::DarcyWeisbach => self.darcy_weisbach_head_loss(input, r),
            _ => self.power_law_head_loss(input, r, n),
        }
    }

    fn reynolds(&self, q: f64, section: &Section, viscosity: f64) -> f64 {
        bore_reynolds(q, section.diameter, viscosity)
    }

    /// Head loss per 1000 ft of pipe.
    fn unit_head_loss(&self, h_loss: f64) -> f64 {
        if self.length > 0.0 {
            h_loss.abs() * 1000.0 / self.length
        } else {
            0.0
        }
    }
}
