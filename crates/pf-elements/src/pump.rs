//! Pump component model.

use crate::common::{HIGH_RESISTANCE, MIN_GRADIENT, ZERO_FLOW, closed_head_loss, open_head_loss};
use crate::curve::PumpCurve;
use crate::status::LinkStatus;
use crate::traits::{HeadLoss, HeadLossInput, LinkModel, Section};

/// Centrifugal pump driven by a head curve.
///
/// ## Model
///
/// The link setting is the relative speed `s`. By the affinity laws the head
/// gain at flow `q` is
///
/// ```text
/// h(q) = s^2 * h0 - r * s^(2-n) * q^n
/// ```
///
/// and is reported as a negative head loss. Reverse flow is blocked with a
/// stiff linear penalty. A pump without a curve behaves as a lossless link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pump {
    /// Head curve, if one has been assigned
    pub curve: Option<PumpCurve>,
}

impl Pump {
    pub fn new(curve: PumpCurve) -> Self {
        Self { curve: Some(curve) }
    }

    /// Assign or replace the head curve.
    pub fn set_curve(&mut self, curve: PumpCurve) {
        self.curve = Some(curve);
    }
}

impl LinkModel for Pump {
    fn type_label(&self) -> &'static str {
        "Pump"
    }

    /// Design flow scaled by speed.
    fn init_flow(&self, _section: &Section, setting: f64) -> f64 {
        match &self.curve {
            Some(curve) => curve.q_init * setting,
            None => ZERO_FLOW,
        }
    }

    fn head_loss(&self, input: &HeadLossInput) -> HeadLoss {
        let speed = input.setting;
        if input.status == LinkStatus::TempClosed || speed <= 0.0 {
            return closed_head_loss(input.flow);
        }
        let Some(curve) = &self.curve else {
            return open_head_loss(input.flow, 0.0);
        };

        let h0 = speed * speed * curve.h0;
        let q = input.flow;
        if q < 0.0 {
            return HeadLoss {
                h_loss: -h0 + HIGH_RESISTANCE * q,
                h_grad: HIGH_RESISTANCE,
            };
        }

        let n = curve.n;
        let r = curve.r * speed.powf(2.0 - n);
        let thresh = input.flow_thresh;
        if q <= thresh {
            let h_grad = (r * thresh.powf(n - 1.0)).max(MIN_GRADIENT);
            return HeadLoss {
                h_loss: -h0 + h_grad * q,
                h_grad,
            };
        }

        HeadLoss {
            h_loss: -(h0 - r * q.powf(n)),
            h_grad: (n * r * q.powf(n - 1.0)).max(MIN_GRADIENT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::HeadLossModel;

    fn input(flow: f64, speed: f64) -> HeadLossInput {
        HeadLossInput {
            flow,
            setting: speed,
            status: LinkStatus::Open,
            flow_thresh: 1e-6,
            section: Section::default(),
            model: HeadLossModel::HazenWilliams,
            viscosity: 1.1e-5,
        }
    }

    fn pump() -> Pump {
        Pump::new(PumpCurve::single_point(10.0, 150.0).unwrap())
    }

    #[test]
    fn design_point_gain() {
        let hl = pump().head_loss(&input(10.0, 1.0));
        assert!((hl.h_loss + 150.0).abs() < 1e-9);
        assert!((hl.h_grad - 2.0 * 0.5 * 10.0).abs() < 1e-9);
    }

    #[test]
    fn gain_increases_with_speed() {
        let slow = pump().head_loss(&input(5.0, 0.8));
        let fast = pump().head_loss(&input(5.0, 1.2));
        assert!(fast.h_loss < slow.h_loss);
    }

    #[test]
    fn zero_speed_acts_closed() {
        let hl = pump().head_loss(&input(1.0, 0.0));
        assert_eq!(hl.h_grad, HIGH_RESISTANCE);
    }

    #[test]
    fn reverse_flow_is_penalized() {
        let hl = pump().head_loss(&input(-0.1, 1.0));
        assert_eq!(hl.h_grad, HIGH_RESISTANCE);
        assert!(hl.h_loss < -200.0);
    }

    #[test]
    fn no_curve_is_lossless() {
        let p = Pump::default();
        let hl = p.head_loss(&input(3.0, 1.0));
        assert_eq!(hl.h_grad, MIN_GRADIENT);
        assert_eq!(p.init_flow(&Section::default(), 1.0), ZERO_FLOW);
    }

    #[test]
    fn init_flow_scales_with_speed() {
        assert_eq!(pump().init_flow(&Section::default(), 0.5), 5.0);
    }

    #[test]
    fn pumps_have_no_reynolds_number() {
        let s = Section {
            diameter: 1.0,
            loss_coeff: 0.0,
        };
        assert_eq!(pump().reynolds(1.0, &s, 1.1e-5), 0.0);
    }
}
