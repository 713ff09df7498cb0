//! Flow-control valves.

use crate::common::{
    HIGH_RESISTANCE, MIN_GRADIENT, bore_reynolds, closed_head_loss, minor_loss_resistance,
    open_head_loss,
};
use crate::error::ElementError;
use crate::status::LinkStatus;
use crate::traits::{HeadLoss, HeadLossInput, LinkModel, Section};
use core::str::FromStr;

/// Valve type; fixes what the link setting means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValveType {
    /// Pressure reducing valve, setting is downstream pressure head
    Prv,
    /// Pressure sustaining valve, setting is upstream pressure head
    Psv,
    /// Flow control valve, setting is maximum flow
    Fcv,
    /// Throttle control valve, setting is a loss coefficient
    #[default]
    Tcv,
    /// Pressure breaker valve, setting is a fixed head drop
    Pbv,
}

impl FromStr for ValveType {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRV" => Ok(ValveType::Prv),
            "PSV" => Ok(ValveType::Psv),
            "FCV" => Ok(ValveType::Fcv),
            "TCV" => Ok(ValveType::Tcv),
            "PBV" => Ok(ValveType::Pbv),
            _ => Err(ElementError::UnknownValveType {
                label: s.to_string(),
            }),
        }
    }
}

/// Setting-driven valve.
///
/// Fully open (`Open`) the valve behaves as a minor loss. When `Active` its
/// setting takes over. Pressure-regulating types (PRV, PSV) leave the active
/// head loss to the solver, which imposes the regulated head directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valve {
    pub valve_type: ValveType,
}

impl Valve {
    pub fn new(valve_type: ValveType) -> Self {
        Self { valve_type }
    }

    fn active_head_loss(&self, input: &HeadLossInput) -> HeadLoss {
        let q = input.flow;
        let open = open_head_loss(q, input.section.minor_loss());
        match self.valve_type {
            ValveType::Tcv => {
                let km = minor_loss_resistance(input.setting, input.section.diameter);
                open_head_loss(q, km)
            }
            ValveType::Pbv => {
                // A fully open valve already drops more than the setting
                if open.h_loss.abs() >= input.setting {
                    return open;
                }
                HeadLoss {
                    h_loss: input.setting * q.signum(),
                    h_grad: MIN_GRADIENT,
                }
            }
            ValveType::Fcv => {
                if q <= input.setting {
                    return open;
                }
                HeadLoss {
                    h_loss: open.h_loss + HIGH_RESISTANCE * (q - input.setting),
                    h_grad: HIGH_RESISTANCE,
                }
            }
            ValveType::Prv | ValveType::Psv => HeadLoss::default(),
        }
    }
}

impl LinkModel for Valve {
    fn type_label(&self) -> &'static str {
        "Valve"
    }

    /// Flow at a velocity of 1 ft/s.
    fn init_flow(&self, section: &Section, _setting: f64) -> f64 {
        section.area()
    }

    fn head_loss(&self, input: &HeadLossInput) -> HeadLoss {
        match input.status {
            LinkStatus::Active => self.active_head_loss(input),
            LinkStatus::TempClosed | LinkStatus::Closed => closed_head_loss(input.flow),
            LinkStatus::Open => open_head_loss(input.flow, input.section.minor_loss()),
        }
    }

    fn reynolds(&self, q: f64, section: &Section, viscosity: f64) -> f64 {
        bore_reynolds(q, section.diameter, viscosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::HeadLossModel;

    fn input(flow: f64, setting: f64, status: LinkStatus) -> HeadLossInput {
        HeadLossInput {
            flow,
            setting,
            status,
            flow_thresh: 1e-6,
            section: Section {
                diameter: 0.5,
                loss_coeff: 0.2,
            },
            model: HeadLossModel::HazenWilliams,
            viscosity: 1.1e-5,
        }
    }

    #[test]
    fn parse_types() {
        assert_eq!("prv".parse::<ValveType>().unwrap(), ValveType::Prv);
        assert_eq!(
            "GPV".parse::<ValveType>(),
            Err(ElementError::UnknownValveType {
                label: "GPV".into()
            })
        );
    }

    #[test]
    fn open_valve_is_minor_loss() {
        let v = Valve::new(ValveType::Prv);
        let hl = v.head_loss(&input(1.0, 50.0, LinkStatus::Open));
        let km = minor_loss_resistance(0.2, 0.5);
        assert!((hl.h_loss - km).abs() < 1e-12);
        assert!((hl.h_grad - 2.0 * km).abs() < 1e-12);
    }

    #[test]
    fn tcv_setting_raises_loss() {
        let v = Valve::new(ValveType::Tcv);
        let low = v.head_loss(&input(1.0, 1.0, LinkStatus::Active));
        let high = v.head_loss(&input(1.0, 10.0, LinkStatus::Active));
        assert!(high.h_loss > low.h_loss);
    }

    #[test]
    fn fcv_penalizes_excess_flow() {
        let v = Valve::new(ValveType::Fcv);
        let under = v.head_loss(&input(0.5, 1.0, LinkStatus::Active));
        let over = v.head_loss(&input(1.5, 1.0, LinkStatus::Active));
        assert!(under.h_grad < HIGH_RESISTANCE);
        assert_eq!(over.h_grad, HIGH_RESISTANCE);
        assert!(over.h_loss > 0.5 * HIGH_RESISTANCE - 1.0);
    }

    #[test]
    fn pbv_fixes_head_drop() {
        let v = Valve::new(ValveType::Pbv);
        let hl = v.head_loss(&input(0.1, 20.0, LinkStatus::Active));
        assert_eq!(hl.h_loss, 20.0);
        assert_eq!(hl.h_grad, MIN_GRADIENT);
    }

    #[test]
    fn pressure_valves_defer_to_solver() {
        for t in [ValveType::Prv, ValveType::Psv] {
            let hl = Valve::new(t).head_loss(&input(1.0, 50.0, LinkStatus::Active));
            assert_eq!(hl, HeadLoss::default());
        }
    }

    #[test]
    fn temp_closed_blocks_flow() {
        let hl = Valve::default().head_loss(&input(1.0, 1.0, LinkStatus::TempClosed));
        assert_eq!(hl.h_grad, HIGH_RESISTANCE);
    }
}
