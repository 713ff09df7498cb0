//! Capability set shared by pipes, pumps and valves.

use crate::options::HeadLossModel;
use crate::status::LinkStatus;

/// Head loss across a link and its derivative with respect to flow.
///
/// Pumps report head gain as negative loss.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadLoss {
    pub h_loss: f64,
    pub h_grad: f64,
}

/// Bore geometry owned by the base link.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Inside diameter (ft)
    pub diameter: f64,
    /// Minor-loss K factor (dimensionless)
    pub loss_coeff: f64,
}

impl Section {
    pub fn area(&self) -> f64 {
        crate::common::circle_area(self.diameter)
    }

    /// Minor-loss K factor as a head-loss resistance.
    pub fn minor_loss(&self) -> f64 {
        crate::common::minor_loss_resistance(self.loss_coeff, self.diameter)
    }
}

/// Everything a variant needs to evaluate its head-loss law.
#[derive(Debug, Clone, Copy)]
pub struct HeadLossInput {
    pub flow: f64,
    pub setting: f64,
    pub status: LinkStatus,
    /// Working flow threshold; below it the law is linearized.
    pub flow_thresh: f64,
    pub section: Section,
    pub model: HeadLossModel,
    /// Kinematic viscosity (ft^2/s)
    pub viscosity: f64,
}

/// Behavior a concrete link variant provides.
///
/// The base link owns status, setting, flow and thresholds; variants only
/// supply the physics.
pub trait LinkModel {
    /// Label used in reports ("Pipe", "Pump", "Valve").
    fn type_label(&self) -> &'static str;

    /// Starting flow estimate for an open link.
    fn init_flow(&self, section: &Section, setting: f64) -> f64;

    /// Head loss and gradient at the input's flow.
    ///
    /// Called for any status except `Closed`, which the base link handles.
    fn head_loss(&self, input: &HeadLossInput) -> HeadLoss;

    /// Reynolds number at flow `q`.
    ///
    /// Links without a meaningful bore return 0, which pins their flow
    /// threshold to the floor.
    fn reynolds(&self, _q: f64, _section: &Section, _viscosity: f64) -> f64 {
        0.0
    }

    /// Head loss normalized for reporting.
    fn unit_head_loss(&self, h_loss: f64) -> f64 {
        h_loss
    }
}
