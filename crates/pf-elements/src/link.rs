//! Base network link: state shared by pipes, pumps and valves.
//!
//! A link is built once through the factory, re-initialized at the start of
//! each run or time step, and mutated by the solver every iteration. It owns
//! no nodes; its end points are opaque handles into the node registry.

use pf_core::{LinkId, NodeId};
use tracing::{debug, info};

use crate::common::ZERO_FLOW;
use crate::options::ElementOptions;
use crate::pipe::Pipe;
use crate::pump::Pump;
use crate::report;
use crate::status::LinkStatus;
use crate::threshold::FlowThreshold;
use crate::traits::{HeadLoss, HeadLossInput, LinkModel, Section};
use crate::valve::Valve;

/// Concrete link variant.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkType {
    Pipe(Pipe),
    Pump(Pump),
    Valve(Valve),
}

impl LinkModel for LinkType {
    fn type_label(&self) -> &'static str {
        match self {
            LinkType::Pipe(pipe) => pipe.type_label(),
            LinkType::Pump(pump) => pump.type_label(),
            LinkType::Valve(valve) => valve.type_label(),
        }
    }

    fn init_flow(&self, section: &Section, setting: f64) -> f64 {
        match self {
            LinkType::Pipe(pipe) => pipe.init_flow(section, setting),
            LinkType::Pump(pump) => pump.init_flow(section, setting),
            LinkType::Valve(valve) => valve.init_flow(section, setting),
        }
    }

    fn head_loss(&self, input: &HeadLossInput) -> HeadLoss {
        match self {
            LinkType::Pipe(pipe) => pipe.head_loss(input),
            LinkType::Pump(pump) => pump.head_loss(input),
            LinkType::Valve(valve) => valve.head_loss(input),
        }
    }

    fn reynolds(&self, q: f64, section: &Section, viscosity: f64) -> f64 {
        match self {
            LinkType::Pipe(pipe) => pipe.reynolds(q, section, viscosity),
            LinkType::Pump(pump) => pump.reynolds(q, section, viscosity),
            LinkType::Valve(valve) => valve.reynolds(q, section, viscosity),
        }
    }

    fn unit_head_loss(&self, h_loss: f64) -> f64 {
        match self {
            LinkType::Pipe(pipe) => pipe.unit_head_loss(h_loss),
            LinkType::Pump(pump) => pump.unit_head_loss(h_loss),
            LinkType::Valve(valve) => valve.unit_head_loss(h_loss),
        }
    }
}

/// A pipe, pump or valve joining two nodes.
#[derive(Debug, Clone)]
pub struct Link {
    id: LinkId,
    name: String,
    link_type: LinkType,
    /// Keep this link's time series for output
    pub rpt_flag: bool,

    from_node: Option<NodeId>,
    to_node: Option<NodeId>,

    // configuration
    init_status: LinkStatus,
    init_setting: f64,
    section: Section,

    // runtime state
    status: LinkStatus,
    setting: f64,
    flow: f64,
    leakage: f64,
    h_loss: f64,
    h_grad: f64,
    quality: f64,
    threshold: FlowThreshold,
}

impl Link {
    /// Fresh link with default configuration: open, setting 1, no geometry.
    pub(crate) fn new(id: LinkId, name: String, link_type: LinkType) -> Self {
        Self {
            id,
            name,
            link_type,
            rpt_flag: false,
            from_node: None,
            to_node: None,
            init_status: LinkStatus::Open,
            init_setting: 1.0,
            section: Section::default(),
            status: LinkStatus::Closed,
            setting: 0.0,
            flow: ZERO_FLOW,
            leakage: 0.0,
            h_loss: 0.0,
            h_grad: 0.0,
            quality: 0.0,
            threshold: FlowThreshold::default(),
        }
    }

    // ---- identity -------------------------------------------------------

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_label(&self) -> &'static str {
        self.link_type.type_label()
    }

    pub fn link_type(&self) -> &LinkType {
        &self.link_type
    }

    /// Variant data, for build-time configuration.
    pub fn link_type_mut(&mut self) -> &mut LinkType {
        &mut self.link_type
    }

    pub fn from_node(&self) -> Option<NodeId> {
        self.from_node
    }

    pub fn to_node(&self) -> Option<NodeId> {
        self.to_node
    }

    pub fn set_nodes(&mut self, from: NodeId, to: NodeId) {
        self.from_node = Some(from);
        self.to_node = Some(to);
    }

    // ---- configuration --------------------------------------------------

    pub fn init_status(&self) -> LinkStatus {
        self.init_status
    }

    pub fn set_init_status(&mut self, status: LinkStatus) {
        self.init_status = status;
    }

    pub fn init_setting(&self) -> f64 {
        self.init_setting
    }

    pub fn set_init_setting(&mut self, setting: f64) {
        self.init_setting = setting;
    }

    pub fn diameter(&self) -> f64 {
        self.section.diameter
    }

    pub fn loss_coeff(&self) -> f64 {
        self.section.loss_coeff
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Set bore geometry. Build phase only; the solver never changes it.
    pub fn set_section(&mut self, diameter: f64, loss_coeff: f64) {
        self.section = Section {
            diameter,
            loss_coeff,
        };
    }

    // ---- runtime state --------------------------------------------------

    pub fn status(&self) -> LinkStatus {
        self.status
    }

    /// Set status without reporting. Closing clamps flow.
    pub fn set_status(&mut self, status: LinkStatus) {
        self.status = status;
        if status == LinkStatus::Closed {
            self.flow = ZERO_FLOW;
        }
    }

    pub fn setting(&self) -> f64 {
        self.setting
    }

    pub fn set_setting(&mut self, setting: f64) {
        self.setting = setting;
    }

    /// Signed flow; positive runs from `from_node` to `to_node`.
    pub fn flow(&self) -> f64 {
        self.flow
    }

    /// Store a new flow. A closed link keeps its fixed near-zero flow.
    pub fn set_flow(&mut self, flow: f64) {
        self.flow = if self.status == LinkStatus::Closed {
            ZERO_FLOW
        } else {
            flow
        };
    }

    pub fn leakage(&self) -> f64 {
        self.leakage
    }

    pub fn set_leakage(&mut self, leakage: f64) {
        self.leakage = leakage;
    }

    pub fn h_loss(&self) -> f64 {
        self.h_loss
    }

    pub fn h_grad(&self) -> f64 {
        self.h_grad
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn set_quality(&mut self, quality: f64) {
        self.quality = quality;
    }

    /// Mean velocity, zero for links without a bore.
    pub fn velocity(&self) -> f64 {
        let area = self.section.area();
        if area > 0.0 { self.flow.abs() / area } else { 0.0 }
    }

    // ---- lifecycle ------------------------------------------------------

    /// Reset status and setting to their configured values.
    ///
    /// A closed link always ends up at the fixed near-zero flow. Otherwise,
    /// with `re_init_flow`, the flow is re-estimated from the variant.
    /// Leakage always returns to zero.
    pub fn initialize(&mut self, re_init_flow: bool) {
        self.status = self.init_status;
        self.setting = self.init_setting;
        if self.status == LinkStatus::Closed {
            self.flow = ZERO_FLOW;
        } else if re_init_flow {
            self.flow = self.link_type.init_flow(&self.section, self.setting);
        }
        self.leakage = 0.0;
    }

    // ---- flow threshold -------------------------------------------------

    /// Recompute the linearization threshold for fluid `viscosity`.
    ///
    /// Resets the working threshold to the new nominal value.
    pub fn set_flow_threshold(&mut self, viscosity: f64) {
        let re1 = self.link_type.reynolds(1.0, &self.section, viscosity);
        self.threshold = FlowThreshold::from_unit_reynolds(re1);
        debug!(
            link = %self.name,
            re1,
            flow_thresh = self.threshold.nominal(),
            "flow threshold set"
        );
    }

    /// Shrink the working threshold when the link is open and its flow has
    /// settled inside the linear zone. Returns false when nothing changed.
    pub fn reduce_flow_threshold(&mut self) -> bool {
        let reduced = self.threshold.reduce(self.status, self.flow);
        if reduced {
            debug!(
                link = %self.name,
                flow = self.flow,
                flow_thresh = self.threshold.working(),
                "flow threshold reduced"
            );
        }
        reduced
    }

    /// Undo any reductions made during the current step.
    pub fn reset_flow_threshold(&mut self) {
        self.threshold.reset();
    }

    /// Working threshold the head-loss law currently uses.
    pub fn flow_threshold(&self) -> f64 {
        self.threshold.working()
    }

    /// Threshold computed by the last `set_flow_threshold`.
    pub fn nominal_flow_threshold(&self) -> f64 {
        self.threshold.nominal()
    }

    /// Reynolds number at the current flow.
    pub fn reynolds(&self, viscosity: f64) -> f64 {
        self.link_type.reynolds(self.flow, &self.section, viscosity)
    }

    // ---- head loss ------------------------------------------------------

    /// Evaluate head loss and gradient at the current flow and store them.
    pub fn find_head_loss(&mut self, options: &ElementOptions) -> HeadLoss {
        let hl = if self.status == LinkStatus::Closed {
            crate::common::closed_head_loss(self.flow)
        } else {
            self.link_type.head_loss(&HeadLossInput {
                flow: self.flow,
                setting: self.setting,
                status: self.status,
                flow_thresh: self.threshold.working(),
                section: self.section,
                model: options.head_loss_model,
                viscosity: options.viscosity,
            })
        };
        self.h_loss = hl.h_loss;
        self.h_grad = hl.h_grad;
        hl
    }

    /// Head loss from the last evaluation, normalized by the variant.
    pub fn unit_head_loss(&self) -> f64 {
        self.link_type.unit_head_loss(self.h_loss)
    }

    // ---- reporting ------------------------------------------------------

    /// Report line for a change from `old_status` to the current status.
    pub fn write_status_change(&self, old_status: LinkStatus) -> String {
        report::status_change(self.type_label(), &self.name, old_status, self.status)
    }

    /// Move to `new_status` and log the transition.
    ///
    /// Returns the report line when the status actually changed.
    pub fn change_status(&mut self, new_status: LinkStatus) -> Option<String> {
        let old = self.status;
        self.set_status(new_status);
        if old == new_status {
            return None;
        }
        let msg = self.write_status_change(old);
        info!("{}", msg.trim_start());
        Some(msg)
    }
}
