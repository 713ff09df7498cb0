//! Reynolds-based flow threshold for head-loss linearization.
//!
//! Friction laws have a vanishing or undefined slope at zero flow, which
//! leaves the solver's Jacobian singular. Below the threshold flow each
//! variant substitutes a linear law with a well-defined slope.
//!
//! Two values are tracked:
//! - `nominal`: computed from the Reynolds transition once per step
//! - `working`: starts at `nominal` and may only shrink within the step
//!
//! `MIN_THRESH <= working <= nominal` holds after every operation.

use crate::common::{MIN_THRESH, RE_THRESH};
use crate::status::LinkStatus;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowThreshold {
    nominal: f64,
    working: f64,
}

impl Default for FlowThreshold {
    fn default() -> Self {
        Self {
            nominal: MIN_THRESH,
            working: MIN_THRESH,
        }
    }
}

impl FlowThreshold {
    /// Threshold for a link whose Reynolds number at unit flow is `re1`.
    ///
    /// Reynolds number is linear in flow, so `RE_THRESH / re1` is the flow at
    /// which the transition value is crossed. Non-positive `re1` falls back
    /// to the floor.
    pub fn from_unit_reynolds(re1: f64) -> Self {
        let q_thresh = if re1 > 0.0 { RE_THRESH / re1 } else { 0.0 };
        let q_thresh = q_thresh.max(MIN_THRESH);
        Self {
            nominal: q_thresh,
            working: q_thresh,
        }
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    pub fn working(&self) -> f64 {
        self.working
    }

    /// Shrink the linear zone toward the current flow.
    ///
    /// Applies only to open links whose working threshold is above the floor
    /// and whose flow already sits inside the linear zone. Returns whether the
    /// threshold changed.
    pub fn reduce(&mut self, status: LinkStatus, flow: f64) -> bool {
        if status != LinkStatus::Open || self.working <= MIN_THRESH {
            return false;
        }
        let q = flow.abs();
        if q < self.working {
            self.working = (q / 2.0).max(MIN_THRESH);
            return true;
        }
        false
    }

    /// Restore the working threshold to its nominal value.
    pub fn reset(&mut self) {
        self.working = self.nominal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_reynolds_400_gives_half() {
        let t = FlowThreshold::from_unit_reynolds(400.0);
        assert_eq!(t.nominal(), 0.5);
        assert_eq!(t.working(), 0.5);
    }

    #[test]
    fn degenerate_reynolds_uses_floor() {
        for re1 in [0.0, -5.0, f64::NAN] {
            let t = FlowThreshold::from_unit_reynolds(re1);
            assert_eq!(t.nominal(), MIN_THRESH);
        }
        // Huge Re collapses below the floor and is clamped
        let t = FlowThreshold::from_unit_reynolds(1e12);
        assert_eq!(t.nominal(), MIN_THRESH);
    }

    #[test]
    fn reduce_halves_toward_flow() {
        let mut t = FlowThreshold::from_unit_reynolds(400.0);
        assert!(t.reduce(LinkStatus::Open, -0.2));
        assert!((t.working() - 0.1).abs() < 1e-15);
        assert_eq!(t.nominal(), 0.5);
    }

    #[test]
    fn reduce_skips_flow_outside_zone() {
        let mut t = FlowThreshold::from_unit_reynolds(400.0);
        assert!(!t.reduce(LinkStatus::Open, 0.75));
        assert_eq!(t.working(), 0.5);
    }

    #[test]
    fn reduce_only_for_open_links() {
        for status in [LinkStatus::Closed, LinkStatus::Active, LinkStatus::TempClosed] {
            let mut t = FlowThreshold::from_unit_reynolds(400.0);
            assert!(!t.reduce(status, 0.01));
            assert_eq!(t.working(), 0.5);
        }
    }

    #[test]
    fn reduce_stops_at_floor() {
        let mut t = FlowThreshold::from_unit_reynolds(400.0);
        assert!(t.reduce(LinkStatus::Open, 0.0));
        assert_eq!(t.working(), MIN_THRESH);
        assert!(!t.reduce(LinkStatus::Open, 0.0));
        assert!(!t.reduce(LinkStatus::Open, 0.0));
    }

    #[test]
    fn reset_restores_nominal() {
        let mut t = FlowThreshold::from_unit_reynolds(400.0);
        t.reduce(LinkStatus::Open, 0.1);
        t.reset();
        assert_eq!(t.working(), t.nominal());
    }
}
