// pf-core/src/units.rs
//
// Element arithmetic runs in US customary units (ft, cfs, ft^2/s). Quantities
// enter through uom so callers can build elements from whatever units they
// hold; the `*_internal` helpers strip them to the solver's working units.

use uom::si::f64::{Length as UomLength, VolumeRate as UomVolumeRate};

pub type Length = UomLength;
pub type FlowRate = UomVolumeRate;

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn inches(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn cfs(v: f64) -> FlowRate {
    use uom::si::volume_rate::cubic_foot_per_second;
    FlowRate::new::<cubic_foot_per_second>(v)
}

#[inline]
pub fn gpm(v: f64) -> FlowRate {
    use uom::si::volume_rate::gallon_per_minute;
    FlowRate::new::<gallon_per_minute>(v)
}

#[inline]
pub fn lps(v: f64) -> FlowRate {
    use uom::si::volume_rate::liter_per_second;
    FlowRate::new::<liter_per_second>(v)
}

/// Length in feet.
#[inline]
pub fn length_internal(l: Length) -> f64 {
    use uom::si::length::foot;
    l.get::<foot>()
}

/// Flow in cubic feet per second.
#[inline]
pub fn flow_internal(q: FlowRate) -> f64 {
    use uom::si::volume_rate::cubic_foot_per_second;
    q.get::<cubic_foot_per_second>()
}

pub mod constants {
    /// Gravitational acceleration (ft/s^2).
    pub const G_FTPS2: f64 = 32.2;

    /// Kinematic viscosity of water at 20 C (ft^2/s).
    pub const WATER_VISCOSITY_FT2PS: f64 = 1.1e-5;
}
