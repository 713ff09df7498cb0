//! Network-wide hydraulic options that elements read.

use pf_core::units::constants::WATER_VISCOSITY_FT2PS;

/// Friction law used by pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeadLossModel {
    /// Hazen-Williams, roughness is the C factor
    #[default]
    HazenWilliams,
    /// Darcy-Weisbach, roughness in millifeet
    DarcyWeisbach,
    /// Chezy-Manning, roughness is Manning's n
    ChezyManning,
}

/// Element options.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementOptions {
    /// Pipe friction law
    pub head_loss_model: HeadLossModel,
    /// Kinematic viscosity (ft^2/s)
    pub viscosity: f64,
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            head_loss_model: HeadLossModel::HazenWilliams,
            viscosity: WATER_VISCOSITY_FT2PS,
        }
    }
}

impl ElementOptions {
    pub fn with_head_loss_model(mut self, model: HeadLossModel) -> Self {
        self.head_loss_model = model;
        self
    }

    /// Scale viscosity relative to water at 20 C.
    pub fn with_relative_viscosity(mut self, ratio: f64) -> Self {
        self.viscosity = WATER_VISCOSITY_FT2PS * ratio;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = ElementOptions::default();
        assert_eq!(opts.head_loss_model, HeadLossModel::HazenWilliams);
        assert_eq!(opts.viscosity, 1.1e-5);
    }

    #[test]
    fn builders() {
        let opts = ElementOptions::default()
            .with_head_loss_model(HeadLossModel::DarcyWeisbach)
            .with_relative_viscosity(2.0);
        assert_eq!(opts.head_loss_model, HeadLossModel::DarcyWeisbach);
        assert!((opts.viscosity - 2.2e-5).abs() < 1e-15);
    }
}
