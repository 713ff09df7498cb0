//! Error types for element construction and configuration.

use pf_core::error::PfError;
use thiserror::Error;

/// Errors raised while building or configuring an element.
///
/// Solver-facing operations never fail; degenerate inputs there fall back to
/// numerical floors instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid pump curve: {what}")]
    InvalidCurve { what: &'static str },

    #[error("Unknown link status code {code}")]
    UnknownStatus { code: i32 },

    #[error("Unknown link status label '{label}'")]
    UnknownStatusLabel { label: String },

    #[error("Unknown valve type '{label}'")]
    UnknownValveType { label: String },

    #[error("Unknown link type code {code}")]
    UnknownKind { code: i32 },

    #[error("Arena error: {message}")]
    Arena { message: String },
}

pub type ElementResult<T> = Result<T, ElementError>;

impl From<PfError> for ElementError {
    fn from(e: PfError) -> Self {
        match e {
            PfError::NonFinite { what, .. } => ElementError::NonPhysical { what },
            PfError::InvalidArg { what } => ElementError::InvalidArg { what },
            other => ElementError::Arena {
                message: other.to_string(),
            },
        }
    }
}

impl From<ElementError> for PfError {
    fn from(e: ElementError) -> Self {
        match e {
            ElementError::NonPhysical { what } => PfError::InvalidArg { what },
            ElementError::InvalidArg { what } => PfError::InvalidArg { what },
            ElementError::InvalidCurve { what } => PfError::InvalidArg { what },
            ElementError::UnknownStatus { .. } | ElementError::UnknownStatusLabel { .. } => {
                PfError::InvalidArg {
                    what: "link status",
                }
            }
            ElementError::UnknownKind { .. } => PfError::InvalidArg { what: "link type" },
            ElementError::UnknownValveType { .. } => PfError::InvalidArg { what: "valve type" },
            ElementError::Arena { .. } => PfError::Invariant {
                what: "arena allocation",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ElementError::InvalidCurve {
            what: "heads must decrease with flow",
        };
        assert!(err.to_string().contains("heads must decrease"));
        assert_eq!(
            ElementError::UnknownStatus { code: 7 }.to_string(),
            "Unknown link status code 7"
        );
        assert_eq!(
            ElementError::UnknownValveType {
                label: "GPV".into()
            }
            .to_string(),
            "Unknown valve type 'GPV'"
        );
    }

    #[test]
    fn error_conversion() {
        let err = ElementError::InvalidArg { what: "test" };
        let pf: PfError = err.into();
        assert!(matches!(pf, PfError::InvalidArg { what: "test" }));

        let back: ElementError = PfError::ArenaFull { len: 3 }.into();
        assert!(matches!(back, ElementError::Arena { .. }));
    }
}
