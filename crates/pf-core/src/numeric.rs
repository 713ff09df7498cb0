use crate::PfError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, PfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Require a finite, strictly positive value.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, PfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PfError::InvalidArg { what })
    }
}
