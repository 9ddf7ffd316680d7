use crate::NdError;

/// Floating point type used throughout the engine
pub type Real = f64;

/// Absolute + relative tolerance pair
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, NdError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NdError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero (resistances, capacitances, time steps).
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, NdError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(NdError::NonPositive { what, value: v })
    }
}
