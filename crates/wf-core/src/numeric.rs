use crate::{WfError, WfResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
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

pub fn ensure_finite(v: Real, what: &'static str) -> WfResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(WfError::NonFinite { what, value: v })
    }
}

/// Strictly positive and finite, or an `InvalidArg` naming `what`.
pub fn ensure_positive(v: Real, what: &'static str) -> WfResult<Real> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(WfError::InvalidArg { what })
    }
}

/// Cube root of the mean of cubes. Used for rotor-averaged inflow.
///
/// Returns 0.0 for an empty slice.
pub fn cubic_mean(values: &[Real]) -> Real {
    if values.is_empty() {
        return 0.0;
    }
    let sum: Real = values.iter().map(|v| v * v * v).sum();
    (sum / values.len() as Real).cbrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(1.0, "d").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "d"),
            Err(WfError::InvalidArg { what: "d" })
        ));
        assert!(ensure_positive(Real::INFINITY, "d").is_err());
    }

    #[test]
    fn cubic_mean_of_uniform_values() {
        assert!(nearly_equal(
            cubic_mean(&[8.0, 8.0, 8.0]),
            8.0,
            Tolerances::default()
        ));
        assert_eq!(cubic_mean(&[]), 0.0);
    }
}
