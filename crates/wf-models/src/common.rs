//! Common utilities for model calculations.

use crate::error::{ModelError, ModelResult};
use wf_core::{Real, ensure_finite, ensure_positive};

/// Upper clamp for thrust coefficients fed to the wake models.
///
/// Momentum theory breaks down at `Ct = 1` (`√(1 − Ct)` hits zero and the
/// Gauss widths collapse); every model clamps `Ct` into `[0, CT_MAX]` before
/// use instead of propagating NaN.
pub const CT_MAX: Real = 0.9999;

/// Thrust coefficient reported outside a curve's operating range.
pub const MIN_THRUST_COEFFICIENT: Real = 0.0001;

/// Small epsilon for near-zero induction terms
pub const EPSILON_INDUCTION: Real = 1e-12;

/// Clamp a thrust coefficient into the range every model accepts.
///
/// NaN maps to 0 (no wake).
pub fn clamp_ct(ct: Real) -> Real {
    if ct.is_nan() {
        0.0
    } else {
        clamp(ct, 0.0, CT_MAX)
    }
}

/// Axial induction factor from a (yaw-adjusted) thrust coefficient.
pub fn axial_induction(effective_ct: Real) -> Real {
    0.5 * (1.0 - (1.0 - clamp_ct(effective_ct)).sqrt())
}

/// Clamp a value between min and max.
pub fn clamp(value: Real, min: Real, max: Real) -> Real {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Coefficients must be finite and strictly positive.
pub(crate) fn check_positive(value: Real, what: &'static str) -> ModelResult<()> {
    ensure_positive(value, what)
        .map(drop)
        .map_err(|_| ModelError::InvalidCoefficient { what })
}

/// Coefficients that may be zero or negative but must be finite.
pub(crate) fn check_finite(value: Real, what: &'static str) -> ModelResult<()> {
    ensure_finite(value, what)
        .map(drop)
        .map_err(|_| ModelError::InvalidCoefficient { what })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn ct_is_clamped_not_propagated() {
        assert_eq!(clamp_ct(-0.3), 0.0);
        assert_eq!(clamp_ct(1.7), CT_MAX);
        assert_eq!(clamp_ct(Real::NAN), 0.0);
        assert_eq!(clamp_ct(0.75), 0.75);
    }

    #[test]
    fn induction_is_bounded() {
        assert_eq!(axial_induction(0.0), 0.0);
        let a = axial_induction(2.0);
        assert!(a < 0.5 && a > 0.49);
        assert!((axial_induction(0.75) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_checks() {
        assert!(check_positive(0.17, "kd").is_ok());
        assert!(check_positive(0.0, "kd").is_err());
        assert!(check_finite(-4.5, "ad").is_ok());
        assert!(check_finite(Real::INFINITY, "ad").is_err());
    }
}
