//! Wake combination laws.
//!
//! Each law folds one turbine's deficit into the running velocity at a point.
//! Deficits are fractions of the local freestream `U`, so the absolute deficit
//! a wake contributes is `U·d`:
//!
//! ```text
//! Sosfs:  u' = U − √((U − u)² + (U·d)²)
//! Fls:    u' = u − U·d
//! Max:    u' = min(u, U·(1 − d))
//! ```
//!
//! The result is clamped into `[0, U]`.
//!
//! ## Ordering
//!
//! All three laws are commutative in exact arithmetic, but the sum of squares
//! and the linear sum are evaluated in floating point, so folding the same
//! deficits in a different order can differ in the last few ulps. Callers that
//! compare fields built from different turbine orders should use a relative
//! tolerance of about `1e-12`; the solver itself fixes the order so repeated
//! solves are bit-identical.

use crate::common::clamp;
use crate::error::{ModelError, ModelResult};
use wf_core::Real;

/// Outcome of one combination step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combined {
    pub velocity: Real,
    /// Raw value before clamping, when it fell outside `[0, U]` or was NaN.
    pub clamped_from: Option<Real>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CombinationModel {
    /// Sum of squares of freestream-scaled deficits
    #[default]
    Sosfs,
    /// Linear sum of freestream-scaled deficits
    Fls,
    /// Largest single deficit
    Max,
}

impl CombinationModel {
    pub const NAMES: &'static str = "sosfs, fls, max";

    pub fn from_name(name: &str) -> ModelResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sosfs" => Ok(CombinationModel::Sosfs),
            "fls" => Ok(CombinationModel::Fls),
            "max" => Ok(CombinationModel::Max),
            _ => Err(ModelError::UnknownModel {
                name: name.to_string(),
                expected: Self::NAMES,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CombinationModel::Sosfs => "sosfs",
            CombinationModel::Fls => "fls",
            CombinationModel::Max => "max",
        }
    }

    /// Fold `deficit` into `current` at a point whose freestream is `freestream`.
    pub fn combine(&self, current: Real, freestream: Real, deficit: Real) -> Combined {
        if deficit == 0.0 {
            return Combined {
                velocity: current,
                clamped_from: None,
            };
        }

        let absolute = freestream * deficit;
        let raw = match self {
            CombinationModel::Sosfs => freestream - (freestream - current).hypot(absolute),
            CombinationModel::Fls => current - absolute,
            CombinationModel::Max => current.min(freestream - absolute),
        };

        let upper = freestream.max(0.0);
        if raw.is_nan() || raw < 0.0 || raw > upper {
            Combined {
                velocity: if raw.is_nan() { 0.0 } else { clamp(raw, 0.0, upper) },
                clamped_from: Some(raw),
            }
        } else {
            Combined {
                velocity: raw,
                clamped_from: None,
            }
        }
    }
}
