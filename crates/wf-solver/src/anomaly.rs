//! Numerical anomalies recorded during a solve.

use wf_core::{Real, TurbineId};
use wf_farm::RejectReason;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnomalyKind {
    /// A deficit evaluated to NaN or infinity; treated as no wake.
    NonFiniteDeficit { value: Real },
    /// A deficit left `[0, 1]`; clamped.
    DeficitOutOfRange { value: Real },
    /// The combined velocity fell outside `[0, freestream]`; clamped.
    VelocityClamped { raw: Real, clamped: Real },
    /// A rotor-averaged inflow was not finite; treated as calm air.
    NonFiniteInflow { value: Real },
    /// A free sample point could not be evaluated.
    RejectedPoint { reason: RejectReason },
}

/// One anomaly, located by case, casting turbine and sample point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anomaly {
    pub case: usize,
    /// Turbine whose pass produced the anomaly
    pub turbine: Option<TurbineId>,
    /// Sample point index in the case grid
    pub point: Option<usize>,
    pub kind: AnomalyKind,
}

impl Anomaly {
    pub(crate) fn log(&self) {
        tracing::warn!(
            case = self.case,
            turbine = ?self.turbine,
            point = ?self.point,
            kind = ?self.kind,
            "numerical anomaly"
        );
    }
}
