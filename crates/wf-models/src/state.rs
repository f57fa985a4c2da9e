//! Inputs shared by the wake models.

use wf_core::Real;

/// What the wake models need to know about the turbine casting the wake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbineState {
    /// Rotor diameter [m]
    pub diameter: Real,
    /// Yaw misalignment [rad]
    pub yaw: Real,
    /// Thrust coefficient resolved from the turbine's inflow (not yaw-adjusted)
    pub ct: Real,
}

/// Ambient quantities the wake models read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientState {
    /// Ambient turbulence intensity, as a fraction
    pub turbulence_intensity: Real,
}
