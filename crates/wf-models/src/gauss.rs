//! Wake geometry shared by the Gaussian deflection and deficit models
//! (Bastankhah & Porté-Agel).

use crate::common::{clamp_ct, EPSILON_INDUCTION};
use crate::state::{AmbientState, TurbineState};
use wf_core::Real;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GaussCoefficients {
    pub ka: Real,
    pub kb: Real,
    pub alpha: Real,
    pub beta: Real,
}

/// Per-turbine constants of the Gaussian wake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GaussGeometry {
    pub diameter: Real,
    pub yaw: Real,
    pub ct: Real,
    /// `Ct·cos γ`
    pub ct_yaw: Real,
    /// Potential-core length [m]
    pub x0: Real,
    /// Wake growth rates
    pub ky: Real,
    pub kz: Real,
    /// Wake widths at `x0` [m]
    pub sigma_y0: Real,
    pub sigma_z0: Real,
    /// `1 − u0/U`, the near-wake velocity deficit
    pub c0: Real,
}

impl GaussGeometry {
    pub fn new(coef: &GaussCoefficients, state: &TurbineState, ambient: &AmbientState) -> Self {
        let d = state.diameter;
        let ct = clamp_ct(state.ct);
        let cos_yaw = state.yaw.cos();
        let ct_yaw = ct * cos_yaw;
        let ti = ambient.turbulence_intensity.max(0.0);

        let sqrt_1_ct = (1.0 - ct).sqrt();
        let induction_term = 1.0 - (1.0 - ct_yaw).sqrt();

        // uR/U; tends to 1 as Ct → 0
        let ur_ratio = if induction_term > EPSILON_INDUCTION {
            ct_yaw / (2.0 * induction_term)
        } else {
            1.0
        };
        let u0_ratio = sqrt_1_ct;

        let sigma_z0 = d * 0.5 * (ur_ratio / (1.0 + u0_ratio)).sqrt();
        let sigma_y0 = sigma_z0 * cos_yaw;

        let core_denominator =
            std::f64::consts::SQRT_2 * (4.0 * coef.alpha * ti + 2.0 * coef.beta * (1.0 - sqrt_1_ct));
        let x0 = if core_denominator > 0.0 {
            d * cos_yaw * (1.0 + sqrt_1_ct) / core_denominator
        } else {
            Real::INFINITY
        };

        let k = coef.ka * ti + coef.kb;

        Self {
            diameter: d,
            yaw: state.yaw,
            ct,
            ct_yaw,
            x0,
            ky: k,
            kz: k,
            sigma_y0,
            sigma_z0,
            c0: 1.0 - u0_ratio,
        }
    }

    /// Wake widths at downstream distance `x` (constant inside the core).
    pub fn sigmas(&self, x: Real) -> (Real, Real) {
        if x < self.x0 {
            (self.sigma_y0, self.sigma_z0)
        } else {
            (
                self.ky * (x - self.x0) + self.sigma_y0,
                self.kz * (x - self.x0) + self.sigma_z0,
            )
        }
    }
}
