//! Velocity-deficit models.
//!
//! A deficit is the fractional reduction of the local freestream speed caused
//! by one upstream rotor, evaluated in that rotor's wind-aligned frame:
//!
//! ```text
//! x  = point.x − hub.x                       (downstream distance)
//! dy = point.y − (hub.y + δ_lateral(x))      (offset from deflected centerline)
//! dz = point.z − (hub.z + δ_vertical(x))
//! ```
//!
//! Every model returns exactly 0 for `x ≤ 0` and a value in `[0, 1]`
//! otherwise. Profiles are continuous across the wake edge.
//!
//! `raw_deficit` is the unclamped profile, for callers that flag values
//! outside `[0, 1]`; `deficit` clamps it (NaN becomes 0).

use nalgebra::Point3;

use crate::common::{axial_induction, check_positive, clamp, clamp_ct};
use crate::deflection::DeflectionTrajectory;
use crate::error::{ModelError, ModelResult};
use crate::gauss::{GaussCoefficients, GaussGeometry};
use crate::state::{AmbientState, TurbineState};
use wf_core::Real;

/// Jensen (1983) wake with the cosine radial profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JensenParams {
    /// Linear wake expansion rate
    pub k: Real,
}

impl Default for JensenParams {
    fn default() -> Self {
        Self { k: 0.05 }
    }
}

/// Bastankhah & Porté-Agel (2016) Gaussian wake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussVelocityParams {
    pub ka: Real,
    pub kb: Real,
    pub alpha: Real,
    pub beta: Real,
}

impl Default for GaussVelocityParams {
    fn default() -> Self {
        Self {
            ka: 0.38,
            kb: 0.004,
            alpha: 0.58,
            beta: 0.077,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VelocityDeficitModel {
    Jensen(JensenParams),
    Gauss(GaussVelocityParams),
}

impl Default for VelocityDeficitModel {
    fn default() -> Self {
        VelocityDeficitModel::Gauss(GaussVelocityParams::default())
    }
}

impl VelocityDeficitModel {
    pub const NAMES: &'static str = "jensen, gauss";

    /// Model with default coefficients, by configuration name.
    pub fn from_name(name: &str) -> ModelResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "jensen" => Ok(VelocityDeficitModel::Jensen(JensenParams::default())),
            "gauss" => Ok(VelocityDeficitModel::Gauss(GaussVelocityParams::default())),
            _ => Err(ModelError::UnknownModel {
                name: name.to_string(),
                expected: Self::NAMES,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VelocityDeficitModel::Jensen(_) => "jensen",
            VelocityDeficitModel::Gauss(_) => "gauss",
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        match self {
            VelocityDeficitModel::Jensen(p) => {
                check_positive(p.k, "jensen k must be positive")
            }
            VelocityDeficitModel::Gauss(p) => {
                if !p.ka.is_finite() || p.ka < 0.0 {
                    return Err(ModelError::InvalidCoefficient {
                        what: "gauss ka must be non-negative",
                    });
                }
                check_positive(p.kb, "gauss kb must be positive")?;
                check_positive(p.alpha, "gauss alpha must be positive")?;
                check_positive(p.beta, "gauss beta must be positive")
            }
        }
    }

    /// Precompute one turbine's wake.
    pub fn wake(&self, state: &TurbineState, ambient: &AmbientState) -> WakeProfile {
        let shape = match self {
            VelocityDeficitModel::Jensen(p) => {
                let effective_ct = clamp_ct(state.ct) * state.yaw.cos();
                Profile::Jensen {
                    amplitude: 2.0 * axial_induction(effective_ct),
                    radius: 0.5 * state.diameter,
                    k: p.k,
                }
            }
            VelocityDeficitModel::Gauss(p) => {
                let coef = GaussCoefficients {
                    ka: p.ka,
                    kb: p.kb,
                    alpha: p.alpha,
                    beta: p.beta,
                };
                Profile::Gauss(GaussGeometry::new(&coef, state, ambient))
            }
        };
        WakeProfile { shape }
    }
}

/// One turbine's precomputed deficit field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WakeProfile {
    shape: Profile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Profile {
    Jensen {
        /// Centerline deficit at the rotor, `2a`
        amplitude: Real,
        radius: Real,
        k: Real,
    },
    Gauss(GaussGeometry),
}

impl WakeProfile {
    /// Deficit at downstream distance `x` and offsets `(dy, dz)` from the
    /// deflected centerline.
    pub fn deficit(&self, x: Real, dy: Real, dz: Real) -> Real {
        clamp_fraction(self.raw_deficit(x, dy, dz))
    }

    /// Profile value before clamping. May leave `[0, 1]` or be NaN for
    /// degenerate inputs.
    pub fn raw_deficit(&self, x: Real, dy: Real, dz: Real) -> Real {
        if !(x > 0.0) {
            return 0.0;
        }
        match self.shape {
            Profile::Jensen {
                amplitude,
                radius,
                k,
            } => {
                let wake_radius = radius + k * x;
                let r = dy.hypot(dz);
                if !(r < wake_radius) {
                    return 0.0;
                }
                let expansion = radius / wake_radius;
                let shape = 0.5 * (1.0 + (std::f64::consts::PI * r / wake_radius).cos());
                amplitude * expansion * expansion * shape
            }
            Profile::Gauss(g) => {
                let (sy, sz) = g.sigmas(x);
                let ramp = if x < g.x0 { x / g.x0 } else { 1.0 };
                let d2 = g.diameter * g.diameter;
                let core = 1.0 - g.ct_yaw * d2 / (8.0 * sy * sz);
                let centerline = 1.0 - core.max(0.0).sqrt();
                let spread = (-0.5 * ((dy / sy).powi(2) + (dz / sz).powi(2))).exp();
                ramp * centerline * spread
            }
        }
    }

    /// Deficit at a wind-frame point, given the casting turbine's hub and
    /// centerline trajectory.
    pub fn deficit_at(
        &self,
        point: &Point3<Real>,
        hub: &Point3<Real>,
        trajectory: &DeflectionTrajectory,
    ) -> Real {
        clamp_fraction(self.raw_deficit_at(point, hub, trajectory))
    }

    /// `deficit_at` before clamping.
    pub fn raw_deficit_at(
        &self,
        point: &Point3<Real>,
        hub: &Point3<Real>,
        trajectory: &DeflectionTrajectory,
    ) -> Real {
        let x = point.x - hub.x;
        if !(x > 0.0) {
            return 0.0;
        }
        let offset = trajectory.offset(x);
        let dy = point.y - (hub.y + offset.lateral);
        let dz = point.z - (hub.z + offset.vertical);
        self.raw_deficit(x, dy, dz)
    }
}

fn clamp_fraction(value: Real) -> Real {
    if value.is_nan() {
        0.0
    } else {
        clamp(value, 0.0, 1.0)
    }
}

/// One-shot deficit of `model` at `point`, for callers that evaluate a single
/// point and do not keep the per-turbine precomputation.
pub fn deficit(
    model: &VelocityDeficitModel,
    point: &Point3<Real>,
    hub: &Point3<Real>,
    trajectory: &DeflectionTrajectory,
    state: &TurbineState,
    ambient: &AmbientState,
) -> Real {
    model.wake(state, ambient).deficit_at(point, hub, trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deflection::{DeflectionModel, JimenezParams};

    const D: Real = 126.0;

    fn state(yaw_deg: Real) -> TurbineState {
        TurbineState {
            diameter: D,
            yaw: yaw_deg.to_radians(),
            ct: 0.8,
        }
    }

    fn ambient() -> AmbientState {
        AmbientState {
            turbulence_intensity: 0.06,
        }
    }

    fn models() -> [VelocityDeficitModel; 2] {
        [
            VelocityDeficitModel::Jensen(JensenParams::default()),
            VelocityDeficitModel::Gauss(GaussVelocityParams::default()),
        ]
    }

    #[test]
    fn zero_at_and_upstream_of_rotor() {
        for model in models() {
            let wake = model.wake(&state(0.0), &ambient());
            assert_eq!(wake.deficit(0.0, 0.0, 0.0), 0.0);
            assert_eq!(wake.deficit(-10.0, 0.0, 0.0), 0.0);
            assert_eq!(wake.deficit(Real::NAN, 0.0, 0.0), 0.0);
        }
    }

    #[test]
    fn clamped_form_hides_degenerate_offsets() {
        let gauss = VelocityDeficitModel::Gauss(GaussVelocityParams::default())
            .wake(&state(0.0), &ambient());
        assert!(gauss.raw_deficit(3.0 * D, Real::NAN, 0.0).is_nan());
        assert_eq!(gauss.deficit(3.0 * D, Real::NAN, 0.0), 0.0);

        for model in models() {
            let wake = model.wake(&state(0.0), &ambient());
            let raw = wake.raw_deficit(3.0 * D, 10.0, 5.0);
            assert_eq!(wake.deficit(3.0 * D, 10.0, 5.0), raw);
        }
    }

    #[test]
    fn on_centerline_is_a_valid_fraction() {
        for model in models() {
            let wake = model.wake(&state(0.0), &ambient());
            for x in [1.0, 0.5 * D, 3.0 * D, 7.0 * D, 30.0 * D] {
                let d = wake.deficit(x, 0.0, 0.0);
                assert!(d > 0.0 && d <= 1.0, "{} at {x}: {d}", model.name());
            }
        }
    }

    #[test]
    fn recovers_downstream() {
        for model in models() {
            let wake = model.wake(&state(0.0), &ambient());
            let near = wake.deficit(6.0 * D, 0.0, 0.0);
            let far = wake.deficit(15.0 * D, 0.0, 0.0);
            assert!(far < near, "{}", model.name());
        }
    }

    #[test]
    fn decays_away_from_centerline() {
        for model in models() {
            let wake = model.wake(&state(0.0), &ambient());
            let center = wake.deficit(5.0 * D, 0.0, 0.0);
            let side = wake.deficit(5.0 * D, 0.4 * D, 0.0);
            let up = wake.deficit(5.0 * D, 0.0, 0.4 * D);
            assert!(side < center && up < center, "{}", model.name());
        }
    }

    #[test]
    fn jensen_is_continuous_at_wake_edge() {
        let wake = VelocityDeficitModel::Jensen(JensenParams::default()).wake(&state(0.0), &ambient());
        let x = 4.0 * D;
        let edge = 0.5 * D + 0.05 * x;
        let inside = wake.deficit(x, edge * (1.0 - 1e-9), 0.0);
        assert!(inside < 1e-12);
        assert_eq!(wake.deficit(x, edge, 0.0), 0.0);
        assert_eq!(wake.deficit(x, edge + 1.0, 0.0), 0.0);
    }

    #[test]
    fn jensen_centerline_matches_closed_form() {
        let wake = VelocityDeficitModel::Jensen(JensenParams::default()).wake(&state(0.0), &ambient());
        let x = 5.0 * D;
        let r = 0.5 * D;
        let expected = 2.0 * 0.5 * (1.0 - (1.0_f64 - 0.8).sqrt()) * (r / (r + 0.05 * x)).powi(2);
        assert!((wake.deficit(x, 0.0, 0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn deflected_wake_moves_its_peak() {
        let s = state(25.0);
        let trajectory = DeflectionModel::Jimenez(JimenezParams::default()).trajectory(&s, &ambient());
        let wake = VelocityDeficitModel::default().wake(&s, &ambient());
        let hub = Point3::new(0.0, 0.0, 90.0);
        let x = 5.0 * D;
        let shift = trajectory.offset(x).lateral;

        let on_axis = wake.deficit_at(&Point3::new(x, 0.0, 90.0), &hub, &trajectory);
        let on_center = wake.deficit_at(&Point3::new(x, shift, 90.0), &hub, &trajectory);
        assert!(shift > 0.0);
        assert!(on_center > on_axis);
    }

    #[test]
    fn one_shot_matches_precomputed() {
        let s = state(10.0);
        let model = VelocityDeficitModel::default();
        let trajectory = DeflectionModel::default().trajectory(&s, &ambient());
        let hub = Point3::new(100.0, 50.0, 90.0);
        let p = Point3::new(800.0, 70.0, 95.0);
        let a = deficit(&model, &p, &hub, &trajectory, &s, &ambient());
        let b = model.wake(&s, &ambient()).deficit_at(&p, &hub, &trajectory);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_thrust_casts_no_wake() {
        let s = TurbineState {
            diameter: D,
            yaw: 0.0,
            ct: 0.0,
        };
        let calm = AmbientState {
            turbulence_intensity: 0.0,
        };
        for model in models() {
            let wake = model.wake(&s, &calm);
            assert_eq!(wake.deficit(300.0, 0.0, 0.0), 0.0, "{}", model.name());
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(VelocityDeficitModel::from_name("curl").is_err());
        assert_eq!(VelocityDeficitModel::from_name("JENSEN").unwrap().name(), "jensen");
    }
}
