//! Wake deflection models.
//!
//! A yawed rotor pushes its wake sideways. The models here map downstream
//! distance behind the rotor to the offset of the wake centerline, in the
//! wind-aligned frame. All of them share these properties:
//!
//! - the offset is exactly 0 at (and upstream of) the rotor
//! - the offset is exactly 0 when yaw is 0, because the driving term carries
//!   `sin γ` (Jimenez: `cos γ·sin γ·Ct`, Gauss: `γ·(1 − √(1 − Ct cos γ))`)
//! - the lateral offset has the sign of the yaw angle
//! - thrust coefficients outside `[0, CT_MAX]` are clamped first
//!
//! None of the models tilt the wake, so the vertical offset is always 0.

use crate::common::{check_finite, check_positive, clamp_ct};
use crate::error::{ModelError, ModelResult};
use crate::gauss::{GaussCoefficients, GaussGeometry};
use crate::state::{AmbientState, TurbineState};
use wf_core::Real;

/// Centerline offset at one downstream distance [m].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub lateral: Real,
    pub vertical: Real,
}

/// Jimenez et al. (2010) deflection with a linear far-wake correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JimenezParams {
    /// Wake deflection growth rate
    pub kd: Real,
    /// Constant term of the far-wake correction [m]
    pub ad: Real,
    /// Linear term of the far-wake correction [m/m]
    pub bd: Real,
}

impl Default for JimenezParams {
    fn default() -> Self {
        Self {
            kd: 0.17,
            ad: 0.0,
            bd: 0.0,
        }
    }
}

impl JimenezParams {
    pub fn validate(&self) -> ModelResult<()> {
        check_positive(self.kd, "jimenez kd must be positive")?;
        check_finite(self.ad, "jimenez ad must be finite")?;
        check_finite(self.bd, "jimenez bd must be finite")
    }
}

/// Bastankhah & Porté-Agel (2016) deflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussDeflectionParams {
    pub ka: Real,
    pub kb: Real,
    pub alpha: Real,
    pub beta: Real,
    pub ad: Real,
    pub bd: Real,
}

impl Default for GaussDeflectionParams {
    fn default() -> Self {
        Self {
            ka: 0.38,
            kb: 0.004,
            alpha: 0.58,
            beta: 0.077,
            ad: 0.0,
            bd: 0.0,
        }
    }
}

impl GaussDeflectionParams {
    pub fn validate(&self) -> ModelResult<()> {
        check_finite(self.ka, "gauss ka must be finite")?;
        if self.ka < 0.0 {
            return Err(ModelError::InvalidCoefficient {
                what: "gauss ka must be non-negative",
            });
        }
        check_positive(self.kb, "gauss kb must be positive")?;
        check_positive(self.alpha, "gauss alpha must be positive")?;
        check_positive(self.beta, "gauss beta must be positive")?;
        check_finite(self.ad, "gauss ad must be finite")?;
        check_finite(self.bd, "gauss bd must be finite")
    }

    fn coefficients(&self) -> GaussCoefficients {
        GaussCoefficients {
            ka: self.ka,
            kb: self.kb,
            alpha: self.alpha,
            beta: self.beta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeflectionModel {
    None,
    Jimenez(JimenezParams),
    Gauss(GaussDeflectionParams),
}

impl Default for DeflectionModel {
    fn default() -> Self {
        DeflectionModel::Jimenez(JimenezParams::default())
    }
}

impl DeflectionModel {
    pub const NAMES: &'static str = "none, jimenez, gauss";

    /// Model with default coefficients, by configuration name.
    pub fn from_name(name: &str) -> ModelResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Ok(DeflectionModel::None),
            "jimenez" => Ok(DeflectionModel::Jimenez(JimenezParams::default())),
            "gauss" => Ok(DeflectionModel::Gauss(GaussDeflectionParams::default())),
            _ => Err(ModelError::UnknownModel {
                name: name.to_string(),
                expected: Self::NAMES,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeflectionModel::None => "none",
            DeflectionModel::Jimenez(_) => "jimenez",
            DeflectionModel::Gauss(_) => "gauss",
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        match self {
            DeflectionModel::None => Ok(()),
            DeflectionModel::Jimenez(p) => p.validate(),
            DeflectionModel::Gauss(p) => p.validate(),
        }
    }

    /// Precompute the centerline trajectory of one turbine.
    pub fn trajectory(&self, state: &TurbineState, ambient: &AmbientState) -> DeflectionTrajectory {
        let correction = |ad: Real, bd: Real| Correction {
            sin_2yaw: (2.0 * state.yaw).sin(),
            ad,
            bd,
            diameter: state.diameter,
        };

        match self {
            DeflectionModel::None => DeflectionTrajectory::straight(),
            DeflectionModel::Jimenez(p) => {
                let d = state.diameter;
                let ct = clamp_ct(state.ct);
                let xi = 0.5 * state.yaw.cos() * state.yaw.sin() * ct;
                DeflectionTrajectory {
                    shape: Shape::Jimenez {
                        xi,
                        far: xi * d * (15.0 + xi * xi) / (30.0 * p.kd),
                        kd: p.kd,
                        diameter: d,
                        correction: correction(p.ad, p.bd),
                    },
                }
            }
            DeflectionModel::Gauss(p) => {
                let geometry = GaussGeometry::new(&p.coefficients(), state, ambient);
                if state.yaw == 0.0 || geometry.ct_yaw <= 0.0 {
                    return DeflectionTrajectory::straight();
                }
                let theta_c0 = 0.3 * state.yaw / state.yaw.cos()
                    * (1.0 - (1.0 - geometry.ct_yaw).sqrt());
                let m0 = geometry.c0 * (2.0 - geometry.c0);
                let e0 = geometry.c0 * geometry.c0 - 3.0 * (1.0_f64 / 12.0).exp() * geometry.c0
                    + 3.0 * (1.0_f64 / 3.0).exp();
                let far_scale = theta_c0 * e0 / 5.2
                    * (geometry.sigma_y0 * geometry.sigma_z0 / (geometry.ky * geometry.kz * m0))
                        .sqrt();
                DeflectionTrajectory {
                    shape: Shape::Gauss {
                        delta0: theta_c0.tan() * geometry.x0,
                        far_scale,
                        sqrt_m0: m0.sqrt(),
                        geometry,
                        correction: correction(p.ad, p.bd),
                    },
                }
            }
        }
    }
}

/// Far-wake correction `sin 2γ·(ad·(1 − e^{−x/D}) + bd·x)`.
///
/// Scaled by `sin 2γ` so it vanishes with yaw, and ramped in so it vanishes
/// at the rotor.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Correction {
    sin_2yaw: Real,
    ad: Real,
    bd: Real,
    diameter: Real,
}

impl Correction {
    fn at(&self, x: Real) -> Real {
        self.sin_2yaw * (self.ad * (1.0 - (-x / self.diameter).exp()) + self.bd * x)
    }
}

/// A turbine's wake centerline as a function of downstream distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeflectionTrajectory {
    shape: Shape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Straight,
    Jimenez {
        xi: Real,
        far: Real,
        kd: Real,
        diameter: Real,
        correction: Correction,
    },
    Gauss {
        delta0: Real,
        far_scale: Real,
        sqrt_m0: Real,
        geometry: GaussGeometry,
        correction: Correction,
    },
}

impl DeflectionTrajectory {
    /// A centerline that never leaves the rotor axis.
    pub fn straight() -> Self {
        Self {
            shape: Shape::Straight,
        }
    }

    /// Centerline offset at downstream distance `x` [m].
    pub fn offset(&self, x: Real) -> Offset {
        if x <= 0.0 || x.is_nan() {
            return Offset::default();
        }
        let lateral = match self.shape {
            Shape::Straight => 0.0,
            Shape::Jimenez {
                xi,
                far,
                kd,
                diameter,
                correction,
            } => {
                let a = 1.0 + 2.0 * kd * x / diameter;
                let a4 = a * a * a * a;
                let near = xi * (15.0 * a4 + xi * xi) / ((30.0 * kd / diameter) * a4 * a);
                far - near + correction.at(x)
            }
            Shape::Gauss {
                delta0,
                far_scale,
                sqrt_m0,
                geometry,
                correction,
            } => {
                let base = if x < geometry.x0 {
                    delta0 * x / geometry.x0
                } else {
                    let (sy, sz) = geometry.sigmas(x);
                    let ratio = (sy * sz / (geometry.sigma_y0 * geometry.sigma_z0)).sqrt();
                    let ln_arg = ((1.6 + sqrt_m0) * (1.6 * ratio - sqrt_m0))
                        / ((1.6 - sqrt_m0) * (1.6 * ratio + sqrt_m0));
                    delta0 + far_scale * ln_arg.ln()
                };
                base + correction.at(x)
            }
        };
        Offset {
            lateral,
            vertical: 0.0,
        }
    }
}
