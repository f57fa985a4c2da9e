//! Turbine operating-state resolver.
//!
//! Maps the rotor-averaged inflow of one turbine to its thrust and power:
//!
//! ```text
//! Ct      = curve.ct(U)
//! Ct_eff  = Ct·cos γ
//! a       = ½(1 − √(1 − Ct_eff))
//! P       = min(½ ρ A Cp U³ cos(γ)^pP, P_limit)
//! ```

use crate::common::{axial_induction, check_positive, clamp_ct};
use crate::curve::PerformanceCurve;
use crate::error::ModelResult;
use wf_core::Real;

/// Yaw power-loss exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerParams {
    pub pp: Real,
}

impl Default for PowerParams {
    fn default() -> Self {
        Self { pp: 1.88 }
    }
}

impl PowerParams {
    pub fn validate(&self) -> ModelResult<()> {
        check_positive(self.pp, "yaw power exponent must be positive")
    }
}

/// Resolved state of one turbine for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OperatingState {
    /// Rotor-averaged inflow speed [m/s]
    pub inflow_speed: Real,
    /// Thrust coefficient from the curve, clamped into `[0, CT_MAX]`
    pub ct: Real,
    /// `Ct·cos γ`
    pub effective_ct: Real,
    pub axial_induction: Real,
    pub cp: Real,
    /// Electrical power after derating [W]
    pub power: Real,
}

/// Resolve one turbine's operating state.
///
/// Non-finite or negative inflow is treated as calm air.
pub fn resolve_operating_state(
    curve: &dyn PerformanceCurve,
    inflow_speed: Real,
    yaw: Real,
    rotor_area: Real,
    air_density: Real,
    params: &PowerParams,
    power_limit: Option<Real>,
) -> OperatingState {
    let speed = if inflow_speed.is_finite() {
        inflow_speed.max(0.0)
    } else {
        0.0
    };

    let ct = clamp_ct(curve.thrust_coefficient(speed));
    let cos_yaw = yaw.cos();
    let effective_ct = ct * cos_yaw;
    let cp = curve.power_coefficient(speed).max(0.0);

    let available =
        0.5 * air_density * rotor_area * cp * speed.powi(3) * cos_yaw.max(0.0).powf(params.pp);
    let power = match power_limit {
        Some(limit) => available.min(limit),
        None => available,
    };

    OperatingState {
        inflow_speed: speed,
        ct,
        effective_ct,
        axial_induction: axial_induction(effective_ct),
        cp,
        power,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MIN_THRUST_COEFFICIENT;
    use crate::curve::TabulatedCurve;

    fn curve() -> TabulatedCurve {
        TabulatedCurve::new(
            "flat",
            vec![3.0, 25.0],
            vec![0.4, 0.4],
            vec![0.75, 0.75],
        )
        .unwrap()
    }

    fn area() -> Real {
        std::f64::consts::PI * 63.0 * 63.0
    }

    #[test]
    fn power_matches_actuator_disk() {
        let s = resolve_operating_state(
            &curve(),
            8.0,
            0.0,
            area(),
            1.225,
            &PowerParams::default(),
            None,
        );
        let expected = 0.5 * 1.225 * area() * 0.4 * 512.0;
        assert!((s.power - expected).abs() < 1e-6);
        assert_eq!(s.ct, 0.75);
        assert!((s.axial_induction - 0.25).abs() < 1e-12);
    }

    #[test]
    fn yaw_reduces_thrust_and_power() {
        let p = PowerParams::default();
        let straight = resolve_operating_state(&curve(), 8.0, 0.0, area(), 1.225, &p, None);
        let yawed = resolve_operating_state(&curve(), 8.0, 0.4, area(), 1.225, &p, None);
        assert_eq!(yawed.ct, straight.ct);
        assert!(yawed.effective_ct < straight.effective_ct);
        let ratio = yawed.power / straight.power;
        assert!((ratio - 0.4_f64.cos().powf(1.88)).abs() < 1e-12);
    }

    #[test]
    fn power_limit_caps_output() {
        let s = resolve_operating_state(
            &curve(),
            12.0,
            0.0,
            area(),
            1.225,
            &PowerParams::default(),
            Some(1.0e6),
        );
        assert_eq!(s.power, 1.0e6);
    }

    #[test]
    fn below_cut_in_is_idle() {
        let s = resolve_operating_state(
            &curve(),
            2.0,
            0.0,
            area(),
            1.225,
            &PowerParams::default(),
            None,
        );
        assert_eq!(s.ct, MIN_THRUST_COEFFICIENT);
        assert_eq!(s.power, 0.0);
    }

    #[test]
    fn calm_or_broken_inflow_gives_zero_power() {
        for u in [0.0, -3.0, Real::NAN] {
            let s = resolve_operating_state(
                &curve(),
                u,
                0.0,
                area(),
                1.225,
                &PowerParams::default(),
                None,
            );
            assert_eq!(s.inflow_speed, 0.0);
            assert_eq!(s.power, 0.0);
            assert!(s.ct.is_finite());
        }
    }
}
