//! Farm validation logic.

use std::collections::HashMap;
use wf_core::{Real, TurbineId, ensure_positive};

use crate::error::{FarmError, FarmResult};
use crate::farm::{Turbine, TurbineType};

/// Yaw beyond this magnitude puts the rotor edge-on to the wind [rad].
pub(crate) const MAX_YAW_RAD: Real = 80.0 * std::f64::consts::PI / 180.0;

pub(crate) fn validate_types(types: &[TurbineType]) -> FarmResult<()> {
    for ty in types {
        for (value, what) in [
            (ty.rotor_diameter, "rotor diameter must be positive"),
            (ty.hub_height, "hub height must be positive"),
        ] {
            ensure_positive(value, what).map_err(|_| FarmError::InvalidGeometry {
                turbine_type: ty.id,
                what,
            })?;
        }
    }
    Ok(())
}

pub(crate) fn validate_turbines(types: &[TurbineType], turbines: &[Turbine]) -> FarmResult<()> {
    if turbines.is_empty() {
        return Err(FarmError::EmptyFarm);
    }

    // Positions keyed by bit pattern: exact duplicates only
    let mut seen: HashMap<(u64, u64), TurbineId> = HashMap::new();

    for turbine in turbines {
        if types.get(turbine.turbine_type.slot()).is_none() {
            return Err(FarmError::UnknownTurbineType {
                turbine: turbine.id,
                turbine_type: turbine.turbine_type,
            });
        }
        if !turbine.x.is_finite() || !turbine.y.is_finite() {
            return Err(FarmError::InvalidTurbine {
                turbine: turbine.id,
                what: "position must be finite",
            });
        }
        validate_yaw(turbine.id, turbine.yaw)?;
        validate_power_limit(turbine.id, turbine.power_limit)?;

        // -0.0 and 0.0 are the same place
        let key = ((turbine.x + 0.0).to_bits(), (turbine.y + 0.0).to_bits());
        if let Some(&first) = seen.get(&key) {
            return Err(FarmError::CoincidentTurbines {
                first,
                second: turbine.id,
            });
        }
        seen.insert(key, turbine.id);
    }

    Ok(())
}

pub(crate) fn validate_yaw(turbine: TurbineId, yaw: Real) -> FarmResult<()> {
    if !yaw.is_finite() || yaw.abs() > MAX_YAW_RAD {
        return Err(FarmError::InvalidTurbine {
            turbine,
            what: "yaw must be finite and within ±80°",
        });
    }
    Ok(())
}

pub(crate) fn validate_power_limit(turbine: TurbineId, limit: Option<Real>) -> FarmResult<()> {
    match limit {
        Some(p) if !p.is_finite() || p < 0.0 => Err(FarmError::InvalidTurbine {
            turbine,
            what: "power limit must be finite and non-negative",
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::Id;

    fn ty() -> TurbineType {
        TurbineType {
            id: Id::from_index(0),
            name: "T".into(),
            rotor_diameter: 126.0,
            hub_height: 90.0,
        }
    }

    fn turbine(index: u32, x: Real, y: Real) -> Turbine {
        Turbine {
            id: Id::from_index(index),
            name: format!("T{index}"),
            x,
            y,
            turbine_type: Id::from_index(0),
            yaw: 0.0,
            power_limit: None,
        }
    }

    #[test]
    fn validate_detects_coincident_turbines() {
        let turbines = vec![turbine(0, 0.0, 0.0), turbine(1, -0.0, 0.0)];
        let result = validate_turbines(&[ty()], &turbines);
        assert!(matches!(
            result,
            Err(FarmError::CoincidentTurbines { .. })
        ));
    }

    #[test]
    fn validate_detects_unknown_type() {
        let mut t = turbine(0, 0.0, 0.0);
        t.turbine_type = Id::from_index(7);
        let result = validate_turbines(&[ty()], &[t]);
        assert!(matches!(
            result,
            Err(FarmError::UnknownTurbineType { .. })
        ));
    }

    #[test]
    fn validate_rejects_nan_position() {
        let result = validate_turbines(&[ty()], &[turbine(0, Real::NAN, 0.0)]);
        assert!(matches!(result, Err(FarmError::InvalidTurbine { .. })));
    }

    #[test]
    fn validate_rejects_extreme_yaw() {
        assert!(validate_yaw(Id::from_index(0), 85.0_f64.to_radians()).is_err());
        assert!(validate_yaw(Id::from_index(0), -30.0_f64.to_radians()).is_ok());
    }

    #[test]
    fn validate_power_limit_sign() {
        assert!(validate_power_limit(Id::from_index(0), Some(-1.0)).is_err());
        assert!(validate_power_limit(Id::from_index(0), Some(0.0)).is_ok());
        assert!(validate_power_limit(Id::from_index(0), None).is_ok());
    }
}
