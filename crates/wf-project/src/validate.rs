//! Project validation logic.

use crate::schema::{AmbientDef, CurveDef, ModelsDef, Project, TurbineDef, TurbineTypeDef};
use std::collections::HashSet;
use wf_models::{CombinationModel, DeflectionModel, VelocityDeficitModel};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown model: {name} for {kind} (expected one of {expected})")]
    UnknownModel {
        kind: String,
        name: String,
        expected: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_ambient(&project.ambient)?;

    if project.turbine_types.is_empty() {
        return Err(invalid("turbine_types", "[]", "at least one turbine type is required"));
    }
    let mut type_ids = HashSet::new();
    for turbine_type in &project.turbine_types {
        if !type_ids.insert(&turbine_type.id) {
            return Err(ValidationError::DuplicateId {
                id: turbine_type.id.clone(),
                context: "turbine_types".to_string(),
            });
        }
        validate_turbine_type(turbine_type)?;
    }

    if project.layout.is_empty() {
        return Err(invalid("layout", "[]", "at least one turbine is required"));
    }
    let mut turbine_ids = HashSet::new();
    for turbine in &project.layout {
        if !turbine_ids.insert(&turbine.id) {
            return Err(ValidationError::DuplicateId {
                id: turbine.id.clone(),
                context: "layout".to_string(),
            });
        }
        if !type_ids.contains(&turbine.turbine_type) {
            return Err(ValidationError::MissingReference {
                id: turbine.turbine_type.clone(),
                context: format!("turbine '{}' turbine_type", turbine.id),
            });
        }
        validate_turbine(turbine)?;
    }

    validate_models(&project.models)?;

    if project.grid.rotor_points_per_side == 0 {
        return Err(invalid(
            "grid.rotor_points_per_side",
            "0",
            "at least one point per side is required",
        ));
    }

    Ok(())
}

fn validate_ambient(ambient: &AmbientDef) -> Result<(), ValidationError> {
    if ambient.wind_speeds_mps.is_empty() {
        return Err(invalid("ambient.wind_speeds_mps", "[]", "at least one speed is required"));
    }
    if ambient.wind_directions_deg.is_empty() {
        return Err(invalid(
            "ambient.wind_directions_deg",
            "[]",
            "at least one direction is required",
        ));
    }
    for &speed in &ambient.wind_speeds_mps {
        non_negative("ambient.wind_speeds_mps", speed)?;
    }
    for &direction in &ambient.wind_directions_deg {
        finite("ambient.wind_directions_deg", direction)?;
    }
    finite("ambient.shear_exponent", ambient.shear_exponent)?;
    if let Some(h) = ambient.reference_height_m {
        positive("ambient.reference_height_m", h)?;
    }
    let ti = ambient.turbulence_intensity;
    if !(ti.is_finite() && (0.0..1.0).contains(&ti)) {
        return Err(invalid(
            "ambient.turbulence_intensity",
            &ti.to_string(),
            "must lie in [0, 1)",
        ));
    }
    positive("ambient.air_density_kg_per_m3", ambient.air_density_kg_per_m3)
}

fn validate_turbine_type(turbine_type: &TurbineTypeDef) -> Result<(), ValidationError> {
    positive(
        &format!("turbine_types.{}.rotor_diameter_m", turbine_type.id),
        turbine_type.rotor_diameter_m,
    )?;
    positive(
        &format!("turbine_types.{}.hub_height_m", turbine_type.id),
        turbine_type.hub_height_m,
    )?;
    validate_curve(&turbine_type.id, &turbine_type.curve)
}

fn validate_curve(type_id: &str, curve: &CurveDef) -> Result<(), ValidationError> {
    let field = format!("turbine_types.{type_id}.curve");
    let n = curve.wind_speeds_mps.len();
    if n < 2 {
        return Err(invalid(&field, &n.to_string(), "needs at least two rows"));
    }
    if curve.cp.len() != n || curve.ct.len() != n {
        return Err(invalid(
            &field,
            &format!("{n}/{}/{}", curve.cp.len(), curve.ct.len()),
            "wind_speeds_mps, cp and ct must have equal length",
        ));
    }
    if curve.wind_speeds_mps.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(invalid(
            &format!("{field}.wind_speeds_mps"),
            &format!("{:?}", curve.wind_speeds_mps),
            "must be strictly increasing",
        ));
    }
    for &v in curve.wind_speeds_mps.iter().chain(&curve.cp).chain(&curve.ct) {
        non_negative(&field, v)?;
    }
    Ok(())
}

fn validate_turbine(turbine: &TurbineDef) -> Result<(), ValidationError> {
    finite(&format!("layout.{}.x_m", turbine.id), turbine.x_m)?;
    finite(&format!("layout.{}.y_m", turbine.id), turbine.y_m)?;
    let yaw = turbine.yaw_deg;
    if !(yaw.is_finite() && yaw.abs() < 80.0) {
        return Err(invalid(
            &format!("layout.{}.yaw_deg", turbine.id),
            &yaw.to_string(),
            "must be finite and within ±80°",
        ));
    }
    if let Some(limit) = turbine.power_limit_w {
        non_negative(&format!("layout.{}.power_limit_w", turbine.id), limit)?;
    }
    Ok(())
}

fn validate_models(models: &ModelsDef) -> Result<(), ValidationError> {
    if DeflectionModel::from_name(&models.deflection.name).is_err() {
        return Err(unknown("deflection", &models.deflection.name, DeflectionModel::NAMES));
    }
    if VelocityDeficitModel::from_name(&models.velocity.name).is_err() {
        return Err(unknown("velocity", &models.velocity.name, VelocityDeficitModel::NAMES));
    }
    if CombinationModel::from_name(&models.combination).is_err() {
        return Err(unknown("combination", &models.combination, CombinationModel::NAMES));
    }
    for (key, &value) in models
        .deflection
        .coefficients
        .iter()
        .chain(&models.velocity.coefficients)
    {
        finite(&format!("models coefficient {key}"), value)?;
    }
    positive("models.yaw_power_exponent", models.yaw_power_exponent)
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn unknown(kind: &str, name: &str, expected: &str) -> ValidationError {
    ValidationError::UnknownModel {
        kind: kind.to_string(),
        name: name.to_string(),
        expected: expected.to_string(),
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be finite"))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be finite and non-negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn sample_project() -> Project {
        Project {
            version: crate::migrate::LATEST_VERSION,
            name: "two turbines".to_string(),
            ambient: AmbientDef {
                wind_speeds_mps: vec![8.0],
                wind_directions_deg: vec![270.0],
                shear_exponent: 0.12,
                reference_height_m: None,
                turbulence_intensity: 0.06,
                air_density_kg_per_m3: 1.225,
            },
            turbine_types: vec![TurbineTypeDef {
                id: "nrel_5mw".to_string(),
                name: "NREL 5MW".to_string(),
                rotor_diameter_m: 126.0,
                hub_height_m: 90.0,
                curve: CurveDef {
                    wind_speeds_mps: vec![3.0, 11.4, 25.0],
                    cp: vec![0.0, 0.46, 0.03],
                    ct: vec![0.99, 0.74, 0.05],
                },
            }],
            layout: vec![
                TurbineDef {
                    id: "T0".to_string(),
                    x_m: 0.0,
                    y_m: 0.0,
                    turbine_type: "nrel_5mw".to_string(),
                    yaw_deg: 0.0,
                    power_limit_w: None,
                },
                TurbineDef {
                    id: "T1".to_string(),
                    x_m: 630.0,
                    y_m: 0.0,
                    turbine_type: "nrel_5mw".to_string(),
                    yaw_deg: 0.0,
                    power_limit_w: None,
                },
            ],
            models: ModelsDef::default(),
            grid: GridDef::default(),
        }
    }

    #[test]
    fn sample_is_valid() {
        validate_project(&sample_project()).unwrap();
    }

    #[test]
    fn duplicate_turbine_id() {
        let mut p = sample_project();
        p.layout[1].id = "T0".to_string();
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn missing_turbine_type() {
        let mut p = sample_project();
        p.layout[0].turbine_type = "v164".to_string();
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn unknown_model_name() {
        let mut p = sample_project();
        p.models.velocity.name = "curl".to_string();
        let err = validate_project(&p).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownModel { .. }));
        assert!(err.to_string().contains("curl"));
    }

    #[test]
    fn non_monotone_curve() {
        let mut p = sample_project();
        p.turbine_types[0].curve.wind_speeds_mps = vec![3.0, 3.0, 25.0];
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn zero_rotor_diameter() {
        let mut p = sample_project();
        p.turbine_types[0].rotor_diameter_m = 0.0;
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn future_version() {
        let mut p = sample_project();
        p.version = crate::migrate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
