//! Turning a project into solver inputs.
//!
//! Model names are resolved to enum variants here, once; the solver never
//! looks at a name.

use crate::schema::{ModelDef, ModelsDef, Project};
use crate::validate::{ValidationError, validate_project};
use crate::{ProjectError, ProjectResult};
use std::collections::{BTreeMap, HashMap};
use wf_core::units::{deg, m, watts};
use wf_farm::{FarmBuilder, GridSpec, Point};
use wf_models::{
    CombinationModel, DeflectionModel, PowerParams, TabulatedCurve, VelocityDeficitModel,
};
use wf_solver::{AmbientConditions, WakeModels, WakeProblem};

/// Build a ready-to-solve problem from a project.
pub fn build_simulation(project: &Project) -> ProjectResult<WakeProblem> {
    validate_project(project)?;

    let mut builder = FarmBuilder::new();
    let mut type_ids = HashMap::new();
    for def in &project.turbine_types {
        let id = builder.add_turbine_type(&def.name, m(def.rotor_diameter_m), m(def.hub_height_m));
        type_ids.insert(def.id.as_str(), id);
    }
    for def in &project.layout {
        let type_id = type_ids
            .get(def.turbine_type.as_str())
            .copied()
            .ok_or_else(|| ValidationError::MissingReference {
                id: def.turbine_type.clone(),
                context: format!("turbine '{}' turbine_type", def.id),
            })?;
        let id = builder.add_turbine(&def.id, m(def.x_m), m(def.y_m), type_id);
        builder.set_yaw(id, deg(def.yaw_deg));
        if let Some(limit) = def.power_limit_w {
            builder.set_power_limit(id, watts(limit));
        }
    }
    let farm = builder.build()?;

    let a = &project.ambient;
    let ambient = AmbientConditions {
        wind_speeds: a.wind_speeds_mps.clone(),
        wind_directions: a.wind_directions_deg.clone(),
        shear_exponent: a.shear_exponent,
        reference_height: a.reference_height_m,
        turbulence_intensity: a.turbulence_intensity,
        air_density: a.air_density_kg_per_m3,
    };

    let mut problem = WakeProblem::new(farm, ambient, resolve_models(&project.models)?);

    for def in &project.turbine_types {
        let curve = TabulatedCurve::new(
            def.name.clone(),
            def.curve.wind_speeds_mps.clone(),
            def.curve.cp.clone(),
            def.curve.ct.clone(),
        )?;
        if let Some(&type_id) = type_ids.get(def.id.as_str()) {
            problem.add_curve(type_id, Box::new(curve))?;
        }
    }

    problem.set_grid(
        GridSpec::rotor(project.grid.rotor_points_per_side)
            .with_points(project.grid.points.iter().map(|&[x, y, z]| Point::new(x, y, z))),
    );

    problem.validate()?;
    Ok(problem)
}

/// Resolve model names and coefficient overrides.
pub fn resolve_models(def: &ModelsDef) -> ProjectResult<WakeModels> {
    let models = WakeModels {
        deflection: deflection_model(&def.deflection)?,
        velocity: velocity_model(&def.velocity)?,
        combination: CombinationModel::from_name(&def.combination)?,
        power: PowerParams {
            pp: def.yaw_power_exponent,
        },
    };
    models.validate()?;
    Ok(models)
}

fn deflection_model(def: &ModelDef) -> ProjectResult<DeflectionModel> {
    let mut model = DeflectionModel::from_name(&def.name)?;
    match &mut model {
        DeflectionModel::None => apply(&def.coefficients, "none", |_, _| false)?,
        DeflectionModel::Jimenez(p) => apply(&def.coefficients, "jimenez", |key, value| {
            match key {
                "kd" => p.kd = value,
                "ad" => p.ad = value,
                "bd" => p.bd = value,
                _ => return false,
            }
            true
        })?,
        DeflectionModel::Gauss(p) => apply(&def.coefficients, "gauss", |key, value| {
            match key {
                "ka" => p.ka = value,
                "kb" => p.kb = value,
                "alpha" => p.alpha = value,
                "beta" => p.beta = value,
                "ad" => p.ad = value,
                "bd" => p.bd = value,
                _ => return false,
            }
            true
        })?,
    }
    Ok(model)
}

fn velocity_model(def: &ModelDef) -> ProjectResult<VelocityDeficitModel> {
    let mut model = VelocityDeficitModel::from_name(&def.name)?;
    match &mut model {
        VelocityDeficitModel::Jensen(p) => apply(&def.coefficients, "jensen", |key, value| {
            match key {
                "k" => p.k = value,
                _ => return false,
            }
            true
        })?,
        VelocityDeficitModel::Gauss(p) => apply(&def.coefficients, "gauss", |key, value| {
            match key {
                "ka" => p.ka = value,
                "kb" => p.kb = value,
                "alpha" => p.alpha = value,
                "beta" => p.beta = value,
                _ => return false,
            }
            true
        })?,
    }
    Ok(model)
}

/// Feed every override to `set`; a key `set` does not know is an error.
fn apply(
    coefficients: &BTreeMap<String, f64>,
    model: &str,
    mut set: impl FnMut(&str, f64) -> bool,
) -> ProjectResult<()> {
    for (key, &value) in coefficients {
        if !set(key, value) {
            return Err(ProjectError::Validation(ValidationError::InvalidValue {
                field: format!("models.{model}.coefficients"),
                value: key.clone(),
                reason: format!("'{model}' has no coefficient named '{key}'"),
            }));
        }
    }
    Ok(())
}
