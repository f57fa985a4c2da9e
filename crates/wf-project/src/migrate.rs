//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files wrote model names as free text ("Jimenez", " SOSFS").
/// Version 1 stores the canonical lowercase names.
fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    let models = &mut project.models;
    models.deflection.name = canonical(&models.deflection.name);
    models.velocity.name = canonical(&models.velocity.name);
    models.combination = canonical(&models.combination);
    project.version = 1;
    Ok(project)
}

fn canonical(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AmbientDef, GridDef, ModelDef, ModelsDef};

    fn project(version: u32, models: ModelsDef) -> Project {
        Project {
            version,
            name: "test".to_string(),
            ambient: AmbientDef {
                wind_speeds_mps: vec![8.0],
                wind_directions_deg: vec![270.0],
                shear_exponent: 0.12,
                reference_height_m: None,
                turbulence_intensity: 0.06,
                air_density_kg_per_m3: 1.225,
            },
            turbine_types: vec![],
            layout: vec![],
            models,
            grid: GridDef::default(),
        }
    }

    #[test]
    fn migrate_latest_is_noop() {
        let p = project(LATEST_VERSION, ModelsDef::default());
        let migrated = migrate_to_latest(p.clone()).unwrap();
        assert_eq!(migrated, p);
    }

    #[test]
    fn migrate_v0_normalises_model_names() {
        let models = ModelsDef {
            deflection: ModelDef::named(" Jimenez"),
            velocity: ModelDef::named("GAUSS"),
            combination: "Sosfs ".to_string(),
            yaw_power_exponent: 1.88,
        };
        let migrated = migrate_to_latest(project(0, models)).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert_eq!(migrated.models, ModelsDef::default());
    }
}
