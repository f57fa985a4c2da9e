//! Project schema definitions.
//!
//! Units are carried in field names; angles are degrees.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub ambient: AmbientDef,
    #[serde(default)]
    pub turbine_types: Vec<TurbineTypeDef>,
    #[serde(default)]
    pub layout: Vec<TurbineDef>,
    #[serde(default)]
    pub models: ModelsDef,
    #[serde(default)]
    pub grid: GridDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmbientDef {
    pub wind_speeds_mps: Vec<f64>,
    pub wind_directions_deg: Vec<f64>,
    #[serde(default = "default_shear")]
    pub shear_exponent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_height_m: Option<f64>,
    #[serde(default = "default_turbulence_intensity")]
    pub turbulence_intensity: f64,
    #[serde(default = "default_air_density")]
    pub air_density_kg_per_m3: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurbineTypeDef {
    pub id: String,
    pub name: String,
    pub rotor_diameter_m: f64,
    pub hub_height_m: f64,
    pub curve: CurveDef,
}

/// Tabulated performance curve, one row per wind speed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveDef {
    pub wind_speeds_mps: Vec<f64>,
    pub cp: Vec<f64>,
    pub ct: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurbineDef {
    pub id: String,
    pub x_m: f64,
    pub y_m: f64,
    pub turbine_type: String,
    #[serde(default)]
    pub yaw_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_limit_w: Option<f64>,
}

/// A model by name, with coefficient overrides on top of its defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub coefficients: BTreeMap<String, f64>,
}

impl ModelDef {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            coefficients: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelsDef {
    #[serde(default = "default_deflection")]
    pub deflection: ModelDef,
    #[serde(default = "default_velocity")]
    pub velocity: ModelDef,
    #[serde(default = "default_combination")]
    pub combination: String,
    #[serde(default = "default_yaw_power_exponent")]
    pub yaw_power_exponent: f64,
}

impl Default for ModelsDef {
    fn default() -> Self {
        Self {
            deflection: default_deflection(),
            velocity: default_velocity(),
            combination: default_combination(),
            yaw_power_exponent: default_yaw_power_exponent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridDef {
    #[serde(default = "default_points_per_side")]
    pub rotor_points_per_side: usize,
    /// Extra sample points, world frame `[x, y, z]` in metres
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<[f64; 3]>,
}

impl Default for GridDef {
    fn default() -> Self {
        Self {
            rotor_points_per_side: default_points_per_side(),
            points: Vec::new(),
        }
    }
}

fn default_shear() -> f64 {
    0.12
}

fn default_turbulence_intensity() -> f64 {
    0.06
}

fn default_air_density() -> f64 {
    wf_core::units::constants::AIR_DENSITY_KGPM3
}

fn default_deflection() -> ModelDef {
    ModelDef::named("jimenez")
}

fn default_velocity() -> ModelDef {
    ModelDef::named("gauss")
}

fn default_combination() -> String {
    "sosfs".to_string()
}

fn default_yaw_power_exponent() -> f64 {
    1.88
}

fn default_points_per_side() -> usize {
    wf_farm::grid::DEFAULT_POINTS_PER_SIDE
}
