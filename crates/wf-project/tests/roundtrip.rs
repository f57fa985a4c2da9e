use wf_project::schema::*;
use wf_project::{load_json, load_yaml, parse_yaml, save_json, save_yaml};

const MINIMAL: &str = r#"
version: 1
name: Minimal
ambient:
  wind_speeds_mps: [8.0]
  wind_directions_deg: [270.0]
turbine_types:
  - id: t
    name: Generic
    rotor_diameter_m: 126.0
    hub_height_m: 90.0
    curve:
      wind_speeds_mps: [3.0, 25.0]
      cp: [0.45, 0.45]
      ct: [0.8, 0.8]
layout:
  - id: A
    x_m: 0.0
    y_m: 0.0
    turbine_type: t
"#;

#[test]
fn defaults_fill_omitted_sections() {
    let project = parse_yaml(MINIMAL).unwrap();
    assert_eq!(project.ambient.shear_exponent, 0.12);
    assert_eq!(project.ambient.turbulence_intensity, 0.06);
    assert_eq!(project.models, ModelsDef::default());
    assert_eq!(project.grid, GridDef::default());
    assert_eq!(project.layout[0].yaw_deg, 0.0);
}

#[test]
fn roundtrip_yaml() {
    let mut project = parse_yaml(MINIMAL).unwrap();
    project.layout[0].power_limit_w = Some(4.0e6);
    project.grid.points.push([500.0, 0.0, 90.0]);
    project
        .models
        .deflection
        .coefficients
        .insert("kd".to_string(), 0.2);

    let path = std::env::temp_dir().join("wf_project_roundtrip.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json() {
    let project = parse_yaml(MINIMAL).unwrap();

    let path = std::env::temp_dir().join("wf_project_roundtrip.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn version_zero_files_are_migrated() {
    let legacy = MINIMAL
        .replace("version: 1", "version: 0")
        .replace("turbine_types:", "models:\n  combination: ' Max'\nturbine_types:");
    let project = parse_yaml(&legacy).unwrap();
    assert_eq!(project.version, wf_project::LATEST_VERSION);
    assert_eq!(project.models.combination, "max");
}

#[test]
fn invalid_files_are_rejected_on_load() {
    let broken = MINIMAL.replace("turbine_type: t", "turbine_type: missing");
    assert!(matches!(
        parse_yaml(&broken),
        Err(wf_project::ProjectError::Validation(_))
    ));
}
