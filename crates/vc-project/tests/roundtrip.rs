use vc_fluids::Refrigerant;
use vc_project::*;

const MINIMAL: &str = r#"
version: 1
name: minimal
fluid: r-134a
design:
  rating: { capacity_w: 100000, power_input_w: 40000 }
  superheat_k: 5
  subcool_k: 5
  temperatures: { mode: given, t_evap_k: 278.15, t_cond_k: 313.15 }
actual:
  suction_pressure_pa: 300000
  discharge_pressure_pa: 1100000
  superheat_k: 6
"#;

#[test]
fn minimal_yaml_takes_defaults() {
    let config = from_yaml_str(MINIMAL).unwrap();
    assert_eq!(config.fluid, Refrigerant::R134a);
    assert_eq!(config.compressor, CompressorDef::default());
    assert_eq!(config.fit, FitDef::default());
    assert!(config.site.is_none());
}

#[test]
fn roundtrip_yaml_and_json() {
    let config = from_yaml_str(MINIMAL).unwrap();
    let dir = std::env::temp_dir();

    let yaml_path = dir.join("vc_project_roundtrip.yaml");
    save_yaml(&yaml_path, &config).unwrap();
    assert_eq!(load_yaml(&yaml_path).unwrap(), config);

    let json_path = dir.join("vc_project_roundtrip.json");
    save_json(&json_path, &config).unwrap();
    assert_eq!(load(&json_path).unwrap(), config);
}

#[test]
fn save_refuses_invalid_config() {
    let mut config = from_yaml_str(MINIMAL).unwrap();
    config.fit.tolerance = -1.0;
    let path = std::env::temp_dir().join("vc_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &config),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn unknown_fluid_and_mode_are_rejected() {
    let bad_fluid = MINIMAL.replace("r-134a", "R999");
    assert!(matches!(from_yaml_str(&bad_fluid), Err(ProjectError::Yaml(_))));

    let bad_mode = MINIMAL.replace("mode: given", "mode: guessed");
    assert!(matches!(from_yaml_str(&bad_mode), Err(ProjectError::Yaml(_))));
}

#[test]
fn wrong_version_is_a_validation_error() {
    let v2 = MINIMAL.replace("version: 1", "version: 2");
    assert!(matches!(
        from_yaml_str(&v2),
        Err(ProjectError::Validation(ValidationError::UnsupportedVersion { version: 2 }))
    ));
}
