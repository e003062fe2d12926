// Host-side tests for preset definitions and JSON configs.

use showcase_core::{ConfigError, Preset, ShowcaseConfig, SpinAxis};
use std::io::Write;

#[test]
fn preset_names_round_trip() {
    for preset in Preset::ALL {
        assert_eq!(Preset::from_name(preset.name()).unwrap(), preset);
    }
    assert_eq!(Preset::from_name("Glass-Case").unwrap(), Preset::GlassCase);
    assert!(matches!(
        Preset::from_name("museum"),
        Err(ConfigError::UnknownPreset(_))
    ));
}

#[test]
fn recon_is_the_two_point_light_pedestal() {
    let c = Preset::Recon.config();
    assert!(c.lights.ambient && c.lights.point);
    assert!(!c.lights.directional && !c.lights.spot);
    assert_eq!(c.spin.axis, SpinAxis::Z);
    assert!((c.assets.product.scale - 0.1).abs() < 1e-6);
    assert_eq!(c.assets.product.node, Some(0));
    assert_eq!(c.camera.start, [0.0, 3.0, 20.0]);
    assert_eq!(c.camera.intro_target, [0.0, 3.6, 5.8]);
}

#[test]
fn case_presets_load_the_glass_case() {
    assert!(Preset::GlassCase.config().assets.case.is_some());
    assert!(Preset::Environment.config().assets.case.is_some());
    assert!(Preset::Environment.config().assets.environment.is_some());
    assert!(Preset::Spotlight.config().lights.spot);
}

#[test]
fn config_survives_a_json_file() {
    let config = Preset::Studio.config();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.to_json().unwrap().as_bytes()).unwrap();
    let loaded = ShowcaseConfig::load(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn minimal_json_fills_in_defaults() {
    let json = r#"{ "name": "tiny", "assets": { "product": { "url": "a.glb" } } }"#;
    let c = ShowcaseConfig::from_json(json).unwrap();
    assert_eq!(c.name, "tiny");
    assert!((c.assets.product.scale - 1.0).abs() < 1e-6);
    assert_eq!(c.params.fog_color, "#21222c");
    assert!(c.lights.point);
    assert_eq!(c.spin.axis, SpinAxis::Y);
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match ShowcaseConfig::load(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert!(p.ends_with("absent.json")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn invalid_json_is_an_error() {
    assert!(matches!(
        ShowcaseConfig::from_json("{ not json"),
        Err(ConfigError::Json(_))
    ));
}
