use clap::Parser;
use showcase_core::{ConfigError, Preset};
use showcase_native::cli::Args;
use std::path::PathBuf;

#[test]
fn defaults_to_recon_preset() {
    let args = Args::try_parse_from(["showcase"]).unwrap();
    assert_eq!(args.preset, "recon");
    assert_eq!(args.assets, PathBuf::from("public"));
    assert_eq!(args.simulate_frames, None);
    assert_eq!(args.log_level(), log::LevelFilter::Info);
    assert_eq!(args.showcase_config().unwrap(), Preset::Recon.config());
}

#[test]
fn parses_all_flags() {
    let args = Args::try_parse_from([
        "showcase",
        "--preset",
        "spotlight",
        "--assets",
        "site",
        "--simulate-frames",
        "120",
        "--verbose",
    ])
    .unwrap();
    assert_eq!(args.simulate_frames, Some(120));
    assert_eq!(args.log_level(), log::LevelFilter::Debug);
    assert_eq!(args.assets, PathBuf::from("site"));
    assert_eq!(args.showcase_config().unwrap(), Preset::Spotlight.config());
}

#[test]
fn unknown_preset_is_an_error() {
    let args = Args::try_parse_from(["showcase", "--preset", "nope"]).unwrap();
    assert!(matches!(
        args.showcase_config(),
        Err(ConfigError::UnknownPreset(_))
    ));
}

#[test]
fn config_file_overrides_preset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("showcase.json");
    let mut config = Preset::GlassCase.config();
    config.name = "custom".into();
    std::fs::write(&path, config.to_json().unwrap()).unwrap();

    let args = Args::try_parse_from([
        "showcase",
        "--preset",
        "recon",
        "--config",
        path.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(args.showcase_config().unwrap(), config);
}

#[test]
fn rejects_non_numeric_frame_count() {
    assert!(Args::try_parse_from(["showcase", "--simulate-frames", "lots"]).is_err());
}
