use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use super::{ConfigError, Settings, load_settings};
use crate::model::AnatomicalSpace;
use crate::transform::{MAX_SCALE_DECIMALS, resolve_scale};

#[test]
fn defaults_match_registration_outputs() {
    let settings = Settings::default();
    assert_eq!(settings.scale_decimals, 5);
    assert_eq!(settings.downsampled_marker, "(downsampled)");
    assert_eq!(settings.registered_image_name, "Registered image");
    assert_eq!(settings.log_filter, "info");
    assert!(settings.validate().is_ok());
}

#[test]
fn yaml_settings_fill_missing_fields() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("regio.yml");
    fs::write(&path, "atlas_dir: /data/atlases\nscale_decimals: 3\n").expect("write");
    let settings = load_settings(&path).expect("settings");
    assert_eq!(settings.atlas_dir, Some(PathBuf::from("/data/atlases")));
    assert_eq!(settings.scale_decimals, 3);
    assert_eq!(settings.registered_image_name, "Registered image");
    assert_eq!(settings.atlas_root(), Some(PathBuf::from("/data/atlases")));
}

#[test]
fn json_settings_are_parsed() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("regio.json");
    fs::write(&path, r#"{"log_filter": "registration_io=debug"}"#).expect("write");
    let settings = load_settings(&path).expect("settings");
    assert_eq!(settings.log_filter, "registration_io=debug");
    assert_eq!(settings.scale_decimals, 5);
}

#[test]
fn invalid_settings_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("regio.json");
    fs::write(&path, r#"{"scale_decimals": 20}"#).expect("write");
    assert!(matches!(load_settings(&path), Err(ConfigError::Invalid(_))));

    fs::write(&path, r#"{"downsampled_marker": " "}"#).expect("write");
    assert!(matches!(load_settings(&path), Err(ConfigError::Invalid(_))));

    fs::write(&path, "{").expect("write");
    assert!(matches!(load_settings(&path), Err(ConfigError::SerdeJson(_))));
}

#[test]
fn scale_precision_limit_matches_scale_resolution() {
    let at_limit = Settings {
        scale_decimals: MAX_SCALE_DECIMALS,
        ..Settings::default()
    };
    at_limit.validate().expect("limit is accepted");
    let space = AnatomicalSpace::parse("asr").expect("space");
    resolve_scale(&space, [1.0; 3], &space, [3.0; 3], MAX_SCALE_DECIMALS).expect("scale");

    let past_limit = Settings {
        scale_decimals: MAX_SCALE_DECIMALS + 1,
        ..Settings::default()
    };
    assert!(matches!(past_limit.validate(), Err(ConfigError::Invalid(_))));
}
