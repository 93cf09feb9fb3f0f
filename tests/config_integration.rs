//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tentview::{AppConfig, Backend, ConfigError};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tentview_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_default_file_matches_defaults() {
    let config = AppConfig::load().unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.mesh.maxh, defaults.mesh.maxh);
    assert_eq!(config.slab.dt, defaults.slab.dt);
    assert_eq!(config.slab.wavespeed, defaults.slab.wavespeed);
    assert_eq!(config.viewer.backend, defaults.viewer.backend);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("TENTS_MESH__MAXH", "0.5");
    std::env::set_var("TENTS_VIEWER__BACKEND", "vtk");
    let config = AppConfig::load();
    std::env::remove_var("TENTS_MESH__MAXH");
    std::env::remove_var("TENTS_VIEWER__BACKEND");

    let config = config.unwrap();
    assert_eq!(config.mesh.maxh, 0.5);
    assert_eq!(config.viewer.backend, Backend::Vtk);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = scratch_dir("user_config");
    fs::write(dir.join("default.toml"), "[slab]\ndt = 0.5\nwavespeed = 1.0\ntau_factor = 1.0\n").unwrap();
    fs::write(dir.join("user.toml"), "[slab]\ndt = 0.25\nwavespeed = 2.0\ntau_factor = 0.5\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.slab.dt, 0.25);
    assert_eq!(config.slab.wavespeed, 2.0);
    assert_eq!(config.slab.tau_factor, 0.5);
    assert_eq!(config.mesh.maxh, 0.3);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_env_value_rejected_by_validate() {
    std::env::set_var("TENTS_SLAB__DT", "-1.0");
    let config = AppConfig::load();
    std::env::remove_var("TENTS_SLAB__DT");

    let err = config.unwrap().validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "slab.dt", .. }));
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    let dir = scratch_dir("bad_config");
    fs::write(dir.join("default.toml"), "[mesh]\nmaxh = \"fine\"\n").unwrap();

    assert!(matches!(AppConfig::load_from(&dir), Err(ConfigError::Load(_))));

    fs::remove_dir_all(&dir).unwrap();
}
