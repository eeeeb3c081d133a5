//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use ballsweep::config::AppConfig;
use ballsweep_core::SweepBoundsError;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SWEEP_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("SWEEP_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("SWEEP_SWEEP__STEP", "0.25");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.sweep.step, 0.25);
    assert_eq!(config.sweep.bounds().unwrap().step(), 0.25);
    std::env::remove_var("SWEEP_SWEEP__STEP");
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("SWEEP_WINDOW__TITLE");
    std::env::remove_var("SWEEP_SWEEP__STEP");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let from_file = AppConfig::load_from(cwd.join("config")).unwrap();
    let builtin = AppConfig::default();
    assert_eq!(from_file.camera.position, builtin.camera.position);
    assert_eq!(from_file.camera.look_at, builtin.camera.look_at);
    assert_eq!(from_file.sweep.start_point, builtin.sweep.start_point);
    assert_eq!(from_file.sweep.end_point, builtin.sweep.end_point);
    assert_eq!(from_file.scene.spin_rate, builtin.scene.spin_rate);
    assert_eq!(from_file.rendering.clear_rgba(), builtin.rendering.clear_rgba());
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.title, "Ball Sweep");
    assert_eq!(config.controls.max_distance, 6000.0);
}

#[test]
#[serial]
fn test_inverted_bounds_from_env_rejected() {
    std::env::set_var("SWEEP_SWEEP__START_POINT", "20");
    let config = AppConfig::load().unwrap();
    assert!(matches!(
        config.sweep.bounds(),
        Err(SweepBoundsError::InvertedBounds { .. })
    ));
    std::env::remove_var("SWEEP_SWEEP__START_POINT");
}

#[test]
#[serial]
fn test_bad_value_is_an_error() {
    std::env::set_var("SWEEP_WINDOW__WIDTH", "wide");
    let result = AppConfig::load();
    std::env::remove_var("SWEEP_WINDOW__WIDTH");
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
