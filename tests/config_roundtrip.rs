//! Configuration file persistence tests.

use cosmic_explorer::{AppConfig, AppError};

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.search.max_results = 4;
    config.search.cache_enabled = false;
    config.search.user_agent = Some("CosmicExplorer/0.1".into());
    config.search.ranking.recency = 0.25;
    config.logging.filter = "space_query=debug".into();

    config.save_to_file(&path).expect("save");
    let loaded = AppConfig::from_file(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn default_config_toml_loads_back_to_defaults() {
    let toml = AppConfig::default().to_toml().expect("serialize");
    assert!(toml.contains("[search]"));
    assert!(toml.contains("[search.ranking]"));
    assert!(toml.contains("[logging]"));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, toml).expect("write");
    assert_eq!(AppConfig::load(Some(&path)).expect("load"), AppConfig::default());
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "this is not valid toml {{{").expect("write");

    let err = AppConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn load_rejects_invalid_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[search]\nmax_results = 0\n").expect("write");

    let err = AppConfig::load(Some(&path)).unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("max_results"));
}
