use buysmart_web::config::{AppConfig, LogFormat};
use buysmart_web::theme::Theme;
use serial_test::serial;
use std::env;
use std::fs;

const BIN: &str = "buysmart-web";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("BUYSMART_SERVER__PORT");
        env::remove_var("BUYSMART_UI__DEFAULT_THEME");
        env::remove_var("BUYSMART_TELEMETRY__LOG_FORMAT");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("HOST");
        env::remove_var("RATE_LIMIT_ENABLED");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args([BIN]).expect("defaults should load");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.ui.default_theme, Theme::Light);
    assert!(config.resilience.rate_limit_enabled);
    assert_eq!(config.assets.chunk_size_warning_kb, 1000);
    assert_eq!(config.assets.chunks.len(), 2);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("BUYSMART_SERVER__PORT", "9090");
        env::set_var("BUYSMART_UI__DEFAULT_THEME", "dark");
        env::set_var("BUYSMART_TELEMETRY__LOG_FORMAT", "json");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.ui.default_theme, Theme::Dark);
    assert_eq!(config.telemetry.log_format, LogFormat::Json);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("buysmart.yaml");
    fs::write(
        &file_path,
        r#"
server:
  port: 7070
resilience:
  rate_limit_enabled: false
"#,
    )
    .expect("Failed to write temp config");

    unsafe {
        env::set_var("CONFIG_FILE", &file_path);
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert!(!config.resilience.rate_limit_enabled);
    // Untouched sections keep their defaults.
    assert_eq!(config.security.token_ttl_minutes, 720);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env_and_file() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("buysmart.yaml");
    fs::write(&file_path, "server:\n  port: 7070\n").unwrap();
    unsafe {
        env::set_var("BUYSMART_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args([
        BIN,
        "--config",
        file_path.to_str().unwrap(),
        "--port",
        "4040",
        "--rate-limit-enabled",
        "false",
    ])
    .expect("Failed to load config");
    assert_eq!(config.server.port, 4040);
    assert!(!config.resilience.rate_limit_enabled);

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args([BIN, "--config", "/nonexistent/buysmart.yaml"]);
    assert!(result.is_err());
}
