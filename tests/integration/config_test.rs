//! Environment configuration tests
//!
//! These mutate process environment variables, so they run serially.

use std::time::Duration;

use blockdoc::shared::{AppConfig, ConfigError};
use serial_test::serial;

const VARS: [&str; 7] = [
    "BLOCKDOC_CONFIG",
    "BIND_ADDR",
    "SERVER_PORT",
    "DATABASE_URL",
    "JWT_SECRET",
    "STORE_TIMEOUT_MS",
    "RUST_LOG",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_requires_jwt_secret() {
    clear_env();

    let result = AppConfig::from_env();

    assert!(matches!(result, Err(ConfigError::MissingValue(_))));
}

#[test]
#[serial]
fn test_from_env_reads_variables() {
    clear_env();
    std::env::set_var("JWT_SECRET", "env-secret");
    std::env::set_var("SERVER_PORT", "8088");
    std::env::set_var("STORE_TIMEOUT_MS", "250");
    std::env::set_var("DATABASE_URL", "sqlite://blockdoc.db");

    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.jwt_secret, "env-secret");
    assert_eq!(config.bind_addr.port(), 8088);
    assert_eq!(config.store_timeout, Duration::from_millis(250));
    assert_eq!(config.database_url.as_deref(), Some("sqlite://blockdoc.db"));
}

#[test]
#[serial]
fn test_env_overrides_config_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blockdoc.toml");
    std::fs::write(&path, "port = 4000\njwt_secret = \"file-secret\"\n").unwrap();
    std::env::set_var("BLOCKDOC_CONFIG", &path);
    std::env::set_var("SERVER_PORT", "4001");

    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.jwt_secret, "file-secret");
    assert_eq!(config.bind_addr.port(), 4001);
}

#[test]
#[serial]
fn test_invalid_port_rejected() {
    clear_env();
    std::env::set_var("JWT_SECRET", "env-secret");
    std::env::set_var("SERVER_PORT", "not-a-port");

    let result = AppConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidValue { key: "SERVER_PORT", .. })));
}
