//! Configuration loading from `config/*.toml` and `SIMPLE_BANKING__*` variables
//!
//! Every test mutates process environment, so all of them run `#[serial]`.

use std::env;

use serial_test::serial;
use simple_banking::config::*;

fn clean_env_vars() {
    let keys: Vec<String> = env::vars()
        .filter(|(k, _)| k.starts_with("SIMPLE_BANKING"))
        .map(|(k, _)| k)
        .collect();

    for key in keys {
        unsafe { env::remove_var(&key) };
    }

    unsafe { env::remove_var("APP_ENV") };
}

#[test]
#[serial]
fn test_load_default_config() {
    clean_env_vars();

    let config = load().expect("default configuration loads");

    assert_eq!(config.app.name, "simple-banking");
    assert_eq!(config.app.environment, "development");
    assert_eq!(config.app.shutdown_timeout, 30);

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.workers, 0);

    assert!(config.database.run_migrations);
    assert_eq!(config.database.max_connections, 10);

    assert_eq!(config.observability.log_format, LogFormat::Pretty);

    assert_eq!(config.auth.admin_token, "SUPER_SECRET_KEY_FROM_ADMIN");
    assert_eq!(config.auth.credentials_cache_ttl, 300);
    assert_eq!(config.auth.argon2.memory_cost, 65536);

    assert!(!config.security.cors.enabled);
    assert!(config.security.headers.enabled);
    assert_eq!(config.security.headers.hsts_max_age, 31536000);

    assert!(config.api.swagger_enabled);
    assert_eq!(config.api.swagger_path, "/docs");
}

#[test]
#[serial]
fn test_production_overrides_defaults() {
    clean_env_vars();
    unsafe { env::set_var("APP_ENV", "production") };

    let config = load();
    clean_env_vars();

    let config = config.expect("production configuration loads");
    assert_eq!(config.app.environment, "production");
    assert_eq!(config.observability.log_format, LogFormat::Json);
    assert_eq!(config.security.headers.hsts_max_age, 63072000);
    assert_eq!(config.server.port, 8080, "Unset keys keep their defaults");
}

#[test]
#[serial]
fn test_unknown_environment_falls_back_to_defaults() {
    clean_env_vars();
    unsafe { env::set_var("APP_ENV", "nowhere") };

    let config = load();
    clean_env_vars();

    assert_eq!(config.expect("loads").app.environment, "development");
}

#[test]
#[serial]
fn test_env_vars_override_files() {
    clean_env_vars();
    unsafe {
        env::set_var("SIMPLE_BANKING__SERVER__PORT", "9090");
        env::set_var("SIMPLE_BANKING__AUTH__ADMIN_TOKEN", "from-env");
        env::set_var("SIMPLE_BANKING__AUTH__CREDENTIALS_CACHE_TTL", "60");
        env::set_var("SIMPLE_BANKING__API__SWAGGER_ENABLED", "false");
    };

    let config = load();
    clean_env_vars();

    let config = config.expect("configuration with env overrides loads");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.auth.admin_token, "from-env");
    assert_eq!(config.auth.credentials_cache_ttl, 60);
    assert!(!config.api.swagger_enabled);
}

#[test]
#[serial]
fn test_env_vars_override_environment_file() {
    clean_env_vars();
    unsafe {
        env::set_var("APP_ENV", "production");
        env::set_var("SIMPLE_BANKING__OBSERVABILITY__LOG_FORMAT", "pretty");
    };

    let config = load();
    clean_env_vars();

    assert_eq!(config.expect("loads").observability.log_format, LogFormat::Pretty);
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clean_env_vars();
    unsafe { env::set_var("SIMPLE_BANKING__SERVER__PORT", "0") };

    let result = load();
    clean_env_vars();

    match result {
        Err(ConfigError::ValidationError(message)) => assert!(message.contains("server.port")),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_blank_admin_token_is_rejected() {
    clean_env_vars();
    unsafe { env::set_var("SIMPLE_BANKING__AUTH__ADMIN_TOKEN", " ") };

    let result = load();
    clean_env_vars();

    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
#[serial]
fn test_unparseable_value_is_a_load_error() {
    clean_env_vars();
    unsafe { env::set_var("SIMPLE_BANKING__SERVER__PORT", "not-a-port") };

    let result = load();
    clean_env_vars();

    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
#[serial]
fn test_weak_argon2_parameters_are_rejected() {
    clean_env_vars();
    unsafe { env::set_var("SIMPLE_BANKING__AUTH__ARGON2__HASH_LENGTH", "8") };

    let result = load();
    clean_env_vars();

    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}
