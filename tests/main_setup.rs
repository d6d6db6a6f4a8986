use book_portal::{AppConfig, ConfigError, config::Env};
use serial_test::serial;
use std::{env, panic};

const CONFIG_VARS: [&str; 4] = [
    "APP_ENV",
    "BIND_ADDR",
    "PROFILE_UPLOAD_BASE_URL",
    "SESSION_TTL_DAYS",
];

// --- Setup/Teardown Utilities ---

/// Runs `test` with the given variables set (and every other config variable
/// cleared), then restores the original environment.
fn run_with_env<T, R>(vars: &[(&str, &str)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals {
        unsafe {
            match original_value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(&[("APP_ENV", "local")], AppConfig::load).unwrap();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.upload_base_url, "http://localhost:7878/uploads/profile/");
    assert_eq!(config.session_ttl_days, 30);
    assert!(!config.secure_cookies);
    assert_eq!(config, AppConfig::default());
}

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(&[("APP_ENV", "production")], AppConfig::load);
    assert_eq!(result, Err(ConfigError::Missing("PROFILE_UPLOAD_BASE_URL")));
}

#[test]
#[serial]
fn test_app_config_production_overrides() {
    let config = run_with_env(
        &[
            ("APP_ENV", "production"),
            ("PROFILE_UPLOAD_BASE_URL", "https://cdn.example.com/profile/"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("SESSION_TTL_DAYS", "7"),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.upload_base_url, "https://cdn.example.com/profile/");
    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.session_ttl_days, 7);
    assert!(config.secure_cookies);
}

#[test]
#[serial]
fn test_app_config_rejects_bad_ttl() {
    let not_a_number = run_with_env(&[("SESSION_TTL_DAYS", "week")], AppConfig::load);
    assert_eq!(
        not_a_number,
        Err(ConfigError::InvalidNumber {
            name: "SESSION_TTL_DAYS",
            value: "week".to_string()
        })
    );

    let zero = run_with_env(&[("SESSION_TTL_DAYS", "0")], AppConfig::load);
    assert_eq!(zero, Err(ConfigError::NonPositiveTtl(0)));
}

#[test]
#[serial]
fn test_app_config_rejects_oversized_ttl() {
    let result = run_with_env(&[("SESSION_TTL_DAYS", "4611686018427387903")], AppConfig::load);
    assert_eq!(
        result,
        Err(ConfigError::TtlTooLarge {
            value: 4611686018427387903,
            max: 3650
        })
    );

    let ten_years = run_with_env(&[("SESSION_TTL_DAYS", "3650")], AppConfig::load).unwrap();
    assert_eq!(ten_years.session_ttl_days, 3650);
}
