use std::env;

use time::Duration;

use crate::{display::DEFAULT_PHOTO_BASE_URL, error::ConfigError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SESSION_TTL_DAYS: i64 = 30;
/// Ten years.
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

/// AppConfig
///
/// Holds the application's configuration. Loaded once at start-up and shared
/// read-only through the application state.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and cookie hardening.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Prefix for relative profile photo paths.
    pub upload_base_url: String,
    // Lifetime of "remember me" session cookies.
    pub session_ttl_days: i64,
    // Marks session cookies `Secure`.
    pub secure_cookies: bool,
}

/// Env
///
/// Defines the runtime context.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Safe values for tests; no environment variables are read.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            upload_base_url: DEFAULT_PHOTO_BASE_URL.to_string(),
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
            secure_cookies: false,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// * `APP_ENV` — `production` selects `Env::Production`; anything else is local.
    /// * `BIND_ADDR` — defaults to `0.0.0.0:3000`.
    /// * `PROFILE_UPLOAD_BASE_URL` — defaults to the local upload path, but must
    ///   be set explicitly in production.
    /// * `SESSION_TTL_DAYS` — defaults to 30, must lie in `1..=3650`.
    ///
    /// # Errors
    /// Returns a `ConfigError` for a missing production setting or a malformed
    /// number, so the process never starts half-configured.
    pub fn load() -> Result<Self, ConfigError> {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let app_env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let upload_base_url = match (&app_env, env::var("PROFILE_UPLOAD_BASE_URL")) {
            (_, Ok(url)) => url,
            (Env::Production, Err(_)) => {
                return Err(ConfigError::Missing("PROFILE_UPLOAD_BASE_URL"));
            }
            (Env::Local, Err(_)) => DEFAULT_PHOTO_BASE_URL.to_string(),
        };

        let session_ttl_days = match env::var("SESSION_TTL_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "SESSION_TTL_DAYS",
                    value: raw.clone(),
                })?,
            Err(_) => DEFAULT_SESSION_TTL_DAYS,
        };
        if session_ttl_days < 1 {
            return Err(ConfigError::NonPositiveTtl(session_ttl_days));
        }
        if session_ttl_days > MAX_SESSION_TTL_DAYS {
            return Err(ConfigError::TtlTooLarge {
                value: session_ttl_days,
                max: MAX_SESSION_TTL_DAYS,
            });
        }

        Ok(Self {
            secure_cookies: app_env == Env::Production,
            env: app_env,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            upload_base_url,
            session_ttl_days,
        })
    }

    /// Max-Age of a "remember me" cookie. Clamped to the loadable range, so a
    /// hand-built config cannot overflow `Duration`.
    pub fn session_max_age(&self) -> Duration {
        Duration::days(self.session_ttl_days.clamp(1, MAX_SESSION_TTL_DAYS))
    }
}
