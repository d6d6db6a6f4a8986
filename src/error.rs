use thiserror::Error;

/// ConfigError
///
/// Start-up failures while reading the environment. Nothing at request time
/// produces an error of this kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),

    #[error("{name} must be an integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("SESSION_TTL_DAYS must be at least 1, got {0}")]
    NonPositiveTtl(i64),

    #[error("SESSION_TTL_DAYS must be at most {max}, got {value}")]
    TtlTooLarge { value: i64, max: i64 },
}
