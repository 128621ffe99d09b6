use thiserror::Error;

/// Rejected indicator configuration.
///
/// Configuration is the only fallible input of the core; everything fed in at
/// runtime (scroll offsets, timestamps) is clamped instead of rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown indicator option `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("`{field}` {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}
