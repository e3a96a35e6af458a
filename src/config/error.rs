use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositive { name: &'static str, value: f64 },
    Negative { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { name, value } => {
                write!(f, "{} must be positive, got {}", name, value)
            }
            ConfigError::Negative { name, value } => {
                write!(f, "{} must not be negative, got {}", name, value)
            }
        }
    }
}

impl Error for ConfigError {}

/// Rejects zero and negative values for a named physical constant.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

/// Rejects negative values; zero is allowed (e.g. an airless planet).
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
