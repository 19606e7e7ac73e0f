//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AdapterConfig {
    /// Response shaping options.
    pub response: ResponseOptions,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Options applied to every response.
///
/// Captured by value when a handler is wrapped, never mutated afterwards.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResponseOptions {
    /// Emit `multiValueHeaders` instead of `headers`.
    ///
    /// Must match the target group's multi value headers setting.
    pub multi_value_headers: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set.
    pub filter: String,

    /// Colour output. Function log sinks usually do not render it.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "alb_lambda=info".to_string(),
            ansi: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AdapterConfig = toml::from_str("").unwrap();
        assert_eq!(config, AdapterConfig::default());
        assert!(!config.response.multi_value_headers);
        assert_eq!(config.logging.filter, "alb_lambda=info");
    }

    #[test]
    fn test_partial_config() {
        let config: AdapterConfig = toml::from_str(
            r#"
            [response]
            multi_value_headers = true
            "#,
        )
        .unwrap();
        assert!(config.response.multi_value_headers);
        assert!(!config.logging.ansi);
    }
}
