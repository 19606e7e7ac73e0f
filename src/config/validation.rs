//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AdapterConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::config::schema::AdapterConfig;

/// A semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyLogFilter,
    InvalidLogFilter(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyLogFilter => write!(f, "logging.filter must not be empty"),
            ValidationError::InvalidLogFilter(e) => write!(f, "logging.filter is invalid: {}", e),
        }
    }
}

pub fn validate_config(config: &AdapterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let filter = config.logging.filter.trim();
    if filter.is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    } else if let Err(e) = EnvFilter::try_new(filter) {
        errors.push(ValidationError::InvalidLogFilter(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&AdapterConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_filter() {
        let mut config = AdapterConfig::default();
        config.logging.filter = "  ".into();
        assert_eq!(validate_config(&config), Err(vec![ValidationError::EmptyLogFilter]));
    }

    #[test]
    fn test_bad_filter() {
        let mut config = AdapterConfig::default();
        config.logging.filter = "alb_lambda=notalevel".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidLogFilter(_)));
    }
}
