//! Configuration validation.
//!
//! Validates configuration and collects all errors before returning,
//! enabling users to fix multiple issues in a single iteration.

use crate::config::types::{ChainConfig, ObservabilityConfig, PipelineConfig};
use crate::errors::ConfigError;

const MAX_CHAIN_ID_LEN: usize = 50;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 2] = ["json", "pretty"];

/// Validate the entire pipeline configuration.
///
/// Collects all validation errors and returns them together.
pub fn validate_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_chain_config(&config.chain, &mut errors);
    validate_observability_config(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(errors))
    }
}

fn validate_chain_config(config: &ChainConfig, errors: &mut Vec<String>) {
    if config.chain_id.is_empty() {
        errors.push("chain.chain_id cannot be empty".to_string());
        return;
    }

    if config.chain_id.len() > MAX_CHAIN_ID_LEN {
        errors.push(format!(
            "chain.chain_id must be at most {} characters",
            MAX_CHAIN_ID_LEN
        ));
    }

    if !config
        .chain_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        errors.push(format!(
            "chain.chain_id '{}' contains invalid characters. Only ASCII alphanumerics, '-', '_' and '.' are allowed.",
            config.chain_id
        ));
    }
}

fn validate_observability_config(config: &ObservabilityConfig, errors: &mut Vec<String>) {
    if !VALID_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_level '{}' is invalid. Valid levels: trace, debug, info, warn, error",
            config.log_level
        ));
    }

    if !VALID_FORMATS.contains(&config.log_format.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_format '{}' is invalid. Valid formats: json, pretty",
            config.log_format
        ));
    }
}
