use crate::config::types::{Config, FetchConfig, RankConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_rank_config(&config.rank)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates solver parameters
fn validate_rank_config(config: &RankConfig) -> Result<(), ConfigError> {
    if !config.damping.is_finite() || !(0.0..=1.0).contains(&config.damping) {
        return Err(ConfigError::Validation(format!(
            "damping must be between 0 and 1, got {}",
            config.damping
        )));
    }

    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "tolerance must be a positive number, got {}",
            config.tolerance
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}
