use crate::config::types::{Config, OutputConfig, ProbeConfig};
use crate::ConfigError;

/// Upper limit on concurrent probes per batch
const MAX_BATCH_SIZE: usize = 5000;

/// Upper limit on followed redirects
const MAX_REDIRECTS: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_probe_config(&config.probe)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates probe configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 || config.batch_size > MAX_BATCH_SIZE {
        return Err(ConfigError::Validation(format!(
            "batch_size must be between 1 and {}, got {}",
            MAX_BATCH_SIZE, config.batch_size
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_ms must be >= 1, got {}",
            config.connect_timeout_ms
        )));
    }

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.results_dir.is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_output() -> OutputConfig {
        OutputConfig {
            database_path: "./content.db".to_string(),
            results_dir: "./results".to_string(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_probe_config(&ProbeConfig::default()).is_ok());
        assert!(validate_output_config(&valid_output()).is_ok());
    }

    #[test]
    fn test_batch_size_limits() {
        let mut probe = ProbeConfig::default();
        probe.batch_size = 0;
        assert!(validate_probe_config(&probe).is_err());

        probe.batch_size = MAX_BATCH_SIZE + 1;
        assert!(validate_probe_config(&probe).is_err());

        probe.batch_size = 1;
        assert!(validate_probe_config(&probe).is_ok());
    }

    #[test]
    fn test_timeouts_must_be_positive() {
        let mut probe = ProbeConfig::default();
        probe.timeout_secs = 0;
        assert!(validate_probe_config(&probe).is_err());

        let mut probe = ProbeConfig::default();
        probe.connect_timeout_ms = 0;
        assert!(validate_probe_config(&probe).is_err());
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        let mut probe = ProbeConfig::default();
        probe.user_agent = "   ".to_string();
        assert!(validate_probe_config(&probe).is_err());
    }

    #[test]
    fn test_empty_output_paths_rejected() {
        let mut output = valid_output();
        output.results_dir.clear();
        assert!(validate_output_config(&output).is_err());

        let mut output = valid_output();
        output.database_path.clear();
        assert!(validate_output_config(&output).is_err());
    }
}
