//! Sampling cycle timing.
//!
//! Defaults match the SEN5x datasheet recommendations. Any subset can be
//! overridden from TOML, with durations written in humantime form:
//!
//! ```toml
//! warm_up = "30s"
//! poll_interval = "100ms"
//! ready_timeout = "5s"
//! sample_interval = "5m"
//! sample_on_start = true
//! ```

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse sampler config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid sampler config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    /// Hold after StartMeasurement so the particulate readings stabilise.
    #[serde(with = "humantime_serde")]
    pub warm_up: Duration,
    /// Spacing between data-ready queries.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Give up waiting for data-ready after this long.
    #[serde(with = "humantime_serde")]
    pub ready_timeout: Duration,
    /// Period of the automatic trigger.
    #[serde(with = "humantime_serde")]
    pub sample_interval: Duration,
    /// Run one cycle as soon as the worker starts.
    pub sample_on_start: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            warm_up: Duration::from_secs(30),
            poll_interval: Duration::from_millis(100),
            ready_timeout: Duration::from_secs(5),
            sample_interval: Duration::from_secs(5 * 60),
            sample_on_start: true,
        }
    }
}

impl SamplerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SamplerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval < Duration::from_millis(1) {
            return Err(ConfigError::Invalid("poll_interval must be at least 1ms"));
        }
        if self.sample_interval.is_zero() {
            return Err(ConfigError::Invalid("sample_interval must be non-zero"));
        }
        Ok(())
    }

    /// Number of data-ready queries before giving up, counting the one made
    /// right after warm-up. Queries start `poll_interval` apart, so the last
    /// one begins once `ready_timeout` has passed.
    pub fn ready_poll_attempts(&self) -> u32 {
        let interval = self.poll_interval.as_nanos().max(1);
        let polls = self.ready_timeout.as_nanos() / interval;
        u32::try_from(polls).unwrap_or(u32::MAX - 1) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SamplerConfig::default();
        assert_eq!(config.warm_up, Duration::from_secs(30));
        assert_eq!(config.ready_poll_attempts(), 51);
        config.validate().unwrap();
    }

    #[test]
    fn partial_override() {
        let config = SamplerConfig::from_toml_str(
            r#"
            warm_up = "10s"
            sample_interval = "1m"
            "#,
        )
        .unwrap();
        assert_eq!(config.warm_up, Duration::from_secs(10));
        assert_eq!(config.sample_interval, Duration::from_secs(60));
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert!(config.sample_on_start);
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let err = SamplerConfig::from_toml_str(r#"poll_interval = "0s""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_sub_millisecond_poll_interval() {
        let err = SamplerConfig::from_toml_str(r#"poll_interval = "500us""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        SamplerConfig::from_toml_str(r#"poll_interval = "1ms""#).unwrap();
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SamplerConfig::from_toml_str("warmup = \"1s\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
