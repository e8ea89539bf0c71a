//! Registry configuration
//!
//! Loaded from YAML or built in code; every field has a default so an empty
//! document is a valid configuration.

use crate::error::{Error, Result};
use crate::registry::DEFAULT_CHANNEL;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Behaviour when a handler fails or panics during a publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure and keep delivering to the remaining handlers
    #[default]
    Isolate,
    /// Stop the fan-out at the first failure
    Abort,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Isolate => write!(f, "isolate"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Configuration for an [`EventRegistry`](crate::registry::EventRegistry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name of the anonymous channel used by the `*_default` operations
    pub default_channel: String,
    /// Channels declared up front, in order
    pub channels: Vec<String>,
    /// Capacity of the lifecycle event broadcast channel
    pub event_capacity: usize,
    /// Handler failure policy
    pub failure_policy: FailurePolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_channel: DEFAULT_CHANNEL.to_string(),
            channels: Vec::new(),
            event_capacity: 1024,
            failure_policy: FailurePolicy::Isolate,
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: RegistryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&raw)
    }

    /// Reject configurations the registry cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.default_channel.trim().is_empty() {
            return Err(Error::Configuration(
                "default_channel must not be empty".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(Error::Configuration(
                "event_capacity must be greater than zero".to_string(),
            ));
        }
        if let Some(pos) = self.channels.iter().position(|c| c.trim().is_empty()) {
            return Err(Error::Configuration(format!(
                "channels[{}] must not be empty",
                pos
            )));
        }
        Ok(())
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels = channels.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RegistryConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.default_channel, "default");
        assert_eq!(config.failure_policy, FailurePolicy::Isolate);
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
default_channel: news
channels: [login, logout]
event_capacity: 16
failure_policy: abort
"#;
        let config = RegistryConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.default_channel, "news");
        assert_eq!(config.channels, vec!["login", "logout"]);
        assert_eq!(config.event_capacity, 16);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = RegistryConfig::from_yaml_str("event_capacity: 0").unwrap_err();
        assert_matches!(err, Error::Configuration(_));

        let err = RegistryConfig::from_yaml_str("default_channel: '  '").unwrap_err();
        assert_matches!(err, Error::Configuration(_));

        let err = RegistryConfig::from_yaml_str("channels: [ok, '']").unwrap_err();
        assert_matches!(err, Error::Configuration(msg) if msg.contains("channels[1]"));

        let err = RegistryConfig::from_yaml_str("failure_policy: retry").unwrap_err();
        assert_matches!(err, Error::ConfigParse(_));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "channels: [click, focus]").unwrap();

        let config = RegistryConfig::from_file(file.path()).unwrap();
        assert_eq!(config.channels, vec!["click", "focus"]);

        let missing = RegistryConfig::from_file(file.path().with_extension("missing"));
        assert_matches!(missing, Err(Error::Io(_)));
    }

    #[test]
    fn test_builders() {
        let config = RegistryConfig::default()
            .with_failure_policy(FailurePolicy::Abort)
            .with_channels(["a", "b"]);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.channels, vec!["a", "b"]);
        assert_eq!(FailurePolicy::Abort.to_string(), "abort");
    }
}
