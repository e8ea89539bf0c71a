//! Channel names

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Name of the anonymous channel used when no channel is given
pub const DEFAULT_CHANNEL: &str = "default";

/// Identifier for a channel
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelName(pub String);

impl ChannelName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the built-in default channel
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_CHANNEL
    }
}

impl Default for ChannelName {
    fn default() -> Self {
        Self(DEFAULT_CHANNEL.to_string())
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Lets the channel map be queried with a plain &str.
impl Borrow<str> for ChannelName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for ChannelName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&String> for ChannelName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<&ChannelName> for ChannelName {
    fn from(c: &ChannelName) -> Self {
        c.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name_conversions() {
        let a = ChannelName::from("news");
        let b = ChannelName::from(String::from("news"));
        let c = ChannelName::new("news");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "news");
        assert_eq!(a.to_string(), "news");
        assert!(!a.is_default());
        assert!(ChannelName::default().is_default());
    }

    #[test]
    fn test_channel_name_serializes_as_string() {
        let json = serde_json::to_string(&ChannelName::new("login")).unwrap();
        assert_eq!(json, "\"login\"");
    }
}
