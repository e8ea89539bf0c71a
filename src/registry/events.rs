//! Registry Events
//!
//! Lifecycle events emitted by the registry so observers can follow channel
//! and subscription changes without registering handlers themselves.

use serde::{Deserialize, Serialize};

/// Events emitted by the event registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A channel was declared, explicitly or by a first subscribe
    ChannelCreated { channel: String },

    /// A channel was removed along with its handlers
    ChannelRemoved {
        channel: String,
        handlers_dropped: usize,
    },

    /// A handler was appended to a channel
    HandlerSubscribed {
        channel: String,
        handler_count: usize,
    },

    /// Handler occurrences were removed from a channel
    HandlerUnsubscribed {
        channel: String,
        removed: usize,
        handler_count: usize,
    },

    /// A payload was fanned out
    Published {
        channel: String,
        delivered: usize,
        failed: usize,
    },

    /// A handler failed or panicked during a publish
    HandlerFailed {
        channel: String,
        index: usize,
        reason: String,
    },
}

impl RegistryEvent {
    /// Get the channel associated with this event
    pub fn channel(&self) -> &str {
        match self {
            RegistryEvent::ChannelCreated { channel } => channel,
            RegistryEvent::ChannelRemoved { channel, .. } => channel,
            RegistryEvent::HandlerSubscribed { channel, .. } => channel,
            RegistryEvent::HandlerUnsubscribed { channel, .. } => channel,
            RegistryEvent::Published { channel, .. } => channel,
            RegistryEvent::HandlerFailed { channel, .. } => channel,
        }
    }

    /// Check if this is a subscription change
    pub fn is_subscription_event(&self) -> bool {
        matches!(
            self,
            RegistryEvent::HandlerSubscribed { .. } | RegistryEvent::HandlerUnsubscribed { .. }
        )
    }

    /// Check if this is an error event
    pub fn is_error(&self) -> bool {
        matches!(self, RegistryEvent::HandlerFailed { .. })
    }
}
