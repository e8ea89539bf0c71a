//! Event Registry
//!
//! Named channels, each an ordered list of handlers, with synchronous
//! fan-out. Publishing works on a snapshot of the channel taken before the
//! first handler runs, so handlers may subscribe, unsubscribe or publish on
//! the same registry; such changes apply from the next publish onwards.

use crate::config::{FailurePolicy, RegistryConfig};
use crate::error::{Error, Result};
use crate::registry::{
    ChannelName, DeliveryFailure, Handler, PublishReport, RegistryEvent, RegistryStats,
    RegistryStatsSnapshot,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

/// In-process channel registry
pub struct EventRegistry<P = Value> {
    config: RegistryConfig,
    default_channel: ChannelName,
    /// Handler lists keyed by channel, in declaration order
    channels: RwLock<IndexMap<ChannelName, Vec<Handler<P>>>>,
    stats: RegistryStats,
    /// Lifecycle event broadcaster
    event_sender: broadcast::Sender<RegistryEvent>,
}

impl<P> EventRegistry<P> {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self::build(RegistryConfig::default())
    }

    /// Create a registry from a configuration, declaring its channels
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RegistryConfig) -> Self {
        let (event_sender, _) = broadcast::channel(config.event_capacity.max(1));

        let mut channels = IndexMap::new();
        for name in &config.channels {
            channels
                .entry(ChannelName::from(name))
                .or_insert_with(Vec::new);
        }

        Self {
            default_channel: ChannelName::from(&config.default_channel),
            config,
            channels: RwLock::new(channels),
            stats: RegistryStats::default(),
            event_sender,
        }
    }

    /// Get a lifecycle event receiver
    pub fn watch(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_sender.subscribe()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Channel used by the `*_default` operations
    pub fn default_channel(&self) -> &ChannelName {
        &self.default_channel
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Append a handler to a channel, creating the channel if absent
    pub fn subscribe(&self, channel: impl Into<ChannelName>, handler: Handler<P>) {
        let channel = channel.into();

        let (created, handler_count) = {
            let mut channels = self.channels.write();
            let created = !channels.contains_key(&channel);
            let handlers = channels.entry(channel.clone()).or_insert_with(Vec::new);
            handlers.push(handler);
            (created, handlers.len())
        };

        self.stats.record_subscribe();
        if created {
            self.emit(RegistryEvent::ChannelCreated {
                channel: channel.to_string(),
            });
        }

        debug!(
            "Subscribed handler to channel '{}' ({} registered)",
            channel, handler_count
        );
        self.emit(RegistryEvent::HandlerSubscribed {
            channel: channel.to_string(),
            handler_count,
        });
    }

    pub fn subscribe_default(&self, handler: Handler<P>) {
        self.subscribe(self.default_channel.clone(), handler)
    }

    /// Remove every occurrence of a handler from a channel
    ///
    /// Returns the number of occurrences removed. Unknown channels and
    /// handlers that were never subscribed are a no-op returning 0.
    pub fn unsubscribe(&self, channel: impl Into<ChannelName>, handler: &Handler<P>) -> usize {
        let channel = channel.into();

        let outcome = {
            let mut channels = self.channels.write();
            channels.get_mut(&channel).map(|handlers| {
                let before = handlers.len();
                handlers.retain(|h| !h.same_as(handler));
                (before - handlers.len(), handlers.len())
            })
        };

        match outcome {
            Some((removed, handler_count)) if removed > 0 => {
                self.stats.record_unsubscribe(removed);
                debug!(
                    "Unsubscribed {} handler occurrence(s) from channel '{}' ({} remaining)",
                    removed, channel, handler_count
                );
                self.emit(RegistryEvent::HandlerUnsubscribed {
                    channel: channel.to_string(),
                    removed,
                    handler_count,
                });
                removed
            }
            _ => {
                trace!("Unsubscribe on channel '{}' matched nothing", channel);
                0
            }
        }
    }

    pub fn unsubscribe_default(&self, handler: &Handler<P>) -> usize {
        self.unsubscribe(self.default_channel.clone(), handler)
    }

    // =========================================================================
    // Publishing
    // =========================================================================

    /// Invoke every handler of a channel, in subscription order
    ///
    /// A channel without handlers, or one that was never declared, is a
    /// silent no-op. Handler errors and panics never escape; they are
    /// collected in the report and handled according to the failure policy.
    pub fn publish(&self, channel: impl Into<ChannelName>, payload: &P) -> PublishReport {
        let channel = channel.into();
        let snapshot: Vec<Handler<P>> = self
            .channels
            .read()
            .get(&channel)
            .cloned()
            .unwrap_or_default();

        let mut report = PublishReport::new(channel);
        if snapshot.is_empty() {
            trace!("No handlers on channel '{}'", report.channel);
        }

        for (index, handler) in snapshot.iter().enumerate() {
            match Self::invoke(handler, payload, &report.channel) {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    warn!(
                        "Handler {} on channel '{}' failed: {}",
                        index, report.channel, error
                    );
                    self.emit(RegistryEvent::HandlerFailed {
                        channel: report.channel.to_string(),
                        index,
                        reason: error.to_string(),
                    });
                    report.failures.push(DeliveryFailure { index, error });

                    if self.config.failure_policy == FailurePolicy::Abort {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        self.stats.record_publish(report.delivered, report.failed());
        debug!(
            "Published to channel '{}': {} delivered, {} failed",
            report.channel,
            report.delivered,
            report.failed()
        );
        self.emit(RegistryEvent::Published {
            channel: report.channel.to_string(),
            delivered: report.delivered,
            failed: report.failed(),
        });

        report
    }

    pub fn publish_default(&self, payload: &P) -> PublishReport {
        self.publish(self.default_channel.clone(), payload)
    }

    /// Alias of [`publish`](Self::publish)
    pub fn dispatch(&self, channel: impl Into<ChannelName>, payload: &P) -> PublishReport {
        self.publish(channel, payload)
    }

    /// Alias of [`publish`](Self::publish)
    pub fn notify(&self, channel: impl Into<ChannelName>, payload: &P) -> PublishReport {
        self.publish(channel, payload)
    }

    fn invoke(handler: &Handler<P>, payload: &P, channel: &ChannelName) -> Result<()> {
        match panic::catch_unwind(AssertUnwindSafe(|| handler.call(payload))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(Error::HandlerFailed {
                channel: channel.to_string(),
                reason: e.to_string(),
            }),
            Err(panic_err) => Err(Error::HandlerPanicked {
                channel: channel.to_string(),
                message: panic_message(&*panic_err),
            }),
        }
    }

    // =========================================================================
    // Channel Management
    // =========================================================================

    /// Declare a channel without handlers; returns false if it already existed
    pub fn declare_channel(&self, channel: impl Into<ChannelName>) -> bool {
        let channel = channel.into();
        let created = {
            let mut channels = self.channels.write();
            if channels.contains_key(&channel) {
                false
            } else {
                channels.insert(channel.clone(), Vec::new());
                true
            }
        };

        if created {
            debug!("Declared channel '{}'", channel);
            self.emit(RegistryEvent::ChannelCreated {
                channel: channel.to_string(),
            });
        }
        created
    }

    /// Drop a channel and its handlers; returns how many handlers were dropped
    pub fn remove_channel(&self, channel: impl Into<ChannelName>) -> usize {
        let channel = channel.into();
        let removed = self.channels.write().shift_remove(&channel);

        match removed {
            Some(handlers) => {
                debug!(
                    "Removed channel '{}' with {} handler(s)",
                    channel,
                    handlers.len()
                );
                self.emit(RegistryEvent::ChannelRemoved {
                    channel: channel.to_string(),
                    handlers_dropped: handlers.len(),
                });
                handlers.len()
            }
            None => 0,
        }
    }

    /// Drop every channel
    pub fn clear(&self) {
        let drained: Vec<(ChannelName, Vec<Handler<P>>)> =
            self.channels.write().drain(..).collect();

        for (channel, handlers) in drained {
            self.emit(RegistryEvent::ChannelRemoved {
                channel: channel.to_string(),
                handlers_dropped: handlers.len(),
            });
        }
    }

    pub fn has_channel(&self, channel: &str) -> bool {
        self.channels.read().contains_key(channel)
    }

    /// Channel names in declaration order
    pub fn channels(&self) -> Vec<ChannelName> {
        self.channels.read().keys().cloned().collect()
    }

    /// Number of handler occurrences on a channel (0 if unknown)
    pub fn handler_count(&self, channel: &str) -> usize {
        self.channels.read().get(channel).map_or(0, Vec::len)
    }

    /// Check if a handler is currently subscribed to a channel
    pub fn is_subscribed(&self, channel: &str, handler: &Handler<P>) -> bool {
        self.channels
            .read()
            .get(channel)
            .is_some_and(|handlers| handlers.iter().any(|h| h.same_as(handler)))
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStatsSnapshot {
        self.stats.snapshot()
    }

    fn emit(&self, event: RegistryEvent) {
        // No receivers is fine.
        let _ = self.event_sender.send(event);
    }
}

impl<P> Default for EventRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventRegistry<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels = self.channels.read();
        f.debug_struct("EventRegistry")
            .field("default_channel", &self.default_channel)
            .field("channel_count", &channels.len())
            .field(
                "handler_count",
                &channels.values().map(Vec::len).sum::<usize>(),
            )
            .field("failure_policy", &self.config.failure_policy)
            .finish()
    }
}

fn panic_message(panic_err: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic_err.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
