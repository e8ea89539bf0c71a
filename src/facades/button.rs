//! DOM-style button
//!
//! Two fixed channels, `click` and `focus`, with listener registration in the
//! `addEventListener` shape.

use crate::config::RegistryConfig;
use crate::registry::{ChannelName, EventRegistry, Handler, PublishReport};
use serde::{Deserialize, Serialize};

/// Events a [`Button`] can fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonEvent {
    Click,
    Focus,
}

impl ButtonEvent {
    pub const ALL: [ButtonEvent; 2] = [ButtonEvent::Click, ButtonEvent::Focus];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonEvent::Click => "click",
            ButtonEvent::Focus => "focus",
        }
    }
}

impl std::fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ButtonEvent> for ChannelName {
    fn from(event: ButtonEvent) -> Self {
        ChannelName::new(event.as_str())
    }
}

/// Button with click and focus listeners
#[derive(Debug)]
pub struct Button<P = ()> {
    registry: EventRegistry<P>,
}

impl<P> Button<P> {
    pub fn new() -> Self {
        let config = RegistryConfig::default()
            .with_channels(ButtonEvent::ALL.iter().map(ButtonEvent::as_str));
        Self {
            registry: EventRegistry::with_config(config).unwrap_or_default(),
        }
    }

    pub fn add_event_listener(&self, event: ButtonEvent, listener: Handler<P>) {
        self.registry.subscribe(event, listener);
    }

    /// Remove every registration of `listener` for `event`
    pub fn remove_event_listener(&self, event: ButtonEvent, listener: &Handler<P>) -> usize {
        self.registry.unsubscribe(event, listener)
    }

    pub fn click(&self, payload: &P) -> PublishReport {
        self.trigger(ButtonEvent::Click, payload)
    }

    pub fn focus(&self, payload: &P) -> PublishReport {
        self.trigger(ButtonEvent::Focus, payload)
    }

    pub fn trigger(&self, event: ButtonEvent, payload: &P) -> PublishReport {
        self.registry.publish(event, payload)
    }

    pub fn listener_count(&self, event: ButtonEvent) -> usize {
        self.registry.handler_count(event.as_str())
    }

    /// Underlying registry, e.g. to [`watch`](EventRegistry::watch) it
    pub fn registry(&self) -> &EventRegistry<P> {
        &self.registry
    }
}

impl<P> Default for Button<P> {
    fn default() -> Self {
        Self::new()
    }
}
