//! Event Registry - In-Process Publish/Subscribe
//!
//! Named channels holding ordered handler lists, with synchronous fan-out of
//! a payload to every handler of a channel.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       EventRegistry<P>                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  subscribe ─────┐                  ┌──── publish / dispatch  │
//! │  unsubscribe ───┤                  │     / notify            │
//! │                 ▼                  ▼                         │
//! │      RwLock<IndexMap<ChannelName, Vec<Handler<P>>>>          │
//! │                                    │ snapshot                │
//! │                                    ▼                         │
//! │           RegistryEvent ◀──── in-order fan-out               │
//! │          (broadcast, watch())                                │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Facades:  Button (click / focus)    NewsChannel (default)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use event_registry::{EventRegistry, Handler};
//!
//! let registry = EventRegistry::<String>::new();
//! let user1 = Handler::new(|news: &String| println!("User1 received: {}", news));
//! let user2 = Handler::new(|news: &String| println!("User2 received: {}", news));
//!
//! registry.subscribe("news", user1.clone());
//! registry.subscribe("news", user2);
//! assert_eq!(registry.publish("news", &"A".to_string()).delivered, 2);
//!
//! registry.unsubscribe("news", &user1);
//! assert_eq!(registry.publish("news", &"B".to_string()).delivered, 1);
//! ```
//!
//! # Modules
//!
//! - [`registry`]: the registry, handlers, lifecycle events and stats
//! - [`facades`]: button and news-channel wrappers
//! - [`config`]: registry configuration
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod facades;
pub mod registry;

pub use config::{FailurePolicy, RegistryConfig};

pub use error::{Error, Result};

pub use facades::{Button, ButtonEvent, NewsChannel};

pub use registry::{
    ChannelName, DeliveryFailure, EventRegistry, Handler, HandlerError, HandlerResult,
    PublishReport, RegistryEvent, RegistryStatsSnapshot, DEFAULT_CHANNEL,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
