//! Event Registry Module
//!
//! Channel-keyed handler lists with synchronous, snapshot-based fan-out,
//! plus the lifecycle events and statistics the registry emits.

pub mod channel;
pub mod event_registry;
pub mod events;
pub mod handler;
pub mod report;
pub mod stats;

pub use channel::*;
pub use event_registry::*;
pub use events::*;
pub use handler::*;
pub use report::*;
pub use stats::*;
