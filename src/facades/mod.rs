//! Facades
//!
//! Fixed-shape wrappers over [`EventRegistry`](crate::registry::EventRegistry):
//! a button with `click`/`focus` listeners and a single-channel news feed.

pub mod button;
pub mod news;

pub use button::{Button, ButtonEvent};
pub use news::NewsChannel;
