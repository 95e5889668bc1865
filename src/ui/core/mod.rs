//! Core UI functionality for fleetdash.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait and rendering abstractions
//! - [`context`] - Services shared by every screen
//! - [`event_handler`] - Terminal input polling
//!
//! Components turn input into [`Action`]s; the app applies actions to the
//! shared filter store and spawns fetches, whose results come back as actions
//! over a channel.

pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;

pub use actions::Action;
pub use component::Component;
pub use context::AppContext;
pub use event_handler::{EventHandler, EventType};
