//! Terminal user interface for fleetdash.
//!
//! One list screen is shown at a time. Components turn input into actions,
//! [`App`] applies them to the shared filter store and spawns fetches.

pub mod app;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;

pub use app::App;
pub use layout::LayoutManager;
pub use renderer::run_app;
