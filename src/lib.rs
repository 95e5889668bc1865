//! fleetdash - A terminal dashboard for fleet telematics
//!
//! This library provides the list-screen machinery of a fleet dashboard:
//! a typed REST client for the telematics backend, per-screen query state
//! (filters, sort, search, paging) shared across screens, a fetch
//! orchestrator that keeps loading/result/error in step with the query,
//! and a Ratatui interface with filter popovers and debounced search.
//!
//! # Modules
//!
//! * [`api`] - REST client and data-access functions
//! * [`auth`] - Bearer token session store
//! * [`config`] - Application configuration management
//! * [`orchestrator`] - Fetching list pages for the current query
//! * [`query`] - Query state, reducer and request body construction
//! * [`screens`] - Per-screen columns, filters and layout
//! * [`ui`] - Terminal user interface components

/// REST client and data-access functions for the telematics backend
pub mod api;

/// Bearer token session store
pub mod auth;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Trailing-edge debouncing of user input
pub mod debounce;

/// Logging setup
pub mod logger;

/// Toast notifications shown in the status bar
pub mod notifications;

/// Fetch orchestration for list screens
pub mod orchestrator;

/// Query state shared across list screens
pub mod query;

/// Declarative configuration of each list screen
pub mod screens;

/// Terminal user interface components and rendering
pub mod ui;

/// Input validation for create/update payloads
pub mod validation;
