//! Constants used throughout the application
//!
//! This module centralizes magic strings, user-facing messages, filter
//! defaults and other constant values.

// Filter defaults
/// Full score range; a score filter equal to this is never sent
pub const DEFAULT_SCORE_RANGE: [u32; 2] = [0, 100];
/// Full miles range; a miles filter equal to this is never sent
pub const DEFAULT_MILES_RANGE: [u32; 2] = [0, 100_000];
/// Slider step when adjusting the score range from the keyboard
pub const SCORE_STEP: u32 = 5;
/// Slider step when adjusting the miles range from the keyboard
pub const MILES_STEP: u32 = 1_000;

// Paging
/// Rows per page on table screens
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;
/// Rows per page on card-style screens (fleets, video footage)
pub const DEFAULT_CARD_ITEMS_PER_PAGE: u32 = 6;

// Search
/// Debounce window for search inputs, in milliseconds
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 1000;
/// Upper bound accepted for the configured debounce window
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 10_000;

// Auth / session
/// Key under which the bearer token is kept in the session store
pub const TOKEN_STORAGE_KEY: &str = "authToken";
/// Default environment variable consulted for the bearer token
pub const DEFAULT_TOKEN_ENV: &str = "FLEETDASH_API_TOKEN";
/// Session file name inside the data directory
pub const SESSION_FILE_NAME: &str = "session.json";
/// Saved filters of persistent screens, inside the data directory
pub const FILTERS_FILE_NAME: &str = "filters.json";

// Notifications
/// Maximum number of toasts retained
pub const TOAST_CAPACITY: usize = 50;

// Error Messages
pub const ERROR_GENERIC_FETCH: &str = "❌ Something went wrong while loading data";
pub const ERROR_NOT_AUTHENTICATED: &str = "❌ Not signed in: no session token found";
pub const ERROR_UPLOAD_URL_FAILED: &str = "Failed to get upload URL";
pub const ERROR_UPLOAD_TRANSFER_FAILED: &str = "File upload to S3 failed";
pub const ERROR_UPLOAD_REGISTER_FAILED: &str = "Failed to register uploaded file";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const LOADING_TEXT: &str = "Loading…";
pub const EMPTY_TEXT: &str = "No records found";

// UI Layout Constants
/// Width of the filter popover in columns
pub const FILTER_POPOVER_WIDTH: u16 = 44;
