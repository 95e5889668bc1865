//! Per-screen configuration of the list screens.
//!
//! Each list screen is a variant of [`ListScreen`]; its [`ScreenConfig`]
//! says which columns it shows, how many rows fit on a page, which filters the
//! popover offers and how the request body names the score range.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The paged list screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListScreen {
    Vehicles,
    Drivers,
    Devices,
    Trips,
    Fleets,
    IftaFuel,
    IftaMileage,
    VideoHistory,
}

/// Page-size family of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Table,
    Cards,
}

/// Filters offered by a screen's popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterFields {
    pub dates: bool,
    pub score_range: bool,
    pub miles_range: bool,
    pub trip_state: bool,
    pub truncate: bool,
    pub policy_status: &'static [&'static str],
    pub contract_status: &'static [&'static str],
    pub status: &'static [&'static str],
}

impl FilterFields {
    pub fn is_empty(&self) -> bool {
        !(self.dates || self.score_range || self.miles_range || self.trip_state || self.truncate)
            && self.policy_status.is_empty()
            && self.contract_status.is_empty()
            && self.status.is_empty()
    }
}

/// A table column: payload key and header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    pub searchable: bool,
}

const fn col(key: &'static str, header: &'static str, sortable: bool, searchable: bool) -> Column {
    Column {
        key,
        header,
        sortable,
        searchable,
    }
}

/// Static description of one screen variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    pub title: &'static str,
    pub columns: &'static [Column],
    pub layout: Layout,
    pub filters: FilterFields,
    /// Request-body key of the score range
    pub score_key: &'static str,
    /// Search input waits for typing to pause before fetching
    pub debounced_search: bool,
    /// Filter state survives navigating away
    pub persists_filters: bool,
}

const VEHICLE_COLUMNS: &[Column] = &[
    col("vin", "VIN", true, true),
    col("make", "Make", true, true),
    col("model", "Model", true, false),
    col("year", "Year", true, false),
    col("plateNumber", "Plate", false, true),
    col("imei", "Device", false, true),
];

const DRIVER_COLUMNS: &[Column] = &[
    col("firstName", "First name", true, true),
    col("lastName", "Last name", true, true),
    col("email", "Email", false, true),
    col("phone", "Phone", false, false),
    col("score", "Score", true, false),
];

const DEVICE_COLUMNS: &[Column] = &[
    col("imei", "IMEI", true, true),
    col("deviceType", "Type", true, false),
    col("vin", "Vehicle", false, true),
    col("status", "Status", true, false),
    col("lastSeen", "Last seen", true, false),
];

const TRIP_COLUMNS: &[Column] = &[
    col("tripId", "Trip", false, true),
    col("driverName", "Driver", true, true),
    col("startTime", "Start", true, false),
    col("endTime", "End", true, false),
    col("miles", "Miles", true, false),
    col("tripScore", "Score", true, false),
];

const FLEET_COLUMNS: &[Column] = &[
    col("name", "Fleet", true, true),
    col("lonestarId", "Lonestar ID", false, true),
    col("vehicleCount", "Vehicles", true, false),
    col("driverCount", "Drivers", true, false),
    col("score", "Score", true, false),
    col("policyStatus", "Policy", false, false),
];

const IFTA_FUEL_COLUMNS: &[Column] = &[
    col("jurisdiction", "Jurisdiction", true, true),
    col("vin", "Vehicle", false, true),
    col("gallons", "Gallons", true, false),
    col("purchaseDate", "Date", true, false),
];

const IFTA_MILEAGE_COLUMNS: &[Column] = &[
    col("jurisdiction", "Jurisdiction", true, true),
    col("vin", "Vehicle", false, true),
    col("miles", "Miles", true, false),
    col("month", "Month", true, false),
];

const VIDEO_COLUMNS: &[Column] = &[
    col("imei", "IMEI", false, true),
    col("requestedAt", "Requested", true, false),
    col("startTime", "From", true, false),
    col("endTime", "To", true, false),
    col("status", "Status", true, false),
];

impl ListScreen {
    pub const ALL: [ListScreen; 8] = [
        ListScreen::Vehicles,
        ListScreen::Drivers,
        ListScreen::Devices,
        ListScreen::Trips,
        ListScreen::Fleets,
        ListScreen::IftaFuel,
        ListScreen::IftaMileage,
        ListScreen::VideoHistory,
    ];

    pub fn config(self) -> ScreenConfig {
        match self {
            ListScreen::Vehicles => ScreenConfig {
                title: "Vehicles",
                columns: VEHICLE_COLUMNS,
                layout: Layout::Table,
                filters: FilterFields {
                    status: &["linked", "unlinked"],
                    ..FilterFields::default()
                },
                score_key: "scoreRange",
                debounced_search: false,
                persists_filters: false,
            },
            ListScreen::Drivers => ScreenConfig {
                title: "Drivers",
                columns: DRIVER_COLUMNS,
                layout: Layout::Table,
                filters: FilterFields {
                    score_range: true,
                    ..FilterFields::default()
                },
                score_key: "scoreRange",
                debounced_search: false,
                persists_filters: false,
            },
            ListScreen::Devices => ScreenConfig {
                title: "Devices",
                columns: DEVICE_COLUMNS,
                layout: Layout::Table,
                filters: FilterFields {
                    status: &["online", "offline", "unassigned"],
                    ..FilterFields::default()
                },
                score_key: "scoreRange",
                debounced_search: true,
                persists_filters: false,
            },
            ListScreen::Trips => ScreenConfig {
                title: "Trips",
                columns: TRIP_COLUMNS,
                layout: Layout::Table,
                filters: FilterFields {
                    dates: true,
                    score_range: true,
                    miles_range: true,
                    trip_state: true,
                    truncate: true,
                    ..FilterFields::default()
                },
                score_key: "tripScoreRange",
                debounced_search: false,
                persists_filters: true,
            },
            ListScreen::Fleets => ScreenConfig {
                title: "Fleets",
                columns: FLEET_COLUMNS,
                layout: Layout::Cards,
                filters: FilterFields {
                    score_range: true,
                    miles_range: true,
                    policy_status: &["active", "expired", "cancelled"],
                    contract_status: &["signed", "pending"],
                    ..FilterFields::default()
                },
                score_key: "scoreRange",
                debounced_search: false,
                persists_filters: false,
            },
            ListScreen::IftaFuel => ScreenConfig {
                title: "IFTA fuel",
                columns: IFTA_FUEL_COLUMNS,
                layout: Layout::Table,
                filters: FilterFields {
                    dates: true,
                    ..FilterFields::default()
                },
                score_key: "scoreRange",
                debounced_search: true,
                persists_filters: false,
            },
            ListScreen::IftaMileage => ScreenConfig {
                title: "IFTA mileage",
                columns: IFTA_MILEAGE_COLUMNS,
                layout: Layout::Table,
                filters: FilterFields {
                    dates: true,
                    ..FilterFields::default()
                },
                score_key: "scoreRange",
                debounced_search: true,
                persists_filters: false,
            },
            ListScreen::VideoHistory => ScreenConfig {
                title: "Video footage",
                columns: VIDEO_COLUMNS,
                layout: Layout::Cards,
                filters: FilterFields {
                    dates: true,
                    status: &["pending", "ready", "failed"],
                    ..FilterFields::default()
                },
                score_key: "scoreRange",
                debounced_search: false,
                persists_filters: false,
            },
        }
    }

    /// Rows per page for this screen under `config`
    pub fn items_per_page(self, config: &Config) -> u32 {
        match self.config().layout {
            Layout::Table => config.display.items_per_page,
            Layout::Cards => config.display.card_items_per_page,
        }
    }

    /// Next screen in tab order, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ListScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().title)
    }
}
