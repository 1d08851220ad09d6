// src/config/consts.rs

// Remote query surface (fixed by the results site)
pub const RESULTS_URL: &str = "https://www.xcontest.org/switzerland/en/flights/daily-score-pg/";
pub const PAGE_SIZE: usize = 100;
pub const DEFAULT_COUNTRY: &str = "CH";
pub const DEFAULT_CATEGORY: &str = "FAI3";

// Browser session
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Waiting on the dynamic table
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const POLL_INTERVAL_MS: u64 = 200;

// Registries
pub const DEFAULT_DATA_DIR: &str = "data";
pub const EVENTS_FILE: &str = "events.csv";
pub const PARTICIPANTS_SUBDIR: &str = "participants";
pub const REGISTRY_SEP: char = ',';

// Export
pub const DEFAULT_OUT_DIR: &str = "output";
pub const EXPORT_SEP: char = ',';
pub const EXPORT_HEADERS: [&str; 9] = [
    "Rank",
    "Take off time",
    "Pilot name",
    "Take off site",
    "Distance (km)",
    "Route Type",
    "Points",
    "Avg speed (km/h)",
    "Glider",
];
