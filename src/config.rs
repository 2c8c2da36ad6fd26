//! Application-level configuration constants.

// Data source
pub const CSV_PATH: &str = "asteroids.csv";
pub const EXPECTED_COLUMNS: usize = 7;

// Page elements
pub const APP_ROOT_ID: &str = "app";
pub const RESULTS_ELEMENT_ID: &str = "results";

// Default values for input fields
pub const DEFAULT_ORES: &str = "Iron,Nickel";
pub const DEFAULT_ORIGIN: &str = "GPS:Origin:0:0:0:#FF75C9F1:";
pub const DEFAULT_MAX_DISTANCE: f64 = 0.0;
pub const DEFAULT_AMOUNT: usize = 10;

// Origin strings look like `GPS:name:X:Y:Z:color:`
pub const ORIGIN_MIN_FIELDS: usize = 5;
pub const ORIGIN_FIRST_COORD: usize = 2;

// Distances above this many metres are shown in km
pub const KM_THRESHOLD_M: f64 = 1000.0;
