// CullTracker - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "CullTracker";

/// Application identifier used for config directories.
pub const APP_ID: &str = "CullTracker";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Scoring
// =============================================================================

/// Number of heaviest fish that count toward the tournament total.
pub const BEST_FISH_COUNT: usize = 5;

/// Ounces per pound, used when converting "lbs oz" weights to decimal pounds.
pub const OUNCES_PER_POUND: f64 = 16.0;

/// Weight unit label appended to totals in exports and on screen.
pub const WEIGHT_UNIT_LABEL: &str = "lbs";

// =============================================================================
// Tag roster
// =============================================================================

/// Built-in tag roster used for every new draft unless config overrides it.
/// Each entry is `(name, colour)`.
pub const DEFAULT_TAGS: &[(&str, &str)] = &[
    ("Orange", "#FFA500"),
    ("Green", "#008000"),
    ("Pink", "#FFC0CB"),
    ("Chartreuse", "#DFFF00"),
    ("Orange/White", "#FFCC99"),
];

/// Colour given to tags added from the tracker screen.
pub const DEFAULT_NEW_TAG_COLOUR: &str = "#FFFFFF";

/// Maximum number of tags accepted from config.toml.
pub const MAX_TAGS: usize = 50;

/// Maximum tag name length (characters) accepted from config.toml.
pub const MAX_TAG_NAME_LEN: usize = 64;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Title of the cull weight prompt window.
pub const CULL_PROMPT_TITLE: &str = "Enter new culled weight";

/// Text shown in place of an empty cull list.
pub const NO_CULLS_LABEL: &str = "None";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Export
// =============================================================================

/// Suffix appended to the sanitised tournament name for summary exports.
pub const SUMMARY_FILE_SUFFIX: &str = "_summary.txt";

/// Default file name for the history CSV export.
pub const HISTORY_CSV_FILE_NAME: &str = "tournaments.csv";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
