// CullTracker - platform/config.rs
//
// Platform-specific configuration, directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::{RenamePolicy, TagTemplate, UnitMode};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};

/// Resolved platform paths for CullTracker configuration and exports.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/culltracker/ or %APPDATA%\CullTracker\config\)
    pub config_dir: PathBuf,

    /// Default folder offered by the export "save as" dialog.
    pub export_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        let export_dir = UserDirs::new()
            .and_then(|u| {
                u.download_dir()
                    .map(Path::to_path_buf)
                    .or_else(|| Some(u.home_dir().to_path_buf()))
            })
            .unwrap_or_else(|| PathBuf::from("."));

        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                export = %export_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                export_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
                export_dir,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[tournament]` section.
    pub tournament: TournamentSection,
    /// `[[tags]]` array replacing the default roster.
    pub tags: Option<Vec<TagSection>>,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[tournament]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct TournamentSection {
    /// Unit for new drafts: "decimal" or "lbs_oz".
    pub default_unit: Option<String>,
    /// Tag rename behaviour: "migrate" or "orphan".
    pub rename_policy: Option<String>,
    /// Reset the draft when starting a new tournament.
    pub clear_draft_on_new: Option<bool>,
}

/// One `[[tags]]` entry.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct TagSection {
    pub name: String,
    pub color: Option<String>,
    pub species: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Folder the save dialog opens in.
    pub directory: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Tournament --
    /// Unit mode for new drafts.
    pub default_unit: UnitMode,
    /// How tag renames treat existing entries.
    pub rename_policy: RenamePolicy,
    /// Reset the draft on "new tournament".
    pub clear_draft_on_new: bool,
    /// Roster for new drafts.
    pub tags: Vec<TagTemplate>,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Export --
    /// Export directory override.
    pub export_dir: Option<PathBuf>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_unit: UnitMode::Decimal,
            rename_policy: RenamePolicy::Migrate,
            clear_draft_on_new: false,
            tags: TagTemplate::default_roster(),
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            export_dir: None,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unparseable, returns defaults with one warning; the
/// application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.clone(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    parse_config(&content, &config_path)
}

/// Parse and validate config text. `source` is only used in messages.
pub fn parse_config(content: &str, source: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: source.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    // Validate each field, accumulating all problems.
    let mut config = AppConfig::default();

    // -- Tournament: default_unit --
    if let Some(ref unit) = raw.tournament.default_unit {
        match UnitMode::parse_strict(unit) {
            Some(u) => config.default_unit = u,
            None => warnings.push(format!(
                "[tournament] default_unit = \"{unit}\" is not recognised. \
                 Expected \"decimal\" or \"lbs_oz\". Using default (decimal).",
            )),
        }
    }

    // -- Tournament: rename_policy --
    if let Some(ref policy) = raw.tournament.rename_policy {
        match RenamePolicy::parse(policy) {
            Some(p) => config.rename_policy = p,
            None => warnings.push(format!(
                "[tournament] rename_policy = \"{policy}\" is not recognised. \
                 Expected \"migrate\" or \"orphan\". Using default (migrate).",
            )),
        }
    }

    if let Some(clear) = raw.tournament.clear_draft_on_new {
        config.clear_draft_on_new = clear;
    }

    // -- Tags --
    if let Some(tags) = raw.tags {
        if let Some(roster) = validate_tags(tags, &mut warnings) {
            config.tags = roster;
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "[ui] font_size".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_FONT_SIZE,
                    constants::MAX_FONT_SIZE
                ),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_FONT_SIZE
            ));
        }
    }

    // -- Export: directory --
    if let Some(ref dir) = raw.export.directory {
        if !dir.is_empty() {
            config.export_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate a `[[tags]]` roster. Bad entries are skipped with a warning;
/// `None` means the roster is unusable and the default should stand.
fn validate_tags(tags: Vec<TagSection>, warnings: &mut Vec<String>) -> Option<Vec<TagTemplate>> {
    if tags.len() > constants::MAX_TAGS {
        warnings.push(format!(
            "[[tags]] defines {} tags, maximum is {}. Using the default roster.",
            tags.len(),
            constants::MAX_TAGS,
        ));
        return None;
    }

    let mut roster = Vec::with_capacity(tags.len());
    for (i, tag) in tags.into_iter().enumerate() {
        let name = tag.name.trim();
        if name.is_empty() {
            warnings.push(format!("[[tags]] entry {} has no name. Skipped.", i + 1));
            continue;
        }
        if name.chars().count() > constants::MAX_TAG_NAME_LEN {
            warnings.push(format!(
                "[[tags]] entry {} name is longer than {} characters. Skipped.",
                i + 1,
                constants::MAX_TAG_NAME_LEN,
            ));
            continue;
        }
        if roster.iter().any(|t: &TagTemplate| t.name == name) {
            warnings.push(format!(
                "[[tags]] entry {} repeats the name \"{name}\". Skipped.",
                i + 1
            ));
            continue;
        }
        roster.push(TagTemplate {
            name: name.to_string(),
            color: tag
                .color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| constants::DEFAULT_NEW_TAG_COLOUR.to_string()),
            species: tag.species.filter(|s| !s.is_empty()),
        });
    }

    if roster.is_empty() {
        warnings.push("[[tags]] has no usable entries. Using the default roster.".to_string());
        None
    } else {
        Some(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> (AppConfig, Vec<String>) {
        parse_config(content, Path::new("config.toml"))
    }

    #[test]
    fn test_missing_file_gives_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.default_unit, UnitMode::Decimal);
        assert_eq!(config.rename_policy, RenamePolicy::Migrate);
        assert_eq!(config.tags.len(), 5);
    }

    #[test]
    fn test_load_config_reads_file_from_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[tournament]\ndefault_unit = \"lbs_oz\"\n",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.default_unit, UnitMode::LbsOz);
    }

    #[test]
    fn test_full_config_is_applied() {
        let (config, warnings) = parse(
            r##"
            [tournament]
            default_unit = "lbs_oz"
            rename_policy = "orphan"
            clear_draft_on_new = true

            [[tags]]
            name = "Red"
            color = "#FF0000"
            species = "Smallmouth"

            [[tags]]
            name = "Blue"

            [ui]
            theme = "light"
            font_size = 16.0

            [export]
            directory = "/tmp/exports"

            [logging]
            level = "debug"
            file = "/tmp/culltracker.log"
            "##,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.default_unit, UnitMode::LbsOz);
        assert_eq!(config.rename_policy, RenamePolicy::Orphan);
        assert!(config.clear_draft_on_new);
        assert_eq!(config.tags.len(), 2);
        assert_eq!(config.tags[0].species.as_deref(), Some("Smallmouth"));
        assert_eq!(config.tags[1].color, constants::DEFAULT_NEW_TAG_COLOUR);
        assert!(!config.dark_mode);
        assert_eq!(config.font_size, 16.0);
        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/exports")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/culltracker.log"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (config, warnings) = parse(
            r#"
            [tournament]
            default_unit = "kilograms"
            rename_policy = "sometimes"

            [ui]
            font_size = 99.0

            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(warnings.len(), 4, "{warnings:?}");
        assert_eq!(config.default_unit, UnitMode::Decimal);
        assert_eq!(config.rename_policy, RenamePolicy::Migrate);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
        assert!(config.log_level.is_none());
        assert!(warnings
            .iter()
            .any(|w| w.starts_with("Config '[ui] font_size' = '99' is out of range")));
    }

    #[test]
    fn test_malformed_toml_gives_defaults_and_one_warning() {
        let (config, warnings) = parse("[tournament\nthis is not toml");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Config parse error 'config.toml'"));
        assert_eq!(config.tags.len(), 5);
    }

    #[test]
    fn test_bad_tag_entries_are_skipped() {
        let (config, warnings) = parse(
            r#"
            [[tags]]
            name = "  "

            [[tags]]
            name = "Red"

            [[tags]]
            name = "Red"
            "#,
        );
        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert_eq!(config.tags.len(), 1);
        assert_eq!(config.tags[0].name, "Red");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (_, warnings) = parse("[future]\nsetting = 1\n");
        assert!(warnings.is_empty());
    }
}
