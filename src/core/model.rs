// CullTracker - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::util::constants;

// =============================================================================
// Tags
// =============================================================================

/// Stable identity of a tag within a draft.
///
/// Weights and culls are keyed by this id rather than by the tag's display
/// name, so renaming a tag never detaches its entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TagId(pub u64);

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One catch slot, identified on the water by a coloured tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,

    /// Display name. Also the lookup key for name-addressed operations.
    pub name: String,

    /// Display colour, normally `#RRGGBB`. Never interpreted by the core.
    pub color: String,

    /// Optional species label.
    #[serde(default)]
    pub species: Option<String>,
}

/// Editable attributes of a [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Name,
    Color,
    Species,
}

/// What happens to a tag's weight and culls when the tag is renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenamePolicy {
    /// Entries stay with the tag and are found under its new name.
    #[default]
    Migrate,

    /// Entries stay under the old name, detached from the tag. Matches the
    /// behaviour of trackers that key weights by tag name.
    Orphan,
}

impl RenamePolicy {
    /// Parse a config value (`"migrate"` / `"orphan"`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "migrate" => Some(RenamePolicy::Migrate),
            "orphan" => Some(RenamePolicy::Orphan),
            _ => None,
        }
    }
}

/// Initial tag definition, as read from constants or config.toml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTemplate {
    pub name: String,
    pub color: String,
    pub species: Option<String>,
}

impl TagTemplate {
    /// The built-in five-tag roster.
    pub fn default_roster() -> Vec<TagTemplate> {
        constants::DEFAULT_TAGS
            .iter()
            .map(|(name, color)| TagTemplate {
                name: (*name).to_string(),
                color: (*color).to_string(),
                species: None,
            })
            .collect()
    }
}

// =============================================================================
// Units
// =============================================================================

/// How weight strings are written and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitMode {
    /// Decimal pounds, e.g. `"3.25"`.
    #[default]
    Decimal,

    /// Pounds and ounces separated by a space, e.g. `"3 4"`.
    LbsOz,
}

impl UnitMode {
    /// Map a raw unit string onto a mode.
    ///
    /// Only `"decimal"` selects decimal pounds; every other string,
    /// including empty, selects pounds and ounces.
    pub fn from_raw(raw: &str) -> Self {
        if raw == "decimal" {
            UnitMode::Decimal
        } else {
            UnitMode::LbsOz
        }
    }

    /// Strict parse used for config and CLI values.
    pub fn parse_strict(raw: &str) -> Option<Self> {
        match raw {
            "decimal" => Some(UnitMode::Decimal),
            "lbs_oz" => Some(UnitMode::LbsOz),
            _ => None,
        }
    }

    /// Wire identifier (`"decimal"` / `"lbs_oz"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitMode::Decimal => "decimal",
            UnitMode::LbsOz => "lbs_oz",
        }
    }

    /// Human-readable label for the unit selector.
    pub fn label(&self) -> &'static str {
        match self {
            UnitMode::Decimal => "Pounds (e.g. 3.25)",
            UnitMode::LbsOz => "Pounds & Ounces",
        }
    }
}

impl std::fmt::Display for UnitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One half of a `"<lbs> <oz>"` weight string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightPart {
    Pounds,
    Ounces,
}

// =============================================================================
// Draft
// =============================================================================

/// Header fields of the start form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    TournamentName,
    Location,
    Date,
    Notes,
    Unit,
}

/// The tournament currently being entered.
///
/// All containers are owned values, so cloning a draft (into a record, or a
/// record back into the draft) never shares structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentDraft {
    pub tournament_name: String,
    pub location: String,
    pub date: String,
    pub notes: String,
    pub unit: UnitMode,
    pub tags: Vec<Tag>,

    /// Current raw weight per tag. Parsed only when read.
    pub fish_weights: BTreeMap<TagId, String>,

    /// Superseded weights per tag, oldest first.
    pub cull_history: BTreeMap<TagId, Vec<String>>,

    /// Weights addressed by a name no tag currently carries.
    #[serde(default)]
    pub orphaned_weights: BTreeMap<String, String>,

    /// Culls addressed by a name no tag currently carries.
    #[serde(default)]
    pub orphaned_culls: BTreeMap<String, Vec<String>>,
}

impl TournamentDraft {
    /// Empty draft with the given roster and unit.
    pub fn new(roster: &[TagTemplate], unit: UnitMode) -> Self {
        let tags = roster
            .iter()
            .enumerate()
            .map(|(i, t)| Tag {
                id: TagId(i as u64 + 1),
                name: t.name.clone(),
                color: t.color.clone(),
                species: t.species.clone(),
            })
            .collect();

        Self {
            tournament_name: String::new(),
            location: String::new(),
            date: String::new(),
            notes: String::new(),
            unit,
            tags,
            fish_weights: BTreeMap::new(),
            cull_history: BTreeMap::new(),
            orphaned_weights: BTreeMap::new(),
            orphaned_culls: BTreeMap::new(),
        }
    }

    /// Next unused tag id: one past every id held by a tag or an entry.
    pub fn next_tag_id(&self) -> TagId {
        let max_tag = self.tags.iter().map(|t| t.id.0).max().unwrap_or(0);
        let max_entry = self
            .fish_weights
            .keys()
            .chain(self.cull_history.keys())
            .map(|id| id.0)
            .max()
            .unwrap_or(0);
        TagId(max_tag.max(max_entry) + 1)
    }

    /// First tag carrying `id`.
    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// First tag (in roster order) whose name is exactly `name`.
    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Raw weight string for a tag.
    pub fn weight(&self, id: TagId) -> Option<&str> {
        self.fish_weights.get(&id).map(String::as_str)
    }

    /// Cull sequence for a tag (empty when none recorded).
    pub fn culls(&self, id: TagId) -> &[String] {
        self.cull_history.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Raw weight looked up by name: the named tag's entry, or an orphaned
    /// entry under that name when no tag carries it.
    pub fn weight_by_name(&self, name: &str) -> Option<&str> {
        match self.tag_by_name(name) {
            Some(tag) => self.weight(tag.id),
            None => self.orphaned_weights.get(name).map(String::as_str),
        }
    }

    /// Cull sequence looked up by name, with the same resolution as
    /// [`TournamentDraft::weight_by_name`].
    pub fn culls_by_name(&self, name: &str) -> &[String] {
        match self.tag_by_name(name) {
            Some(tag) => self.culls(tag.id),
            None => self
                .orphaned_culls
                .get(name)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    /// Every raw weight string in the draft, attached or orphaned.
    pub fn all_weights(&self) -> impl Iterator<Item = &str> {
        self.fish_weights
            .values()
            .chain(self.orphaned_weights.values())
            .map(String::as_str)
    }

    /// Total number of culls recorded across all tags.
    pub fn cull_count(&self) -> usize {
        self.cull_history
            .values()
            .chain(self.orphaned_culls.values())
            .map(Vec::len)
            .sum()
    }

    /// Tracker screen heading: `"<name> – <location> – <date>"`.
    pub fn heading(&self) -> String {
        format!(
            "{} \u{2013} {} \u{2013} {}",
            self.tournament_name, self.location, self.date
        )
    }
}

// =============================================================================
// Saved tournaments
// =============================================================================

/// Point-in-time snapshot of a saved draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    /// Deep copy of the draft at save time.
    pub draft: TournamentDraft,

    /// Best-five total formatted to two decimals, e.g. `"16.00"`.
    pub best_five_total: String,

    /// When the record was saved.
    pub saved_at: DateTime<Utc>,
}

impl TournamentRecord {
    /// Number of fish with a weight string recorded.
    pub fn fish_count(&self) -> usize {
        self.draft.all_weights().filter(|w| !w.is_empty()).count()
    }
}
