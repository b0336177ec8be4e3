// CullTracker - app/session.rs
//
// Tournament session: the draft being entered, the saved history, and the
// start -> tracker -> summary view cycle.
//
// Design principles:
// - Every operation completes synchronously; nothing is cached. The best-five
//   total is recomputed from the draft on each read.
// - Records are deep copies. Saving clones the draft into history and editing
//   clones a record back, so later edits never reach saved tournaments.
// - The draft survives a save; it is only replaced by edit(), reset_draft(),
//   or new_tournament() from the summary when clear_draft_on_new is set.
// - Nothing here is persisted; history lives for the life of the process.

use crate::core::export::{self, SummaryDocument};
use crate::core::model::{
    DraftField, RenamePolicy, Tag, TagField, TagId, TagTemplate, TournamentDraft,
    TournamentRecord, UnitMode, WeightPart,
};
use crate::core::weight;
use crate::util::error::SessionError;
use chrono::Utc;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Editing the header fields of a new draft.
    #[default]
    Start,
    /// Entering weights and culls for the draft.
    Tracker,
    /// Listing saved tournaments.
    Summary,
}

/// Behaviour switches for a session, normally taken from `AppConfig`.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub default_unit: UnitMode,
    pub rename_policy: RenamePolicy,
    pub clear_draft_on_new: bool,
    pub roster: Vec<TagTemplate>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            default_unit: UnitMode::Decimal,
            rename_policy: RenamePolicy::Migrate,
            clear_draft_on_new: false,
            roster: TagTemplate::default_roster(),
        }
    }
}

/// Owns the draft and the saved-tournament history.
#[derive(Debug)]
pub struct TournamentSession {
    view: View,
    draft: TournamentDraft,
    history: Vec<TournamentRecord>,
    options: SessionOptions,
}

impl Default for TournamentSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl TournamentSession {
    /// Start a session on the start screen with an empty draft.
    pub fn new(options: SessionOptions) -> Self {
        let draft = TournamentDraft::new(&options.roster, options.default_unit);
        Self {
            view: View::Start,
            draft,
            history: Vec::new(),
            options,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn draft(&self) -> &TournamentDraft {
        &self.draft
    }

    /// Saved tournaments in save order.
    pub fn history(&self) -> &[TournamentRecord] {
        &self.history
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    // -------------------------------------------------------------------------
    // View transitions
    // -------------------------------------------------------------------------

    /// Start -> tracker. Header fields may be empty.
    pub fn begin_tracking(&mut self) {
        tracing::info!(
            tags = self.draft.tags.len(),
            unit = %self.draft.unit,
            "Tracking started"
        );
        self.view = View::Tracker;
    }

    /// Summary -> start.
    ///
    /// `clear_draft_on_new` only applies when leaving the summary, where the
    /// draft has been saved. From any other view this is `back_to_start`.
    pub fn new_tournament(&mut self) {
        if self.view == View::Summary && self.options.clear_draft_on_new {
            self.reset_draft();
        }
        self.view = View::Start;
    }

    /// Tracker -> start to revise the header. The draft is never cleared.
    pub fn back_to_start(&mut self) {
        self.view = View::Start;
    }

    /// Jump to the history list without saving.
    pub fn show_history(&mut self) {
        self.view = View::Summary;
    }

    /// Replace the draft with an empty one using the configured roster and unit.
    pub fn reset_draft(&mut self) {
        self.draft = TournamentDraft::new(&self.options.roster, self.options.default_unit);
        tracing::debug!("Draft reset");
    }

    // -------------------------------------------------------------------------
    // Draft header
    // -------------------------------------------------------------------------

    /// Replace a header field. Any string is accepted; for `Unit`, only
    /// `"decimal"` selects decimal pounds and anything else selects lbs/oz.
    pub fn set_draft_field(&mut self, field: DraftField, value: &str) {
        let d = &mut self.draft;
        match field {
            DraftField::TournamentName => d.tournament_name = value.to_string(),
            DraftField::Location => d.location = value.to_string(),
            DraftField::Date => d.date = value.to_string(),
            DraftField::Notes => d.notes = value.to_string(),
            DraftField::Unit => d.unit = UnitMode::from_raw(value),
        }
        tracing::debug!(field = ?field, "Draft field updated");
    }

    pub fn set_unit(&mut self, unit: UnitMode) {
        self.draft.unit = unit;
        tracing::debug!(unit = %unit, "Unit changed");
    }

    // -------------------------------------------------------------------------
    // Tags
    // -------------------------------------------------------------------------

    /// Replace one attribute of the tag at `index`.
    ///
    /// An empty species clears it. Renames follow the session's
    /// [`RenamePolicy`].
    pub fn update_tag(
        &mut self,
        index: usize,
        field: TagField,
        value: &str,
    ) -> Result<(), SessionError> {
        let len = self.draft.tags.len();
        let tag = self
            .draft
            .tags
            .get_mut(index)
            .ok_or(SessionError::TagIndexOutOfRange { index, len })?;

        match field {
            TagField::Color => tag.color = value.to_string(),
            TagField::Species => {
                tag.species = (!value.is_empty()).then(|| value.to_string());
            }
            TagField::Name => {
                let old_name = std::mem::replace(&mut tag.name, value.to_string());
                let id = tag.id;
                if self.options.rename_policy == RenamePolicy::Orphan && old_name != value {
                    self.detach_entries(id, old_name);
                    self.adopt_orphans(id, value);
                }
                tracing::debug!(tag = %id, "Tag renamed");
            }
        }
        Ok(())
    }

    /// Move a tag's entries to the orphaned maps under `name`.
    fn detach_entries(&mut self, id: TagId, name: String) {
        let d = &mut self.draft;
        if let Some(w) = d.fish_weights.remove(&id) {
            d.orphaned_weights.insert(name.clone(), w);
        }
        if let Some(c) = d.cull_history.remove(&id) {
            d.orphaned_culls.entry(name).or_default().extend(c);
        }
    }

    /// Attach orphaned entries stored under `name` to the tag.
    fn adopt_orphans(&mut self, id: TagId, name: &str) {
        let d = &mut self.draft;
        if let Some(w) = d.orphaned_weights.remove(name) {
            d.fish_weights.insert(id, w);
        }
        if let Some(c) = d.orphaned_culls.remove(name) {
            d.cull_history.insert(id, c);
        }
    }

    /// Append a new tag to the roster and return its id.
    pub fn add_tag(&mut self, name: &str, color: &str, species: Option<&str>) -> TagId {
        let id = self.draft.next_tag_id();
        self.draft.tags.push(Tag {
            id,
            name: name.to_string(),
            color: color.to_string(),
            species: species.filter(|s| !s.is_empty()).map(str::to_string),
        });
        if self.options.rename_policy == RenamePolicy::Orphan {
            self.adopt_orphans(id, name);
        }
        tracing::debug!(tag = %id, "Tag added");
        id
    }

    /// Remove the tag at `index` together with its weight and culls.
    pub fn remove_tag(&mut self, index: usize) -> Result<Tag, SessionError> {
        let len = self.draft.tags.len();
        if index >= len {
            return Err(SessionError::TagIndexOutOfRange { index, len });
        }
        let tag = self.draft.tags.remove(index);
        self.draft.fish_weights.remove(&tag.id);
        self.draft.cull_history.remove(&tag.id);
        tracing::debug!(tag = %tag.id, "Tag removed");
        Ok(tag)
    }

    fn ensure_tag(&self, id: TagId) -> Result<(), SessionError> {
        self.draft
            .tag(id)
            .map(|_| ())
            .ok_or(SessionError::UnknownTag { id: id.0 })
    }

    // -------------------------------------------------------------------------
    // Weights and culls
    // -------------------------------------------------------------------------

    /// Store the raw weight string for a tag, as typed.
    pub fn set_weight(&mut self, id: TagId, raw: &str) -> Result<(), SessionError> {
        self.ensure_tag(id)?;
        self.draft.fish_weights.insert(id, raw.to_string());
        Ok(())
    }

    /// Store a raw weight addressed by tag name. A name no tag carries is
    /// kept as an orphaned entry.
    pub fn set_weight_by_name(&mut self, name: &str, raw: &str) {
        match self.draft.tag_by_name(name).map(|t| t.id) {
            Some(id) => {
                self.draft.fish_weights.insert(id, raw.to_string());
            }
            None => {
                self.draft
                    .orphaned_weights
                    .insert(name.to_string(), raw.to_string());
            }
        }
    }

    /// Replace the pounds or ounces half of a tag's `"<lbs> <oz>"` weight.
    pub fn set_weight_part(
        &mut self,
        id: TagId,
        part: WeightPart,
        value: &str,
    ) -> Result<(), SessionError> {
        self.ensure_tag(id)?;
        let spliced = weight::splice_weight_part(self.draft.weight(id), part, value);
        self.draft.fish_weights.insert(id, spliced);
        Ok(())
    }

    /// Record a culled weight for a tag.
    ///
    /// `None` (prompt cancelled) and `Some("")` record nothing. Returns
    /// whether a cull was appended. The tag's current weight is untouched.
    pub fn add_cull(&mut self, id: TagId, raw: Option<&str>) -> Result<bool, SessionError> {
        self.ensure_tag(id)?;
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            tracing::debug!(tag = %id, "Empty cull ignored");
            return Ok(false);
        };
        self.draft
            .cull_history
            .entry(id)
            .or_default()
            .push(raw.to_string());
        tracing::debug!(tag = %id, "Cull recorded");
        Ok(true)
    }

    /// Record a culled weight addressed by tag name. Same acceptance rules as
    /// [`TournamentSession::add_cull`].
    pub fn add_cull_by_name(&mut self, name: &str, raw: Option<&str>) -> bool {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return false;
        };
        let entry = match self.draft.tag_by_name(name).map(|t| t.id) {
            Some(id) => self.draft.cull_history.entry(id).or_default(),
            None => self
                .draft
                .orphaned_culls
                .entry(name.to_string())
                .or_default(),
        };
        entry.push(raw.to_string());
        true
    }

    /// Culls for a tag as shown on the tracker: `"a, b"` or `"None"`.
    pub fn cull_summary(&self, id: TagId) -> String {
        let culls = self.draft.culls(id);
        if culls.is_empty() {
            crate::util::constants::NO_CULLS_LABEL.to_string()
        } else {
            culls.join(", ")
        }
    }

    // -------------------------------------------------------------------------
    // Scoring
    // -------------------------------------------------------------------------

    /// Convert a raw weight using the draft's current unit.
    pub fn convert_to_decimal(&self, raw: &str) -> Option<f64> {
        weight::convert_to_decimal(raw, self.draft.unit)
    }

    /// Best-five total of the draft, e.g. `"16.00"`.
    pub fn best_five_total(&self) -> String {
        weight::best_five_total(self.draft.all_weights(), self.draft.unit)
    }

    /// Best-five total as a number, for display.
    pub fn best_five_value(&self) -> f64 {
        weight::best_five_value(self.draft.all_weights(), self.draft.unit)
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Snapshot the draft into history and show the summary.
    pub fn save_tournament(&mut self) -> &TournamentRecord {
        let record = TournamentRecord {
            draft: self.draft.clone(),
            best_five_total: self.best_five_total(),
            saved_at: Utc::now(),
        };
        tracing::info!(
            index = self.history.len(),
            total = %record.best_five_total,
            "Tournament saved"
        );
        self.history.push(record);
        self.view = View::Summary;
        &self.history[self.history.len() - 1]
    }

    /// Load a saved record into the draft and show the tracker.
    pub fn edit(&mut self, index: usize) -> Result<(), SessionError> {
        let record = self.record(index)?;
        self.draft = record.draft.clone();
        self.view = View::Tracker;
        tracing::info!(index, "Tournament loaded for editing");
        Ok(())
    }

    /// Remove a saved record; the rest keep their order.
    pub fn delete(&mut self, index: usize) -> Result<TournamentRecord, SessionError> {
        self.record(index)?;
        let removed = self.history.remove(index);
        tracing::info!(index, remaining = self.history.len(), "Tournament deleted");
        Ok(removed)
    }

    /// Plain-text summary of a saved record and its suggested file name.
    pub fn export(&self, index: usize) -> Result<SummaryDocument, SessionError> {
        Ok(export::summary_document(self.record(index)?))
    }

    pub fn record(&self, index: usize) -> Result<&TournamentRecord, SessionError> {
        self.history
            .get(index)
            .ok_or(SessionError::RecordIndexOutOfRange {
                index,
                len: self.history.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TournamentSession {
        TournamentSession::default()
    }

    fn orphan_session() -> TournamentSession {
        TournamentSession::new(SessionOptions {
            rename_policy: RenamePolicy::Orphan,
            ..Default::default()
        })
    }

    fn tag_id(s: &TournamentSession, index: usize) -> TagId {
        s.draft().tags[index].id
    }

    #[test]
    fn test_view_cycle() {
        let mut s = session();
        assert_eq!(s.view(), View::Start);
        s.begin_tracking();
        assert_eq!(s.view(), View::Tracker);
        s.save_tournament();
        assert_eq!(s.view(), View::Summary);
        s.new_tournament();
        assert_eq!(s.view(), View::Start);
        s.show_history();
        s.edit(0).unwrap();
        assert_eq!(s.view(), View::Tracker);
    }

    #[test]
    fn test_set_draft_field_accepts_anything() {
        let mut s = session();
        s.set_draft_field(DraftField::TournamentName, "Spring Open");
        s.set_draft_field(DraftField::Location, "");
        s.set_draft_field(DraftField::Date, "not a date");
        s.set_draft_field(DraftField::Notes, "calm");
        assert_eq!(s.draft().tournament_name, "Spring Open");
        assert_eq!(s.draft().date, "not a date");

        s.set_draft_field(DraftField::Unit, "lbs_oz");
        assert_eq!(s.draft().unit, UnitMode::LbsOz);
        s.set_draft_field(DraftField::Unit, "decimal");
        assert_eq!(s.draft().unit, UnitMode::Decimal);
        s.set_draft_field(DraftField::Unit, "stone");
        assert_eq!(s.draft().unit, UnitMode::LbsOz);
    }

    #[test]
    fn test_update_tag_fields_and_bounds() {
        let mut s = session();
        s.update_tag(0, TagField::Color, "#000000").unwrap();
        s.update_tag(0, TagField::Species, "Spotted").unwrap();
        assert_eq!(s.draft().tags[0].color, "#000000");
        assert_eq!(s.draft().tags[0].species.as_deref(), Some("Spotted"));
        s.update_tag(0, TagField::Species, "").unwrap();
        assert_eq!(s.draft().tags[0].species, None);

        assert_eq!(
            s.update_tag(5, TagField::Name, "x"),
            Err(SessionError::TagIndexOutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_rename_migrates_entries_by_default() {
        let mut s = session();
        s.set_weight_by_name("Orange", "3.5");
        assert!(s.add_cull_by_name("Orange", Some("2.0")));

        s.update_tag(0, TagField::Name, "Red").unwrap();
        assert_eq!(s.draft().weight_by_name("Orange"), None);
        assert!(s.draft().culls_by_name("Orange").is_empty());
        assert_eq!(s.draft().weight_by_name("Red"), Some("3.5"));
        assert_eq!(s.draft().culls_by_name("Red"), ["2.0"]);
    }

    #[test]
    fn test_rename_orphans_entries_under_old_name() {
        let mut s = orphan_session();
        s.set_weight_by_name("Orange", "3.5");
        s.add_cull_by_name("Orange", Some("2.0"));

        s.update_tag(0, TagField::Name, "Red").unwrap();
        assert_eq!(s.draft().weight_by_name("Red"), None);
        assert!(s.draft().culls_by_name("Red").is_empty());
        assert_eq!(s.draft().weight_by_name("Orange"), Some("3.5"));
        assert_eq!(s.draft().culls_by_name("Orange"), ["2.0"]);
        // Orphaned weights still count toward the total.
        assert_eq!(s.best_five_total(), "3.50");

        // Typing the old name back re-attaches the entries.
        s.update_tag(0, TagField::Name, "Orange").unwrap();
        assert_eq!(s.draft().weight(tag_id(&s, 0)), Some("3.5"));
        assert!(s.draft().orphaned_weights.is_empty());
    }

    #[test]
    fn test_set_weight_stores_raw_string() {
        let mut s = session();
        let id = tag_id(&s, 1);
        s.set_weight(id, " 3.2x ").unwrap();
        assert_eq!(s.draft().weight(id), Some(" 3.2x "));
        assert_eq!(
            s.set_weight(TagId(99), "1"),
            Err(SessionError::UnknownTag { id: 99 })
        );
    }

    #[test]
    fn test_set_weight_part_builds_lbs_oz_string() {
        let mut s = session();
        s.set_unit(UnitMode::LbsOz);
        let id = tag_id(&s, 0);
        s.set_weight_part(id, WeightPart::Ounces, "4").unwrap();
        assert_eq!(s.draft().weight(id), Some(" 4"));
        assert_eq!(s.best_five_total(), "0.00");
        s.set_weight_part(id, WeightPart::Pounds, "3").unwrap();
        assert_eq!(s.draft().weight(id), Some("3 4"));
        assert_eq!(s.best_five_total(), "3.25");
    }

    #[test]
    fn test_add_cull_appends_and_rejects_empty() {
        let mut s = session();
        let id = tag_id(&s, 2);
        s.set_weight(id, "4.0").unwrap();

        assert!(s.add_cull(id, Some("2.5")).unwrap());
        assert!(s.add_cull(id, Some("3.1")).unwrap());
        assert!(!s.add_cull(id, Some("")).unwrap());
        assert!(!s.add_cull(id, None).unwrap());

        assert_eq!(s.draft().culls(id), ["2.5", "3.1"]);
        assert_eq!(s.draft().weight(id), Some("4.0"));
        assert_eq!(s.cull_summary(id), "2.5, 3.1");
        assert_eq!(s.cull_summary(tag_id(&s, 0)), "None");
    }

    #[test]
    fn test_best_five_uses_current_unit() {
        let mut s = session();
        s.set_weight(tag_id(&s, 0), "3 8").unwrap();
        assert_eq!(s.best_five_total(), "3.00");
        s.set_unit(UnitMode::LbsOz);
        assert_eq!(s.best_five_total(), "3.50");
        assert_eq!(s.best_five_value(), 3.5);
    }

    #[test]
    fn test_add_and_remove_tag() {
        let mut s = session();
        let id = s.add_tag("Blue", "#0000FF", Some(""));
        assert_eq!(s.draft().tags.len(), 6);
        assert_eq!(s.draft().tags[5].species, None);
        s.set_weight(id, "2.2").unwrap();

        let removed = s.remove_tag(5).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(s.draft().weight(id), None);
        assert!(s.remove_tag(5).is_err());
        // Removal drops the entries, so a new tag starts empty.
        let again = s.add_tag("Blue", "#0000FF", None);
        assert_eq!(s.draft().weight(again), None);
    }

    #[test]
    fn test_save_keeps_draft_and_snapshots_it() {
        let mut s = session();
        let id = tag_id(&s, 0);
        s.set_draft_field(DraftField::TournamentName, "Spring Open");
        s.set_weight(id, "4.0").unwrap();
        let total = s.save_tournament().best_five_total.clone();
        assert_eq!(total, "4.00");

        // The draft is not cleared, and later edits do not reach history.
        assert_eq!(s.draft().tournament_name, "Spring Open");
        s.set_weight(id, "9.0").unwrap();
        s.update_tag(0, TagField::Name, "Changed").unwrap();
        assert_eq!(s.history()[0].draft.weight(id), Some("4.0"));
        assert_eq!(s.history()[0].draft.tags[0].name, "Orange");
        assert_eq!(s.history()[0].best_five_total, "4.00");
    }

    #[test]
    fn test_edit_deep_copies_record() {
        let mut s = session();
        let id = tag_id(&s, 0);
        s.set_weight(id, "4.0").unwrap();
        s.add_cull(id, Some("1.0")).unwrap();
        s.save_tournament();
        let saved = s.history()[0].draft.clone();

        s.reset_draft();
        s.edit(0).unwrap();
        assert_eq!(s.draft(), &saved);

        s.add_cull(id, Some("2.0")).unwrap();
        s.set_weight(id, "5.0").unwrap();
        assert_eq!(s.history()[0].draft, saved);
        assert_eq!(
            s.edit(3),
            Err(SessionError::RecordIndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_new_tournament_keeps_or_clears_draft() {
        let mut s = session();
        s.set_draft_field(DraftField::Notes, "keep me");
        s.save_tournament();
        s.new_tournament();
        assert_eq!(s.draft().notes, "keep me");

        let mut s = TournamentSession::new(SessionOptions {
            clear_draft_on_new: true,
            default_unit: UnitMode::LbsOz,
            ..Default::default()
        });
        s.set_draft_field(DraftField::Notes, "drop me");
        s.set_unit(UnitMode::Decimal);
        s.save_tournament();
        s.new_tournament();
        assert_eq!(s.draft().notes, "");
        assert_eq!(s.draft().unit, UnitMode::LbsOz);
    }

    #[test]
    fn test_leaving_tracker_never_drops_unsaved_draft() {
        let mut s = TournamentSession::new(SessionOptions {
            clear_draft_on_new: true,
            ..Default::default()
        });
        s.set_draft_field(DraftField::TournamentName, "Unsaved");
        s.begin_tracking();
        let id = tag_id(&s, 0);
        s.set_weight(id, "5.5").unwrap();

        s.back_to_start();
        assert_eq!(s.view(), View::Start);
        assert_eq!(s.draft().tournament_name, "Unsaved");
        assert_eq!(s.draft().weight(id), Some("5.5"));

        s.begin_tracking();
        s.new_tournament();
        assert_eq!(s.view(), View::Start);
        assert_eq!(s.draft().tournament_name, "Unsaved");
        assert_eq!(s.draft().weight(id), Some("5.5"));
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_delete_and_export() {
        let mut s = session();
        for name in ["A", "B", "C"] {
            s.set_draft_field(DraftField::TournamentName, name);
            s.save_tournament();
        }
        let removed = s.delete(1).unwrap();
        assert_eq!(removed.draft.tournament_name, "B");
        let names: Vec<_> = s
            .history()
            .iter()
            .map(|r| r.draft.tournament_name.as_str())
            .collect();
        assert_eq!(names, ["A", "C"]);
        assert!(s.delete(2).is_err());

        let doc = s.export(1).unwrap();
        assert_eq!(doc.file_name, "C_summary.txt");
        assert!(doc.contents.starts_with("Tournament: C\n"));
    }
}
