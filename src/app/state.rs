// CullTracker - app/state.rs
//
// Application state management. Holds the tournament session plus the
// presentation-only state around it: status line, cull prompt, delete
// confirmation, and display preferences.
// Owned by the eframe::App implementation.

use crate::app::session::{SessionOptions, TournamentSession};
use crate::core::export;
use crate::core::model::TagId;
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::error::{ExportError, Result};
use std::path::{Path, PathBuf};

/// An open "Enter new culled weight" prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CullPrompt {
    pub tag: TagId,
    /// Tag name when the prompt opened, for the window text.
    pub tag_name: String,
    /// Text typed so far.
    pub input: String,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The tournament draft, history, and current view.
    pub session: TournamentSession,

    /// Status message for the status bar.
    pub status_message: String,

    /// Pending cull prompt, if the user pressed "Add Cull Replacement".
    pub cull_prompt: Option<CullPrompt>,

    /// History index awaiting delete confirmation.
    pub pending_delete: Option<usize>,

    /// Folder the export dialog opens in.
    pub export_dir: PathBuf,

    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,

    /// Body font size in points.
    pub font_size: f32,

    /// Whether to show the about dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state from the validated config.
    pub fn new(config: &AppConfig, export_dir: PathBuf, debug_mode: bool) -> Self {
        let options = SessionOptions {
            default_unit: config.default_unit,
            rename_policy: config.rename_policy,
            clear_draft_on_new: config.clear_draft_on_new,
            roster: config.tags.clone(),
        };
        Self {
            session: TournamentSession::new(options),
            status_message: "Ready. Fill in the tournament details to begin.".to_string(),
            cull_prompt: None,
            pending_delete: None,
            export_dir: config.export_dir.clone().unwrap_or(export_dir),
            dark_mode: config.dark_mode,
            font_size: config.font_size,
            show_about: false,
            debug_mode,
        }
    }

    // -------------------------------------------------------------------------
    // Cull prompt
    // -------------------------------------------------------------------------

    /// Open the cull prompt for a tag. Replaces any prompt already open.
    pub fn open_cull_prompt(&mut self, tag: TagId) {
        let Some(t) = self.session.draft().tag(tag) else {
            tracing::warn!(tag = %tag, "Cull prompt requested for unknown tag");
            return;
        };
        self.cull_prompt = Some(CullPrompt {
            tag,
            tag_name: t.name.clone(),
            input: String::new(),
        });
    }

    /// Submit the prompt's text as a cull. Empty input records nothing.
    /// Returns whether a cull was recorded. The prompt closes either way.
    pub fn submit_cull_prompt(&mut self) -> bool {
        let Some(prompt) = self.cull_prompt.take() else {
            return false;
        };
        match self.session.add_cull(prompt.tag, Some(prompt.input.as_str())) {
            Ok(true) => {
                self.status_message =
                    format!("Cull {} recorded for {}.", prompt.input, prompt.tag_name);
                true
            }
            Ok(false) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Cull not recorded");
                self.status_message = format!("Cull not recorded: {e}");
                false
            }
        }
    }

    /// Close the prompt without recording anything.
    pub fn cancel_cull_prompt(&mut self) {
        if let Some(prompt) = self.cull_prompt.take() {
            tracing::debug!(tag = %prompt.tag, "Cull prompt cancelled");
        }
    }

    // -------------------------------------------------------------------------
    // Delete confirmation
    // -------------------------------------------------------------------------

    pub fn request_delete(&mut self, index: usize) {
        if index < self.session.history().len() {
            self.pending_delete = Some(index);
        }
    }

    /// Delete the record awaiting confirmation.
    pub fn confirm_delete(&mut self) {
        let Some(index) = self.pending_delete.take() else {
            return;
        };
        match self.session.delete(index) {
            Ok(record) => {
                self.status_message =
                    format!("Deleted \"{}\".", record.draft.tournament_name);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Delete failed");
                self.status_message = format!("Delete failed: {e}");
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Suggested destination for a record's summary in the export folder.
    pub fn suggested_export_path(&self, index: usize) -> Option<PathBuf> {
        let record = self.session.record(index).ok()?;
        Some(
            self.export_dir
                .join(export::summary_file_name(&record.draft.tournament_name)),
        )
    }

    /// Write a record's plain-text summary to `dest`.
    pub fn export_record_to(&mut self, index: usize, dest: &Path) -> Result<()> {
        let result = self.write_summary(index, dest);
        self.report_export(&result, dest, "Summary");
        result
    }

    fn write_summary(&self, index: usize, dest: &Path) -> Result<()> {
        let record = self.session.record(index)?;
        let mut buf = Vec::new();
        export::export_summary(record, &mut buf, dest)?;
        fs::write_atomic(dest, &buf).map_err(|e| ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Write the whole history as CSV to `dest`.
    pub fn export_history_csv_to(&mut self, dest: &Path) -> Result<()> {
        let result = self.write_history_csv(dest);
        self.report_export(&result, dest, "History");
        result
    }

    fn write_history_csv(&self, dest: &Path) -> Result<()> {
        let mut buf = Vec::new();
        export::export_history_csv(self.session.history(), &mut buf, dest)?;
        fs::write_atomic(dest, &buf).map_err(|e| ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Write a single record (tags, weights, culls) as JSON to `dest`.
    pub fn export_record_json_to(&mut self, index: usize, dest: &Path) -> Result<()> {
        let result = self.write_record_json(index, dest);
        self.report_export(&result, dest, "Record");
        result
    }

    fn write_record_json(&self, index: usize, dest: &Path) -> Result<()> {
        let record = self.session.record(index)?;
        let mut buf = Vec::new();
        export::export_record_json(record, &mut buf, dest)?;
        fs::write_atomic(dest, &buf).map_err(|e| ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    fn report_export(&mut self, result: &Result<()>, dest: &Path, what: &str) {
        match result {
            Ok(()) => {
                tracing::info!(path = %dest.display(), what, "Export written");
                self.status_message = format!("{what} exported to {}.", dest.display());
            }
            Err(e) => {
                tracing::warn!(path = %dest.display(), error = %e, "Export failed");
                self.status_message = format!("{what} export failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::View;
    use crate::util::error::CullTrackerError;
    use tempfile::TempDir;

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), PathBuf::from("/tmp"), false)
    }

    #[test]
    fn test_cull_prompt_submit_records_cull() {
        let mut s = state();
        let tag = s.session.draft().tags[0].id;
        s.open_cull_prompt(tag);
        assert_eq!(s.cull_prompt.as_ref().unwrap().tag_name, "Orange");

        s.cull_prompt.as_mut().unwrap().input = "2.75".to_string();
        assert!(s.submit_cull_prompt());
        assert!(s.cull_prompt.is_none());
        assert_eq!(s.session.draft().culls(tag), ["2.75"]);
    }

    #[test]
    fn test_cull_prompt_empty_or_cancelled_records_nothing() {
        let mut s = state();
        let tag = s.session.draft().tags[0].id;

        s.open_cull_prompt(tag);
        assert!(!s.submit_cull_prompt());

        s.open_cull_prompt(tag);
        s.cull_prompt.as_mut().unwrap().input = "3.0".to_string();
        s.cancel_cull_prompt();

        assert!(s.cull_prompt.is_none());
        assert!(s.session.draft().culls(tag).is_empty());
    }

    #[test]
    fn test_cull_prompt_for_unknown_tag_does_not_open() {
        let mut s = state();
        s.open_cull_prompt(TagId(404));
        assert!(s.cull_prompt.is_none());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut s = state();
        s.session.save_tournament();
        s.session.save_tournament();

        s.request_delete(7);
        assert!(s.pending_delete.is_none());

        s.request_delete(1);
        s.cancel_delete();
        assert_eq!(s.session.history().len(), 2);

        s.request_delete(1);
        s.confirm_delete();
        assert_eq!(s.session.history().len(), 1);
        assert_eq!(s.session.view(), View::Summary);
    }

    #[test]
    fn test_export_record_writes_summary_file() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        s.export_dir = dir.path().to_path_buf();
        s.session
            .set_draft_field(crate::core::model::DraftField::TournamentName, "Bass Bash");
        s.session.save_tournament();

        let dest = s.suggested_export_path(0).unwrap();
        assert_eq!(dest, dir.path().join("Bass_Bash_summary.txt"));
        s.export_record_to(0, &dest).unwrap();

        let text = std::fs::read_to_string(&dest).unwrap();
        assert!(text.starts_with("Tournament: Bass Bash\n"));
        assert!(s.status_message.contains("exported"));

        let mut expected = Vec::new();
        export::export_summary(s.session.record(0).unwrap(), &mut expected, &dest).unwrap();
        assert_eq!(text.as_bytes(), expected.as_slice());
        assert_eq!(text, s.session.export(0).unwrap().contents);
    }

    #[test]
    fn test_export_bad_index_sets_status_instead_of_panicking() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let result = s.export_record_to(0, &dir.path().join("x.txt"));
        assert!(matches!(result, Err(CullTrackerError::Session(_))));
        assert!(s.status_message.contains("failed"));
    }

    #[test]
    fn test_export_history_csv() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        s.session.save_tournament();
        let dest = dir.path().join("history.csv");
        s.export_history_csv_to(&dest).unwrap();
        let text = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_export_record_json() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let tag = s.session.draft().tags[0].id;
        s.session.set_weight(tag, "4.5").unwrap();
        s.session.save_tournament();

        let dest = dir.path().join("record.json");
        s.export_record_json_to(0, &dest).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
        assert_eq!(value["best_five_total"], "4.50");

        assert!(s.export_record_json_to(3, &dest).is_err());
    }
}
