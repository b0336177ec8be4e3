// CullTracker - ui/panels/about.rs
//
// About window: version plus the settings this session runs with, so a
// user can see which config.toml values took effect.

use crate::app::state::AppState;
use crate::core::model::RenamePolicy;
use crate::util::constants::{APP_NAME, APP_VERSION, BEST_FISH_COUNT};

/// Label/value pairs describing the running session's settings.
pub fn settings_rows(state: &AppState) -> Vec<(&'static str, String)> {
    let options = state.session.options();
    let rename = match options.rename_policy {
        RenamePolicy::Migrate => "entries follow the tag",
        RenamePolicy::Orphan => "entries stay under the old name",
    };
    let new_tournament = if options.clear_draft_on_new {
        "starts from a blank draft"
    } else {
        "keeps the last draft"
    };
    vec![
        ("Scoring", format!("best {BEST_FISH_COUNT} fish")),
        ("Default format", options.default_unit.label().to_string()),
        ("Tag rename", rename.to_string()),
        ("New tournament", new_tournament.to_string()),
        ("Starting tags", options.roster.len().to_string()),
        ("Export folder", state.export_dir.display().to_string()),
        ("Saved this session", state.session.history().len().to_string()),
    ]
}

/// Render the About window (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let rows = settings_rows(state);

    let mut open = true;
    egui::Window::new(format!("{APP_NAME} v{APP_VERSION}"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("about_settings")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (label, value) in &rows {
                        ui.strong(*label);
                        ui.label(value);
                        ui.end_row();
                    }
                });
            if state.debug_mode {
                ui.separator();
                ui.label(egui::RichText::new("Debug logging enabled").weak());
            }
        });

    if !open {
        state.show_about = false;
    }
}
