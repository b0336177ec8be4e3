// CullTracker - ui/panels/summary.rs
//
// "My Tournaments" history list with edit, export, and delete actions,
// plus the delete confirmation window.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants;

/// Action chosen on a history card this frame.
enum CardAction {
    Edit(usize),
    Export(usize),
    ExportJson(usize),
    Delete(usize),
}

/// Render the history list.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("My Tournaments");
    ui.separator();

    let mut action = None;

    egui::ScrollArea::vertical()
        .id_salt("summary_records")
        .auto_shrink([false; 2])
        .max_height(ui.available_height() - 60.0)
        .show(ui, |ui| {
            if state.session.history().is_empty() {
                ui.label("No tournaments saved yet.");
            }
            for (i, record) in state.session.history().iter().enumerate() {
                let d = &record.draft;
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        egui::RichText::new(format!(
                            "{} \u{2013} {}",
                            d.tournament_name, d.location
                        ))
                        .strong()
                        .size(16.0),
                    );
                    ui.label(egui::RichText::new(&d.date).color(theme::MUTED_TEXT));
                    ui.label(format!(
                        "Total Weight: {} {}",
                        record.best_five_total,
                        constants::WEIGHT_UNIT_LABEL
                    ));
                    ui.label(egui::RichText::new(format!("Notes: {}", d.notes)).italics());
                    ui.horizontal(|ui| {
                        if ui.button("Edit").clicked() {
                            action = Some(CardAction::Edit(i));
                        }
                        if ui.button("Export\u{2026}").clicked() {
                            action = Some(CardAction::Export(i));
                        }
                        if ui.button("Export JSON\u{2026}").clicked() {
                            action = Some(CardAction::ExportJson(i));
                        }
                        if ui
                            .button(egui::RichText::new("Delete").color(theme::DANGER_COLOUR))
                            .clicked()
                        {
                            action = Some(CardAction::Delete(i));
                        }
                    });
                });
                ui.add_space(theme::CARD_SPACING);
            }
        });

    match action {
        Some(CardAction::Edit(i)) => {
            if let Err(e) = state.session.edit(i) {
                tracing::warn!(error = %e, "Edit failed");
            }
        }
        Some(CardAction::Export(i)) => export_record(state, i),
        Some(CardAction::ExportJson(i)) => export_record_json(state, i),
        Some(CardAction::Delete(i)) => state.request_delete(i),
        None => {}
    }

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Start New Tournament").clicked() {
            state.session.new_tournament();
        }
        let has_records = !state.session.history().is_empty();
        if ui
            .add_enabled(has_records, egui::Button::new("Export All (CSV)\u{2026}"))
            .clicked()
        {
            if let Some(dest) = rfd::FileDialog::new()
                .add_filter("CSV", &["csv"])
                .set_directory(&state.export_dir)
                .set_file_name(constants::HISTORY_CSV_FILE_NAME)
                .save_file()
            {
                // Errors are already reported in the status bar.
                let _ = state.export_history_csv_to(&dest);
            }
        }
    });
}

/// Ask for a destination and write the record's summary there.
fn export_record(state: &mut AppState, index: usize) {
    let Some(suggested) = state.suggested_export_path(index) else {
        return;
    };
    let file_name = suggested
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(constants::SUMMARY_FILE_SUFFIX)
        .to_string();
    if let Some(dest) = rfd::FileDialog::new()
        .add_filter("Text", &["txt"])
        .set_directory(&state.export_dir)
        .set_file_name(file_name)
        .save_file()
    {
        let _ = state.export_record_to(index, &dest);
    }
}

fn export_record_json(state: &mut AppState, index: usize) {
    let Some(suggested) = state.suggested_export_path(index) else {
        return;
    };
    let file_name = suggested.with_extension("json");
    let file_name = file_name
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("tournament.json")
        .to_string();
    if let Some(dest) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_directory(&state.export_dir)
        .set_file_name(file_name)
        .save_file()
    {
        let _ = state.export_record_json_to(index, &dest);
    }
}

/// Render the delete confirmation window (if a delete is pending).
pub fn render_delete_confirm(ctx: &egui::Context, state: &mut AppState) {
    let Some(index) = state.pending_delete else {
        return;
    };
    let name = match state.session.record(index) {
        Ok(r) => r.draft.tournament_name.clone(),
        Err(_) => {
            state.cancel_delete();
            return;
        }
    };

    let mut open = true;
    let mut confirm = false;
    let mut cancel = false;
    egui::Window::new("Delete Tournament")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{name}\"? This cannot be undone."));
            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Delete").color(theme::DANGER_COLOUR))
                    .clicked()
                {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if confirm {
        state.confirm_delete();
    } else if cancel || !open {
        state.cancel_delete();
    }
}
