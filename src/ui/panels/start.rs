// CullTracker - ui/panels/start.rs
//
// "Start a New Tournament" form: header fields and weight format.

use crate::app::state::AppState;
use crate::core::model::{DraftField, UnitMode};
use crate::ui::theme;

/// Render the start form.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(theme::FORM_WIDTH);
        ui.heading("Start a New Tournament");
        ui.add_space(theme::CARD_SPACING);

        text_field(ui, state, DraftField::TournamentName, "Tournament Name");
        text_field(ui, state, DraftField::Location, "Location");
        text_field(ui, state, DraftField::Date, "Date (YYYY-MM-DD)");

        let mut notes = state.session.draft().notes.clone();
        if ui
            .add(
                egui::TextEdit::multiline(&mut notes)
                    .hint_text("Notes")
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            state.session.set_draft_field(DraftField::Notes, &notes);
        }

        ui.add_space(theme::CARD_SPACING);
        ui.horizontal(|ui| {
            ui.strong("Weight Format:");
            let mut unit = state.session.draft().unit;
            egui::ComboBox::from_id_salt("unit_select")
                .selected_text(unit.label())
                .show_ui(ui, |ui| {
                    for option in [UnitMode::Decimal, UnitMode::LbsOz] {
                        ui.selectable_value(&mut unit, option, option.label());
                    }
                });
            if unit != state.session.draft().unit {
                state.session.set_unit(unit);
            }
        });

        ui.add_space(theme::CARD_SPACING * 2.0);
        ui.horizontal(|ui| {
            if ui.button("Start Tournament").clicked() {
                state.session.begin_tracking();
                state.status_message = "Tracking started.".to_string();
            }
            if ui.button("Clear").clicked() {
                state.session.reset_draft();
            }
            let saved = state.session.history().len();
            if saved > 0 && ui.button(format!("My Tournaments ({saved})")).clicked() {
                state.session.show_history();
            }
        });
    });
}

fn text_field(ui: &mut egui::Ui, state: &mut AppState, field: DraftField, hint: &str) {
    let d = state.session.draft();
    let mut value = match field {
        DraftField::TournamentName => d.tournament_name.clone(),
        DraftField::Location => d.location.clone(),
        DraftField::Date => d.date.clone(),
        DraftField::Notes => d.notes.clone(),
        DraftField::Unit => d.unit.as_str().to_string(),
    };
    if ui
        .add(
            egui::TextEdit::singleline(&mut value)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        state.session.set_draft_field(field, &value);
    }
}
