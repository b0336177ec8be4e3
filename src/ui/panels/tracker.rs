// CullTracker - ui/panels/tracker.rs
//
// Tracker screen: one card per tag with colour, name, weight input(s),
// cull button and cull list, followed by the live best-five total.
//
// Widgets edit local copies; every change goes back through the session
// operations so the session stays the single owner of the draft.

use crate::app::state::AppState;
use crate::core::model::{TagField, TagId, UnitMode, WeightPart};
use crate::core::weight;
use crate::ui::theme;
use crate::util::constants;

/// Render the tracker screen.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let draft = state.session.draft();
    ui.heading(draft.heading());
    ui.label(egui::RichText::new(format!("Notes: {}", draft.notes)).color(theme::MUTED_TEXT));
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("tracker_tags")
        .auto_shrink([false; 2])
        .max_height(ui.available_height() - 80.0)
        .show(ui, |ui| {
            let ids: Vec<TagId> = state.session.draft().tags.iter().map(|t| t.id).collect();
            let mut remove = None;
            for (index, id) in ids.into_iter().enumerate() {
                if tag_card(ui, state, index, id) {
                    remove = Some(index);
                }
                ui.add_space(theme::CARD_SPACING);
            }
            if let Some(index) = remove {
                if let Err(e) = state.session.remove_tag(index) {
                    tracing::warn!(error = %e, "Tag removal failed");
                }
            }
            if ui.button("+ Add Tag").clicked() {
                let n = state.session.draft().tags.len() + 1;
                state
                    .session
                    .add_tag(&format!("Tag {n}"), constants::DEFAULT_NEW_TAG_COLOUR, None);
            }
        });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!(
                "Best {} Total: {} {}",
                constants::BEST_FISH_COUNT,
                state.session.best_five_total(),
                constants::WEIGHT_UNIT_LABEL
            ))
            .size(theme::TOTAL_FONT_SIZE)
            .strong()
            .color(theme::TOTAL_COLOUR),
        );
    });
    ui.horizontal(|ui| {
        if ui.button("Save Tournament").clicked() {
            let total = state.session.save_tournament().best_five_total.clone();
            state.status_message = format!("Tournament saved. Best five: {total} lbs.");
        }
        if ui.button("Back to Details").clicked() {
            state.session.back_to_start();
        }
    });
}

/// Render one tag card. Returns true when the user asked to remove the tag.
fn tag_card(ui: &mut egui::Ui, state: &mut AppState, index: usize, id: TagId) -> bool {
    let Some(tag) = state.session.draft().tag(id).cloned() else {
        return false;
    };
    let unit = state.session.draft().unit;
    let mut remove = false;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            let mut colour = theme::tag_colour(&tag.color);
            if ui.color_edit_button_srgba(&mut colour).changed() {
                set_tag_field(state, index, TagField::Color, &theme::colour_to_hex(colour));
            }

            let mut name = tag.name.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut name).desired_width(160.0))
                .changed()
            {
                set_tag_field(state, index, TagField::Name, &name);
            }

            let mut species = tag.species.clone().unwrap_or_default();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut species)
                        .hint_text("Species")
                        .desired_width(120.0),
                )
                .changed()
            {
                set_tag_field(state, index, TagField::Species, &species);
            }

            if ui.small_button("\u{2715}").on_hover_text("Remove tag").clicked() {
                remove = true;
            }
        });

        ui.horizontal(|ui| {
            let raw = state.session.draft().weight(id).unwrap_or("").to_string();
            match unit {
                UnitMode::Decimal => {
                    let mut value = raw;
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut value)
                                .hint_text("e.g. 3.25")
                                .desired_width(theme::WEIGHT_INPUT_WIDTH),
                        )
                        .changed()
                    {
                        set_weight(state, id, &value);
                    }
                }
                UnitMode::LbsOz => {
                    let (lbs, oz) = weight::split_lbs_oz(&raw);
                    let (mut lbs, mut oz) = (lbs.to_string(), oz.to_string());
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut lbs)
                                .hint_text("lbs")
                                .desired_width(theme::WEIGHT_INPUT_WIDTH),
                        )
                        .changed()
                    {
                        set_weight_part(state, id, WeightPart::Pounds, &lbs);
                    }
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut oz)
                                .hint_text("oz")
                                .desired_width(theme::WEIGHT_INPUT_WIDTH),
                        )
                        .changed()
                    {
                        set_weight_part(state, id, WeightPart::Ounces, &oz);
                    }
                }
            }

            if ui.button("Add Cull Replacement").clicked() {
                state.open_cull_prompt(id);
            }
        });

        ui.label(
            egui::RichText::new(format!("Culls: {}", state.session.cull_summary(id)))
                .color(theme::MUTED_TEXT),
        );
    });

    remove
}

fn set_tag_field(state: &mut AppState, index: usize, field: TagField, value: &str) {
    if let Err(e) = state.session.update_tag(index, field, value) {
        tracing::warn!(error = %e, "Tag update failed");
    }
}

fn set_weight(state: &mut AppState, id: TagId, value: &str) {
    if let Err(e) = state.session.set_weight(id, value) {
        tracing::warn!(error = %e, "Weight update failed");
    }
}

fn set_weight_part(state: &mut AppState, id: TagId, part: WeightPart, value: &str) {
    if let Err(e) = state.session.set_weight_part(id, part, value) {
        tracing::warn!(error = %e, "Weight update failed");
    }
}
