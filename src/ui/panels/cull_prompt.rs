// CullTracker - ui/panels/cull_prompt.rs
//
// Modal-ish prompt for a culled weight. Non-blocking: the tracker keeps
// rendering underneath and the cull is recorded when the user submits.

use crate::app::state::AppState;
use crate::util::constants::CULL_PROMPT_TITLE;

/// Render the cull prompt (if one is open).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(prompt) = state.cull_prompt.as_mut() else {
        return;
    };

    let mut open = true;
    let mut submit = false;
    let mut cancel = false;

    egui::Window::new(CULL_PROMPT_TITLE)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Tag: {}", prompt.tag_name));
            let response = ui.text_edit_singleline(&mut prompt.input);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            } else if !response.has_focus() {
                response.request_focus();
            }
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    submit = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if submit {
        state.submit_cull_prompt();
    } else if cancel || !open {
        state.cancel_cull_prompt();
    }
}
