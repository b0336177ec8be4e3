// CullTracker - gui.rs
//
// Top-level eframe::App implementation.
// Wires the menu bar, status bar, and the view-specific panels together.

use crate::app::session::View;
use crate::app::state::AppState;
use crate::ui;

/// The CullTracker application.
pub struct CullTrackerApp {
    pub state: AppState,
}

impl CullTrackerApp {
    /// Create the application and apply the configured theme.
    pub fn new(ctx: &egui::Context, state: AppState) -> Self {
        ui::theme::apply(ctx, state.dark_mode, state.font_size);
        Self { state }
    }
}

impl eframe::App for CullTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_records = !self.state.session.history().is_empty();
                    if ui
                        .add_enabled(
                            has_records,
                            egui::Button::new("Export History CSV\u{2026}"),
                        )
                        .clicked()
                    {
                        if let Some(dest) = rfd::FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_directory(&self.state.export_dir)
                            .set_file_name(crate::util::constants::HISTORY_CSV_FILE_NAME)
                            .save_file()
                        {
                            let _ = self.state.export_history_csv_to(&dest);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("New Tournament").clicked() {
                        self.state.session.new_tournament();
                        ui.close_menu();
                    }
                    if ui.button("My Tournaments").clicked() {
                        self.state.session.show_history();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.checkbox(&mut self.state.dark_mode, "Dark mode").changed() {
                        ui::theme::apply(ctx, self.state.dark_mode, self.state.font_size);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let saved = self.state.session.history().len();
                    ui.label(format!("{saved} saved"));
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").weak());
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.session.view() {
            View::Start => ui::panels::start::render(ui, &mut self.state),
            View::Tracker => ui::panels::tracker::render(ui, &mut self.state),
            View::Summary => ui::panels::summary::render(ui, &mut self.state),
        });

        // Dialogs (modal-ish)
        ui::panels::cull_prompt::render(ctx, &mut self.state);
        ui::panels::summary::render_delete_confirm(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }
}
