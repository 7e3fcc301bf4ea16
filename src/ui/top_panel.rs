use egui::{Context, ViewportCommand};

use crate::presenter::Presenter;

/// Top menu panel component
pub struct TopPanel;

impl TopPanel {
    /// Display the top menu panel
    pub fn show(ctx: &Context, presenter: &mut Presenter) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Add Files...").clicked() {
                        if let Some(paths) = rfd::FileDialog::new()
                            .set_title("Select MIDI Files")
                            .add_filter("MIDI files", &["mid", "midi"])
                            .pick_files()
                        {
                            presenter.add_files(&paths);
                        }
                    }

                    if ui.button("Add Folder...").clicked() {
                        if let Some(dir) = rfd::FileDialog::new()
                            .set_title("Select Folder with MIDI Files")
                            .pick_folder()
                        {
                            presenter.add_folder(&dir);
                        }
                    }

                    if ui.button("Set Output Folder...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .set_title("Select Output Folder")
                            .pick_folder()
                        {
                            presenter.set_output_folder(path);
                        }
                    }

                    ui.separator();

                    if ui.button("Clear All").clicked() {
                        presenter.clear_all();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    ui.label("MIDI Track Processor");
                    ui.label(
                        egui::RichText::new(
                            "Keep or remove tracks in MIDI files, preserving the original tempo.",
                        )
                        .weak(),
                    );
                });
            });
        });
    }
}
