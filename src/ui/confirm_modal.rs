use egui::{Button, Color32, Context, RichText, Window};

/// Modal confirmation dialog shown before a batch runs
pub struct ConfirmModal {
    pub open: bool,
    pub title: String,
    pub message: String,
    pub confirmed: bool,
}

impl Default for ConfirmModal {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmModal {
    pub fn new() -> Self {
        Self {
            open: false,
            title: "Confirm".to_string(),
            message: String::new(),
            confirmed: false,
        }
    }

    /// Open the dialog with a fresh message
    pub fn open(&mut self, title: &str, message: String) {
        self.title = title.to_string();
        self.message = message;
        self.open = true;
        self.confirmed = false;
    }

    /// Show the dialog; `confirmed` stays set until the caller consumes it
    pub fn show(&mut self, ctx: &Context) {
        if !self.open {
            return;
        }

        Window::new(&self.title)
            .min_width(320.0)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    ui.label(&self.message);
                    ui.add_space(20.0);

                    ui.horizontal(|ui| {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .add(
                                    Button::new(RichText::new("Proceed").color(Color32::WHITE))
                                        .fill(Color32::from_rgb(220, 50, 50)),
                                )
                                .clicked()
                            {
                                self.confirmed = true;
                                self.open = false;
                            }

                            ui.add_space(10.0);

                            if ui.button("Cancel").clicked() {
                                self.open = false;
                            }
                        });
                    });
                });
            });
    }
}
