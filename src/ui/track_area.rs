use egui::{Align2, Color32, Context, RichText, ScrollArea, Ui};
use egui_phosphor::regular;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::confirm_modal::ConfirmModal;
use super::toast::Toast;
use crate::midi::FilterMode;
use crate::presenter::{Notification, Presenter};

/// Batch parameters held while the confirmation dialog is open.
struct PendingBatch {
    indices: Vec<usize>,
    mode: FilterMode,
    targets: Option<Vec<PathBuf>>,
}

/// Central panel: output folder row, per-track checkboxes for the selected
/// file, and the keep/remove actions behind a confirmation dialog.
#[derive(Default)]
pub struct TrackArea {
    checked_tracks: HashSet<usize>,
    // Path the checkboxes belong to; selection changes reset them
    shown_for: Option<PathBuf>,
    toasts: Vec<Toast>,
    confirm_modal: ConfirmModal,
    pending_batch: Option<PendingBatch>,
}

impl TrackArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display the track area
    pub fn show(
        &mut self,
        ctx: &Context,
        presenter: &mut Presenter,
        targets: Option<Vec<PathBuf>>,
    ) {
        // Reset the checkbox state when the selection changes
        let selected = presenter.selected_path().map(Path::to_path_buf);
        if selected != self.shown_for {
            self.checked_tracks.clear();
            self.shown_for = selected;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            for notification in presenter.take_notifications() {
                self.toasts.push(match notification {
                    Notification::Success(msg) => Toast::success(msg),
                    Notification::Error(msg) => Toast::error(msg),
                });
            }
            self.toasts.retain(|toast| !toast.has_expired());
            self.render_toasts(ui);
            if !self.toasts.is_empty() {
                // Keep repainting so toasts expire without user input
                ui.ctx().request_repaint_after(std::time::Duration::from_millis(250));
            }

            self.render_output_row(ui, presenter);
            ui.separator();

            if self.shown_for.is_some() {
                self.render_tracks(ui, presenter, targets);
            } else {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(regular::MUSIC_NOTES)
                                .size(48.0)
                                .color(ui.visuals().weak_text_color()),
                        );
                        ui.add_space(8.0);
                        ui.label(RichText::new("Select a file to inspect its tracks").weak());
                    });
                });
            }
        });

        self.confirm_modal.show(ctx);
        if self.confirm_modal.confirmed {
            self.confirm_modal.confirmed = false;
            if let Some(batch) = self.pending_batch.take() {
                presenter.process_files(&batch.indices, batch.mode, batch.targets);
            }
        }
    }

    /// Render the output folder selection row
    fn render_output_row(&mut self, ui: &mut Ui, presenter: &mut Presenter) {
        let output = presenter
            .catalog()
            .output_folder()
            .map(Path::to_path_buf);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Output folder:").weak());

            match &output {
                Some(path) => {
                    ui.label(
                        RichText::new(path.to_string_lossy())
                            .color(ui.visuals().strong_text_color()),
                    )
                    .on_hover_text(path.to_string_lossy());
                }
                None => {
                    ui.label(RichText::new("Not set").color(Color32::from_rgb(255, 200, 100)))
                        .on_hover_text("Processed files will be written here");
                }
            }

            if ui
                .button(format!("{} Browse", regular::FOLDER_OPEN))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select Output Folder")
                    .pick_folder()
                {
                    presenter.set_output_folder(path);
                }
            }

            if output.is_some()
                && ui
                    .button(RichText::new(regular::X).color(Color32::GRAY))
                    .on_hover_text("Clear output folder")
                    .clicked()
            {
                presenter.clear_output_folder();
            }
        });
    }

    /// Render the track list and the keep/remove actions
    fn render_tracks(
        &mut self,
        ui: &mut Ui,
        presenter: &mut Presenter,
        targets: Option<Vec<PathBuf>>,
    ) {
        if let Some(path) = &self.shown_for {
            ui.add_space(4.0);
            ui.heading(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned()),
            );
            ui.add_space(4.0);
        }

        ui.horizontal(|ui| {
            let keep_clicked = ui
                .button(format!("{} Keep Selected Tracks", regular::CHECK_CIRCLE))
                .clicked();
            let remove_clicked = ui
                .button(format!("{} Remove Selected Tracks", regular::TRASH))
                .clicked();

            if keep_clicked || remove_clicked {
                let mode = if keep_clicked {
                    FilterMode::Keep
                } else {
                    FilterMode::Remove
                };
                self.request_batch(presenter, mode, targets.clone());
            }
        });
        ui.add_space(8.0);

        let summaries = presenter.track_summaries().to_vec();
        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            for summary in &summaries {
                ui.horizontal(|ui| {
                    let mut checked = self.checked_tracks.contains(&summary.index);
                    if ui.checkbox(&mut checked, "").changed() {
                        if checked {
                            self.checked_tracks.insert(summary.index);
                        } else {
                            self.checked_tracks.remove(&summary.index);
                        }
                    }

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("Track {}: {}", summary.index, summary.name))
                                .strong(),
                        );
                        ui.label(
                            RichText::new(format!("Messages: {}", summary.message_total()))
                                .weak(),
                        );
                        let kinds = summary
                            .message_counts
                            .iter()
                            .map(|(kind, count)| format!("{}: {}", kind, count))
                            .collect::<Vec<_>>()
                            .join(", ");
                        ui.label(RichText::new(format!("Types: {}", kinds)).weak());
                    });
                });
                ui.add_space(6.0);
            }
        });
    }

    /// Open the confirmation dialog for a batch
    fn request_batch(
        &mut self,
        presenter: &mut Presenter,
        mode: FilterMode,
        targets: Option<Vec<PathBuf>>,
    ) {
        if self.checked_tracks.is_empty() {
            self.toasts
                .push(Toast::error("No tracks selected".to_string()));
            return;
        }

        let mut indices: Vec<usize> = self.checked_tracks.iter().copied().collect();
        indices.sort_unstable();
        let listed = indices
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let scope = match &targets {
            Some(paths) => format!("{} marked file(s)", paths.len()),
            None => format!("all {} file(s)", presenter.catalog().len()),
        };
        let message = match mode {
            FilterMode::Keep => format!(
                "You will keep only these tracks: {} in {}. Do you want to proceed?",
                listed, scope
            ),
            FilterMode::Remove => format!(
                "You are about to remove these tracks: {} from {}. Do you want to proceed?",
                listed, scope
            ),
        };

        self.confirm_modal.open("Confirm Action", message);
        self.pending_batch = Some(PendingBatch {
            indices,
            mode,
            targets,
        });
    }

    /// Render toast notifications
    fn render_toasts(&self, ui: &mut Ui) {
        if self.toasts.is_empty() {
            return;
        }

        let available_rect = ui.ctx().available_rect();
        let spacing = available_rect.height() * 0.08;
        let toast_offset = available_rect.height() * 0.06;

        for (i, toast) in self.toasts.iter().enumerate() {
            let window_id = egui::Id::new("toast_message").with(i);
            let pos = [0.0, spacing + (i as f32 * toast_offset)];

            egui::containers::Window::new("Toast")
                .id(window_id)
                .title_bar(false)
                .resizable(false)
                .movable(false)
                .anchor(Align2::CENTER_TOP, pos)
                .show(ui.ctx(), |ui| {
                    ui.vertical_centered(|ui| {
                        ui.colored_label(toast.color, &toast.message);
                    });
                });
        }
    }
}
