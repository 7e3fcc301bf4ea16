use egui::{Align, Button, Color32, Layout, RichText, ScrollArea, Ui};
use egui_phosphor::regular;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, FileStatus};
use crate::presenter::Presenter;

/// Side panel listing every cataloged file with its track count and the
/// outcome of its last processing attempt.
///
/// Rows can be marked to limit a batch to a subset of files; with nothing
/// marked the whole catalog is processed.
#[derive(Default)]
pub struct FileListPanel {
    search_query: String,
    marked: HashSet<PathBuf>,
}

struct Row {
    path: PathBuf,
    name: String,
    track_count: usize,
    status: FileStatus,
    is_selected: bool,
}

impl FileListPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths the next batch should be limited to, in catalog order.
    /// `None` means "process everything".
    pub fn marked_paths(&self, catalog: &Catalog) -> Option<Vec<PathBuf>> {
        if self.marked.is_empty() {
            return None;
        }
        let paths: Vec<PathBuf> = catalog
            .records()
            .iter()
            .filter(|r| self.marked.contains(&r.path))
            .map(|r| r.path.clone())
            .collect();
        if paths.is_empty() { None } else { Some(paths) }
    }

    /// Display the file list panel
    pub fn show(&mut self, ui: &mut Ui, presenter: &mut Presenter) {
        // Drop marks for files that left the catalog
        self.marked.retain(|path| presenter.catalog().contains(path));

        let mut select_path: Option<PathBuf> = None;
        let mut remove_path: Option<PathBuf> = None;

        ui.vertical(|ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(format!("{} Files", regular::FILES));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let add_btn =
                        Button::new(RichText::new(regular::PLUS_CIRCLE).size(20.0)).frame(false);
                    if ui.add(add_btn).on_hover_text("Add Files").clicked() {
                        if let Some(paths) = rfd::FileDialog::new()
                            .set_title("Select MIDI Files")
                            .add_filter("MIDI files", &["mid", "midi"])
                            .pick_files()
                        {
                            presenter.add_files(&paths);
                        }
                    }

                    let folder_btn =
                        Button::new(RichText::new(regular::FOLDER_PLUS).size(20.0)).frame(false);
                    if ui
                        .add(folder_btn)
                        .on_hover_text("Add all MIDI files from a folder")
                        .clicked()
                    {
                        if let Some(dir) = rfd::FileDialog::new()
                            .set_title("Select Folder with MIDI Files")
                            .pick_folder()
                        {
                            presenter.add_folder(&dir);
                        }
                    }

                    if !presenter.catalog().is_empty() {
                        let clear_btn = Button::new(
                            RichText::new(regular::TRASH).color(Color32::from_rgb(255, 100, 100)),
                        )
                        .frame(false);
                        if ui.add(clear_btn).on_hover_text("Clear All Files").clicked() {
                            presenter.clear_all();
                        }

                        ui.label(
                            RichText::new(format!("{}", presenter.catalog().len())).weak(),
                        );
                    }
                });
            });
            ui.add_space(8.0);

            // Search box
            egui::Frame::new()
                .fill(ui.visuals().extreme_bg_color)
                .corner_radius(4.0)
                .inner_margin(4.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.add_space(4.0);
                        ui.label(RichText::new(regular::MAGNIFYING_GLASS).weak());

                        ui.add(
                            egui::TextEdit::singleline(&mut self.search_query)
                                .desired_width(ui.available_width())
                                .hint_text("Search files...")
                                .frame(false),
                        );

                        if !self.search_query.is_empty()
                            && ui.button(regular::X).on_hover_text("Clear Search").clicked()
                        {
                            self.search_query.clear();
                        }
                    });
                });
            ui.add_space(8.0);

            let rows = self.visible_rows(presenter);

            if presenter.catalog().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.label(RichText::new(regular::FILE_DASHED).size(32.0).weak());
                    ui.add_space(8.0);
                    ui.label(RichText::new("No files added").weak());
                    ui.add_space(20.0);
                });
            } else if rows.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.label(RichText::new("No matching files").weak());
                });
            } else {
                ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
                    for row in &rows {
                        self.show_row(ui, row, &mut select_path, &mut remove_path);
                    }
                });

                if !self.marked.is_empty() {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!(
                            "{} file(s) marked for processing",
                            self.marked.len()
                        ))
                        .weak(),
                    );
                }
            }
        });

        // Process actions outside the UI loops
        if let Some(path) = remove_path {
            presenter.remove_files(&[path]);
        } else if let Some(path) = select_path {
            presenter.select_file(&path);
        }
    }

    fn visible_rows(&self, presenter: &Presenter) -> Vec<Row> {
        let selected = presenter.selected_path().map(Path::to_path_buf);
        let query = self.search_query.to_lowercase();

        presenter
            .catalog()
            .records()
            .iter()
            .filter(|record| {
                if query.is_empty() {
                    return true;
                }
                let name = file_name(&record.path).to_lowercase();
                name.contains(&query)
                    || record.path.to_string_lossy().to_lowercase().contains(&query)
            })
            .map(|record| Row {
                path: record.path.clone(),
                name: file_name(&record.path),
                track_count: record.track_count,
                status: record.status.clone(),
                is_selected: selected.as_deref() == Some(record.path.as_path()),
            })
            .collect()
    }

    fn show_row(
        &mut self,
        ui: &mut Ui,
        row: &Row,
        select_path: &mut Option<PathBuf>,
        remove_path: &mut Option<PathBuf>,
    ) {
        let row_height = 32.0;

        ui.scope(|ui| {
            let row_width = ui.available_width();
            let (id, rect) = ui.allocate_space(egui::vec2(row_width, row_height));
            let response = ui.interact(rect, id, egui::Sense::click());

            if response.clicked() {
                *select_path = Some(row.path.clone());
            }

            if response.hovered() || row.is_selected {
                let bg_color = if row.is_selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().widgets.hovered.bg_fill.gamma_multiply(0.3)
                };
                ui.painter().rect_filled(rect, 4.0, bg_color);
            }

            let ui_builder = egui::UiBuilder::new()
                .max_rect(rect)
                .layout(egui::Layout::left_to_right(egui::Align::Center));
            ui.scope_builder(ui_builder, |ui| {
                ui.add_space(4.0);

                // Mark for targeted processing
                let mut marked = self.marked.contains(&row.path);
                if ui
                    .checkbox(&mut marked, "")
                    .on_hover_text("Limit processing to marked files")
                    .changed()
                {
                    if marked {
                        self.marked.insert(row.path.clone());
                    } else {
                        self.marked.remove(&row.path);
                    }
                }

                ui.label(RichText::new(regular::MUSIC_NOTES).weak());

                ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Truncate);
                let text_color = if row.is_selected {
                    ui.visuals().selection.stroke.color
                } else {
                    ui.visuals().widgets.inactive.text_color()
                };
                ui.label(RichText::new(&row.name).color(text_color));
                ui.label(RichText::new(format!("({})", row.track_count)).weak());

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.add_space(4.0);
                    if response.hovered() || row.is_selected {
                        let remove_btn =
                            Button::new(RichText::new(regular::X).size(12.0)).frame(false);
                        if ui
                            .add(remove_btn)
                            .on_hover_text("Remove from list")
                            .clicked()
                        {
                            *remove_path = Some(row.path.clone());
                        }
                    }

                    let status_label =
                        ui.label(RichText::new(status_text(&row.status)).color(status_color(&row.status)));
                    if let FileStatus::Error(detail) = &row.status {
                        status_label.on_hover_text(detail);
                    }
                });
            });

            response.on_hover_text(row.path.to_string_lossy());
        });
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("Unknown file")
        .to_string()
}

fn status_text(status: &FileStatus) -> String {
    match status {
        // Error details go on the hover text; keep the row short
        FileStatus::Error(_) => "Error".to_string(),
        other => other.label(),
    }
}

fn status_color(status: &FileStatus) -> Color32 {
    match status {
        FileStatus::Pending => Color32::from_rgb(255, 200, 100),
        FileStatus::Success => Color32::from_rgb(100, 255, 100),
        FileStatus::Error(_) => Color32::from_rgb(255, 100, 100),
    }
}
