use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::presenter::Presenter;
use crate::ui::{FileListPanel, TopPanel, TrackArea};

/// Session snapshot persisted between runs: just the added paths and the
/// output folder. Everything else is re-derived on startup by replaying the
/// paths through the presenter, so files that changed on disk surface the
/// usual load errors.
#[derive(Default, Deserialize, Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct SessionState {
    file_paths: Vec<PathBuf>,
    output_folder: Option<PathBuf>,
}

pub struct App {
    presenter: Presenter,
    file_panel: FileListPanel,
    track_area: TrackArea,
}

impl App {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut presenter = Presenter::new();

        // Restore the previous session, if any.
        if let Some(storage) = cc.storage {
            let session: SessionState =
                eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
            if !session.file_paths.is_empty() {
                presenter.add_files(&session.file_paths);
            }
            if let Some(folder) = session.output_folder {
                presenter.set_output_folder(folder);
            }
        }

        Self {
            presenter,
            file_panel: FileListPanel::new(),
            track_area: TrackArea::new(),
        }
    }
}

impl eframe::App for App {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let session = SessionState {
            file_paths: self.presenter.catalog().paths(),
            output_folder: self
                .presenter
                .catalog()
                .output_folder()
                .map(|p| p.to_path_buf()),
        };
        eframe::set_value(storage, eframe::APP_KEY, &session);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopPanel::show(ctx, &mut self.presenter);

        egui::SidePanel::left("file_list_panel")
            .resizable(true)
            .min_width(260.0)
            .default_width(350.0)
            .show(ctx, |ui| {
                self.file_panel.show(ui, &mut self.presenter);
            });

        let targets = self.file_panel.marked_paths(self.presenter.catalog());
        self.track_area.show(ctx, &mut self.presenter, targets);
    }
}
