// UI component modules
mod confirm_modal;
mod file_list;
mod toast;
mod top_panel;
mod track_area;

pub use file_list::FileListPanel;
pub use top_panel::TopPanel;
pub use track_area::TrackArea;
