use std::fs;
use std::path::{Path, PathBuf};

use crate::midi::{MidiDocument, MidiError};

/// Outcome of the most recent processing attempt for a file.
///
/// Re-processing overwrites it; the only way back to `Pending` is removing
/// and re-adding the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Pending,
    Success,
    Error(String),
}

impl FileStatus {
    /// Short text for the file list.
    pub fn label(&self) -> String {
        match self {
            FileStatus::Pending => "Pending".to_string(),
            FileStatus::Success => "Success".to_string(),
            FileStatus::Error(detail) => format!("Error: {}", detail),
        }
    }
}

/// One cataloged MIDI file.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub track_count: usize,
    pub status: FileStatus,
}

/// In-memory metadata for every added file, plus the currently selected
/// parsed document and the output folder.
///
/// Files are re-parsed on every add and select; the catalog never caches a
/// parsed document beyond the current selection, so memory stays bounded
/// no matter how many files are tracked.
#[derive(Default)]
pub struct Catalog {
    records: Vec<FileRecord>,
    current: Option<MidiDocument>,
    output_folder: Option<PathBuf>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a file. A record is stored only when parsing
    /// succeeds; re-adding a path replaces its record.
    pub fn add(&mut self, path: &Path) -> Result<FileRecord, MidiError> {
        let doc = MidiDocument::open(path)?;
        let record = FileRecord {
            path: path.to_path_buf(),
            track_count: doc.track_count(),
            status: FileStatus::Pending,
        };

        match self.records.iter_mut().find(|r| r.path == path) {
            Some(existing) => *existing = record.clone(),
            None => self.records.push(record.clone()),
        }
        Ok(record)
    }

    /// Drop a file's record. The selection is cleared when it was loaded
    /// from that path.
    pub fn remove(&mut self, path: &Path) {
        self.records.retain(|r| r.path != path);
        if self.current.as_ref().is_some_and(|doc| doc.path == path) {
            self.current = None;
        }
    }

    /// Re-parse the file at `path` and make it the current selection.
    /// On failure the selection is cleared.
    pub fn select(&mut self, path: &Path) -> Result<&MidiDocument, MidiError> {
        self.current = None;
        let doc = MidiDocument::open(path)?;
        Ok(self.current.insert(doc))
    }

    /// Drop all records and the selection.
    pub fn clear(&mut self) {
        self.records.clear();
        self.current = None;
    }

    /// Validate and remember the output folder, creating it if absent.
    /// On failure the folder reverts to unset.
    pub fn set_output_folder(&mut self, path: PathBuf) -> std::io::Result<()> {
        match fs::create_dir_all(&path) {
            Ok(()) => {
                self.output_folder = Some(path);
                Ok(())
            }
            Err(err) => {
                self.output_folder = None;
                Err(err)
            }
        }
    }

    pub fn clear_output_folder(&mut self) {
        self.output_folder = None;
    }

    pub fn output_folder(&self) -> Option<&Path> {
        self.output_folder.as_deref()
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All cataloged paths in display order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.records.iter().map(|r| r.path.clone()).collect()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.records.iter().any(|r| r.path == path)
    }

    pub fn current(&self) -> Option<&MidiDocument> {
        self.current.as_ref()
    }

    /// Record the outcome of a processing attempt.
    pub fn set_status(&mut self, path: &Path, status: FileStatus) {
        if let Some(record) = self.records.iter_mut().find(|r| r.path == path) {
            record.status = status;
        }
    }
}
