use std::path::{Path, PathBuf};

use log::{error, info};
use walkdir::WalkDir;

use crate::catalog::{Catalog, FileStatus};
use crate::midi::filter::{FilterMode, filter_tracks};
use crate::midi::summary::summarize_tracks;
use crate::midi::{MidiDocument, MidiError, TrackSummary, tempo};

/// User-facing message queued for the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Coordinates the catalog, track filter, and tempo preservation in response
/// to user intents, and maps failures to user-visible messages.
///
/// The presenter knows nothing about the GUI toolkit: components call the
/// intent methods, read state through the accessors, and drain queued
/// notifications for display. Failures never escape a single file or batch;
/// they end up in a file's status or a notification.
#[derive(Default)]
pub struct Presenter {
    catalog: Catalog,
    track_summaries: Vec<TrackSummary>,
    notifications: Vec<Notification>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Track summaries of the currently selected file.
    pub fn track_summaries(&self) -> &[TrackSummary] {
        &self.track_summaries
    }

    /// Path of the currently selected file, if any.
    pub fn selected_path(&self) -> Option<&Path> {
        self.catalog.current().map(|doc| doc.path.as_path())
    }

    /// Drain queued notifications for display.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Register files. Unparsable ones are skipped with an error each; the
    /// rest are added regardless.
    pub fn add_files(&mut self, paths: &[PathBuf]) {
        for path in paths {
            match self.catalog.add(path) {
                Ok(record) => {
                    info!(
                        "Added file: {} with {} tracks",
                        path.display(),
                        record.track_count
                    );
                }
                Err(err) => {
                    let msg = format!("Error loading file {}: {}", path.display(), err);
                    error!("{msg}");
                    self.notifications.push(Notification::Error(msg));
                }
            }
        }
    }

    /// Register every `.mid`/`.midi` file directly inside `dir`
    /// (non-recursive).
    pub fn add_folder(&mut self, dir: &Path) {
        let mut found: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .flatten()
            .filter(|entry| entry.file_type().is_file() && is_midi_path(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        found.sort();

        if found.is_empty() {
            self.notifications.push(Notification::Error(format!(
                "No MIDI files found in {}",
                dir.display()
            )));
            return;
        }
        self.add_files(&found);
    }

    pub fn remove_files(&mut self, paths: &[PathBuf]) {
        for path in paths {
            self.catalog.remove(path);
            info!("Removed file: {}", path.display());
        }
        if self.catalog.current().is_none() {
            self.track_summaries.clear();
        }
    }

    /// Re-parse the file at `path` and publish its track summaries.
    pub fn select_file(&mut self, path: &Path) {
        match self.catalog.select(path) {
            Ok(doc) => {
                self.track_summaries = summarize_tracks(doc);
            }
            Err(err) => {
                self.track_summaries.clear();
                let msg = format!("Error loading file {}: {}", path.display(), err);
                error!("{msg}");
                self.notifications.push(Notification::Error(msg));
            }
        }
    }

    pub fn set_output_folder(&mut self, path: PathBuf) {
        match self.catalog.set_output_folder(path.clone()) {
            Ok(()) => info!("Output folder set to {}", path.display()),
            Err(err) => {
                let msg = format!("Cannot use output folder {}: {}", path.display(), err);
                error!("{msg}");
                self.notifications.push(Notification::Error(msg));
            }
        }
    }

    pub fn clear_output_folder(&mut self) {
        self.catalog.clear_output_folder();
    }

    pub fn clear_all(&mut self) {
        self.catalog.clear();
        self.track_summaries.clear();
        info!("Cleared all files");
    }

    /// Run the batch pipeline: for every target file, re-parse, filter the
    /// tracks, re-inject the original tempo (99 BPM when the source has
    /// none), and write `{stem}_modified{ext}` into the output folder.
    ///
    /// Files fail independently; one file's error never aborts the batch.
    /// Without an output folder or a track selection the whole batch is
    /// rejected up front and no file is touched.
    pub fn process_files(
        &mut self,
        track_indices: &[usize],
        mode: FilterMode,
        target_paths: Option<Vec<PathBuf>>,
    ) {
        let Some(output_folder) = self.catalog.output_folder().map(Path::to_path_buf) else {
            self.notifications.push(Notification::Error(
                "Please set output folder first".to_string(),
            ));
            return;
        };
        if track_indices.is_empty() {
            self.notifications
                .push(Notification::Error("No tracks selected".to_string()));
            return;
        }

        let targets = target_paths.unwrap_or_else(|| self.catalog.paths());

        for path in &targets {
            let status = match process_one(path, track_indices, mode, &output_folder) {
                Ok(output_path) => {
                    info!(
                        "Successfully processed {} -> {}",
                        path.display(),
                        output_path.display()
                    );
                    FileStatus::Success
                }
                Err(ProcessError::EmptyResult) => {
                    error!("No tracks to process in {}", path.display());
                    FileStatus::Error("No tracks".to_string())
                }
                Err(ProcessError::Midi(err)) => {
                    error!("Error processing {}: {}", path.display(), err);
                    FileStatus::Error(err.to_string())
                }
            };
            self.catalog.set_status(path, status);
        }

        self.notifications.push(Notification::Success(
            "Processing complete. Check the log file for details.".to_string(),
        ));
    }
}

enum ProcessError {
    /// The filter selected zero tracks.
    EmptyResult,
    Midi(MidiError),
}

impl From<MidiError> for ProcessError {
    fn from(err: MidiError) -> Self {
        ProcessError::Midi(err)
    }
}

/// Pipeline for a single file: parse, extract tempo, filter, inject, save.
fn process_one(
    path: &Path,
    track_indices: &[usize],
    mode: FilterMode,
    output_folder: &Path,
) -> Result<PathBuf, ProcessError> {
    let doc = MidiDocument::open(path)?;
    let bpm = tempo::extract_bpm(&doc).unwrap_or(tempo::DEFAULT_BPM);

    let mut filtered =
        filter_tracks(&doc, track_indices, mode).ok_or(ProcessError::EmptyResult)?;
    tempo::inject_bpm(&mut filtered, bpm);

    let output_path = output_folder.join(modified_file_name(path));
    filtered.save(&output_path)?;
    Ok(output_path)
}

/// `{stem}_modified{ext}`. Inputs in different directories that share a stem
/// collide; the last one written wins.
fn modified_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{}_modified.{}", stem, ext),
        None => format!("{}_modified", stem),
    }
}

fn is_midi_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mid") || ext.eq_ignore_ascii_case("midi"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use midly::num::{u15, u24, u28, u4, u7};
    use midly::{
        Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    };

    fn event(kind: TrackEventKind<'static>) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(0),
            kind,
        }
    }

    fn named_track(name: &'static [u8]) -> Track<'static> {
        vec![
            event(TrackEventKind::Meta(MetaMessage::TrackName(name))),
            event(TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn {
                    key: u7::new(60),
                    vel: u7::new(64),
                },
            }),
            event(TrackEventKind::Meta(MetaMessage::EndOfTrack)),
        ]
    }

    fn write_midi(dir: &Path, name: &str, tracks: Vec<Track<'static>>) -> PathBuf {
        let smf = Smf {
            header: Header {
                format: Format::Parallel,
                timing: Timing::Metrical(u15::new(480)),
            },
            tracks,
        };
        let path = dir.join(name);
        smf.save(&path).unwrap();
        path
    }

    fn write_three_track_midi(dir: &Path, name: &str) -> PathBuf {
        write_midi(
            dir,
            name,
            vec![
                named_track(b"Piano"),
                named_track(b"Bass"),
                named_track(b"Drums"),
            ],
        )
    }

    fn status_of(presenter: &Presenter, path: &Path) -> FileStatus {
        presenter
            .catalog()
            .records()
            .iter()
            .find(|r| r.path == path)
            .map(|r| r.status.clone())
            .unwrap()
    }

    #[test]
    fn add_files_skips_unparsable_and_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_three_track_midi(dir.path(), "a.mid");
        let bad = dir.path().join("b.mid");
        std::fs::write(&bad, b"not a midi file").unwrap();

        let mut presenter = Presenter::new();
        presenter.add_files(&[good.clone(), bad]);

        assert_eq!(presenter.catalog().len(), 1);
        assert!(presenter.catalog().contains(&good));
        let notes = presenter.take_notifications();
        assert_eq!(notes.len(), 1);
        assert!(matches!(&notes[0], Notification::Error(msg) if msg.contains("b.mid")));
    }

    #[test]
    fn add_folder_scans_only_midi_files_non_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write_three_track_midi(dir.path(), "a.mid");
        write_three_track_midi(dir.path(), "b.MIDI");
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        write_three_track_midi(&sub, "deep.mid");

        let mut presenter = Presenter::new();
        presenter.add_folder(dir.path());

        assert_eq!(presenter.catalog().len(), 2);
    }

    #[test]
    fn add_folder_without_midi_files_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let mut presenter = Presenter::new();
        presenter.add_folder(dir.path());

        assert!(presenter.catalog().is_empty());
        let notes = presenter.take_notifications();
        assert!(matches!(&notes[0], Notification::Error(msg) if msg.contains("No MIDI files")));
    }

    #[test]
    fn select_publishes_track_summaries_and_remove_clears_them() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_three_track_midi(dir.path(), "a.mid");

        let mut presenter = Presenter::new();
        presenter.add_files(&[path.clone()]);
        presenter.select_file(&path);

        assert_eq!(presenter.selected_path(), Some(path.as_path()));
        let summaries = presenter.track_summaries();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[1].name, "Bass");

        presenter.remove_files(&[path]);
        assert!(presenter.track_summaries().is_empty());
        assert_eq!(presenter.selected_path(), None);
    }

    #[test]
    fn batch_is_rejected_without_an_output_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_three_track_midi(dir.path(), "a.mid");

        let mut presenter = Presenter::new();
        presenter.add_files(&[path.clone()]);
        presenter.process_files(&[0], FilterMode::Keep, None);

        assert_eq!(status_of(&presenter, &path), FileStatus::Pending);
        let notes = presenter.take_notifications();
        assert_eq!(notes.len(), 1);
        assert!(matches!(&notes[0], Notification::Error(msg) if msg.contains("output folder")));
    }

    #[test]
    fn batch_is_rejected_without_a_track_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_three_track_midi(dir.path(), "a.mid");
        let out = dir.path().join("out");

        let mut presenter = Presenter::new();
        presenter.add_files(&[path.clone()]);
        presenter.set_output_folder(out);
        presenter.process_files(&[], FilterMode::Keep, None);

        assert_eq!(status_of(&presenter, &path), FileStatus::Pending);
        let notes = presenter.take_notifications();
        assert!(matches!(&notes[0], Notification::Error(msg) if msg.contains("No tracks selected")));
    }

    #[test]
    fn keep_one_track_writes_modified_file_and_marks_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_three_track_midi(dir.path(), "song.mid");
        let out = dir.path().join("out");

        let mut presenter = Presenter::new();
        presenter.add_files(&[path.clone()]);
        presenter.set_output_folder(out.clone());
        presenter.process_files(&[1], FilterMode::Keep, None);

        assert_eq!(status_of(&presenter, &path), FileStatus::Success);

        let output_path = out.join("song_modified.mid");
        let written = MidiDocument::open(&output_path).unwrap();
        assert_eq!(written.track_count(), 1);
        let summaries = summarize_tracks(&written);
        assert_eq!(summaries[0].name, "Bass");
        // Injected tempo message is present on the surviving track.
        assert_eq!(summaries[0].message_counts["set_tempo"], 1);

        let notes = presenter.take_notifications();
        assert!(matches!(&notes[0], Notification::Success(_)));
    }

    #[test]
    fn missing_tempo_falls_back_to_99_bpm() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_three_track_midi(dir.path(), "silent.mid");
        let out = dir.path().join("out");

        let mut presenter = Presenter::new();
        presenter.add_files(&[path]);
        presenter.set_output_folder(out.clone());
        presenter.process_files(&[0], FilterMode::Keep, None);

        let written = MidiDocument::open(&out.join("silent_modified.mid")).unwrap();
        let bpm = tempo::extract_bpm(&written).unwrap();
        assert!((bpm - 99.0).abs() < 0.01);
    }

    #[test]
    fn source_tempo_survives_the_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let mut lead = named_track(b"Lead");
        lead.insert(
            1,
            event(TrackEventKind::Meta(MetaMessage::Tempo(u24::new(500_000)))),
        );
        let path = write_midi(dir.path(), "tempo.mid", vec![lead, named_track(b"Pad")]);
        let out = dir.path().join("out");

        let mut presenter = Presenter::new();
        presenter.add_files(&[path]);
        presenter.set_output_folder(out.clone());
        presenter.process_files(&[1], FilterMode::Keep, None);

        let written = MidiDocument::open(&out.join("tempo_modified.mid")).unwrap();
        let bpm = tempo::extract_bpm(&written).unwrap();
        assert!((bpm - 120.0).abs() < 0.01);
    }

    #[test]
    fn empty_filter_result_marks_the_file_with_no_tracks_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_three_track_midi(dir.path(), "a.mid");
        let out = dir.path().join("out");

        let mut presenter = Presenter::new();
        presenter.add_files(&[path.clone()]);
        presenter.set_output_folder(out);
        presenter.process_files(&[0, 1, 2], FilterMode::Remove, None);

        assert_eq!(
            status_of(&presenter, &path),
            FileStatus::Error("No tracks".to_string())
        );
    }

    #[test]
    fn one_failing_file_does_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_three_track_midi(dir.path(), "good.mid");
        let doomed = write_three_track_midi(dir.path(), "doomed.mid");
        let out = dir.path().join("out");

        let mut presenter = Presenter::new();
        presenter.add_files(&[doomed.clone(), good.clone()]);
        // Corrupt the file after adding; the batch re-parses from disk.
        std::fs::write(&doomed, b"corrupted").unwrap();

        presenter.set_output_folder(out);
        presenter.process_files(&[0], FilterMode::Keep, None);

        assert!(matches!(status_of(&presenter, &doomed), FileStatus::Error(_)));
        assert_eq!(status_of(&presenter, &good), FileStatus::Success);
        let notes = presenter.take_notifications();
        assert!(matches!(notes.last().unwrap(), Notification::Success(_)));
    }

    #[test]
    fn targeted_batch_only_touches_the_given_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_three_track_midi(dir.path(), "a.mid");
        let b = write_three_track_midi(dir.path(), "b.mid");
        let out = dir.path().join("out");

        let mut presenter = Presenter::new();
        presenter.add_files(&[a.clone(), b.clone()]);
        presenter.set_output_folder(out.clone());
        presenter.process_files(&[0], FilterMode::Keep, Some(vec![b.clone()]));

        assert_eq!(status_of(&presenter, &a), FileStatus::Pending);
        assert_eq!(status_of(&presenter, &b), FileStatus::Success);
        assert!(out.join("b_modified.mid").exists());
        assert!(!out.join("a_modified.mid").exists());
    }

    #[test]
    fn reprocessing_overwrites_a_previous_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_three_track_midi(dir.path(), "a.mid");
        let out = dir.path().join("out");

        let mut presenter = Presenter::new();
        presenter.add_files(&[path.clone()]);
        presenter.set_output_folder(out);

        presenter.process_files(&[0, 1, 2], FilterMode::Remove, None);
        assert!(matches!(status_of(&presenter, &path), FileStatus::Error(_)));

        presenter.process_files(&[0], FilterMode::Keep, None);
        assert_eq!(status_of(&presenter, &path), FileStatus::Success);
    }
}
