use std::fs;
use std::path::{Path, PathBuf};

use midly::{Smf, Timing};

use super::error::MidiError;

/// A parsed standard MIDI file together with the path it was loaded from.
///
/// The document is a plain value: it holds no open file handle, and every
/// open/save call reads or writes the whole file in one go.
pub struct MidiDocument {
    pub smf: Smf<'static>,
    pub path: PathBuf,
}

impl MidiDocument {
    /// Read and parse the file at `path`.
    pub fn open(path: &Path) -> Result<Self, MidiError> {
        let data = fs::read(path)?;
        let smf = Smf::parse(&data)?.make_static();
        Ok(Self {
            smf,
            path: path.to_path_buf(),
        })
    }

    /// Wrap an in-memory file that was never read from disk.
    pub fn from_smf(smf: Smf<'static>) -> Self {
        Self {
            smf,
            path: PathBuf::new(),
        }
    }

    /// Serialize the document to `path`.
    pub fn save(&self, path: &Path) -> Result<(), MidiError> {
        self.smf.save(path)?;
        Ok(())
    }

    pub fn track_count(&self) -> usize {
        self.smf.tracks.len()
    }

    /// Time resolution in ticks per beat, when the file uses metrical timing.
    pub fn ticks_per_beat(&self) -> Option<u16> {
        match self.smf.header.timing {
            Timing::Metrical(ticks) => Some(ticks.as_int()),
            Timing::Timecode(..) => None,
        }
    }
}
