use std::fmt;

/// Errors from loading and saving MIDI files
#[derive(Debug)]
pub enum MidiError {
    /// The bytes could not be parsed as a standard MIDI file
    Parse(midly::Error),
    /// IO error
    Io(std::io::Error),
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiError::Parse(err) => write!(f, "Invalid MIDI file: {}", err),
            MidiError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for MidiError {}

impl From<midly::Error> for MidiError {
    fn from(err: midly::Error) -> Self {
        MidiError::Parse(err)
    }
}

impl From<std::io::Error> for MidiError {
    fn from(err: std::io::Error) -> Self {
        MidiError::Io(err)
    }
}
