//! Standard MIDI file support for the track processor
//!
//! Wraps the `midly` parser with a document type plus the track filtering
//! and tempo preservation steps the batch pipeline is built from. `midly`
//! models messages as tagged variants with an `Unknown` catch-all, so tracks
//! that are carried over untouched round-trip without losing fields.

pub mod document;
pub mod error;
pub mod filter;
pub mod summary;
pub mod tempo;

// Re-export main types
pub use document::MidiDocument;
pub use error::MidiError;
pub use filter::FilterMode;
pub use summary::TrackSummary;
