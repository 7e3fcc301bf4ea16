use midly::num::{u24, u28};
use midly::{MetaMessage, TrackEvent, TrackEventKind};

use super::document::MidiDocument;

/// Substituted when a file carries no tempo message at all.
pub const DEFAULT_BPM: f64 = 99.0;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Convert a MIDI tempo (microseconds per beat) to beats per minute.
pub fn tempo_to_bpm(micros_per_beat: u32) -> f64 {
    MICROS_PER_MINUTE / micros_per_beat as f64
}

/// Convert beats per minute to a MIDI tempo (microseconds per beat).
pub fn bpm_to_tempo(bpm: f64) -> u32 {
    (MICROS_PER_MINUTE / bpm).round() as u32
}

/// BPM of the first tempo message found anywhere in the file.
///
/// Tracks are scanned in order and messages within each track in order; the
/// first tempo message encountered wins, regardless of its tick position.
pub fn extract_bpm(doc: &MidiDocument) -> Option<f64> {
    for track in &doc.smf.tracks {
        for event in track {
            if let TrackEventKind::Meta(MetaMessage::Tempo(micros)) = event.kind {
                return Some(tempo_to_bpm(micros.as_int()));
            }
        }
    }
    None
}

/// Append a tempo message for `bpm` to the first track of `doc`.
///
/// The event lands at the end of the track, before a trailing end-of-track
/// marker if one exists so the file stays well-formed when serialized. Its
/// position in playback order relative to the other events is undefined.
pub fn inject_bpm(doc: &mut MidiDocument, bpm: f64) {
    let Some(track) = doc.smf.tracks.first_mut() else {
        return;
    };

    let event = TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(bpm_to_tempo(bpm)))),
    };

    match track.last() {
        Some(last) if matches!(last.kind, TrackEventKind::Meta(MetaMessage::EndOfTrack)) => {
            let at = track.len() - 1;
            track.insert(at, event);
        }
        _ => track.push(event),
    }
}
