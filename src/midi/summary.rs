use std::collections::BTreeMap;

use midly::{MetaMessage, MidiMessage, TrackEventKind};

use super::document::MidiDocument;

/// Display name for tracks without a track-name message.
pub const UNNAMED_TRACK: &str = "Unnamed";

/// Read-only per-track view for the track list: index, display name, and
/// how many messages of each kind the track carries. Recomputed from the
/// selected document, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSummary {
    pub index: usize,
    pub name: String,
    pub message_counts: BTreeMap<&'static str, usize>,
}

impl TrackSummary {
    pub fn message_total(&self) -> usize {
        self.message_counts.values().sum()
    }
}

/// Summarize every track of `doc` in track order.
pub fn summarize_tracks(doc: &MidiDocument) -> Vec<TrackSummary> {
    doc.smf
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let mut name: Option<String> = None;
            let mut message_counts = BTreeMap::new();

            for event in track {
                if name.is_none() {
                    if let TrackEventKind::Meta(MetaMessage::TrackName(raw)) = event.kind {
                        name = Some(String::from_utf8_lossy(raw).into_owned());
                    }
                }
                *message_counts.entry(kind_label(&event.kind)).or_insert(0) += 1;
            }

            TrackSummary {
                index,
                name: name.unwrap_or_else(|| UNNAMED_TRACK.to_string()),
                message_counts,
            }
        })
        .collect()
}

/// Message kind label. Follows mido's type names so the track list reads
/// like the original tool's output.
fn kind_label(kind: &TrackEventKind<'_>) -> &'static str {
    match kind {
        TrackEventKind::Midi { message, .. } => match message {
            MidiMessage::NoteOff { .. } => "note_off",
            MidiMessage::NoteOn { .. } => "note_on",
            MidiMessage::Aftertouch { .. } => "polytouch",
            MidiMessage::Controller { .. } => "control_change",
            MidiMessage::ProgramChange { .. } => "program_change",
            MidiMessage::ChannelAftertouch { .. } => "aftertouch",
            MidiMessage::PitchBend { .. } => "pitchwheel",
        },
        TrackEventKind::SysEx(_) => "sysex",
        TrackEventKind::Escape(_) => "escape",
        TrackEventKind::Meta(meta) => match meta {
            MetaMessage::TrackNumber(_) => "sequence_number",
            MetaMessage::Text(_) => "text",
            MetaMessage::Copyright(_) => "copyright",
            MetaMessage::TrackName(_) => "track_name",
            MetaMessage::InstrumentName(_) => "instrument_name",
            MetaMessage::Lyric(_) => "lyrics",
            MetaMessage::Marker(_) => "marker",
            MetaMessage::CuePoint(_) => "cue_marker",
            MetaMessage::ProgramName(_) => "program_name",
            MetaMessage::DeviceName(_) => "device_name",
            MetaMessage::MidiChannel(_) => "channel_prefix",
            MetaMessage::MidiPort(_) => "midi_port",
            MetaMessage::EndOfTrack => "end_of_track",
            MetaMessage::Tempo(_) => "set_tempo",
            MetaMessage::SmpteOffset(_) => "smpte_offset",
            MetaMessage::TimeSignature(..) => "time_signature",
            MetaMessage::KeySignature(..) => "key_signature",
            MetaMessage::SequencerSpecific(_) => "sequencer_specific",
            MetaMessage::Unknown(..) => "unknown_meta",
        },
    }
}
