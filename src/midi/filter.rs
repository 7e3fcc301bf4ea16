use midly::Smf;

use super::document::MidiDocument;

/// The two filtering polarities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Retain only the selected track indices.
    Keep,
    /// Retain everything except the selected track indices.
    Remove,
}

/// Copy the surviving tracks of `doc` into a new document.
///
/// The header is carried over unchanged (and with it the ticks-per-beat
/// resolution), tracks stay in their original order, and each included track
/// is copied as-is. Indices outside the track range simply never match.
/// Returns `None` when no track survives; the caller decides whether that
/// is an error.
pub fn filter_tracks(
    doc: &MidiDocument,
    indices: &[usize],
    mode: FilterMode,
) -> Option<MidiDocument> {
    let mut smf = Smf::new(doc.smf.header);

    for (i, track) in doc.smf.tracks.iter().enumerate() {
        let selected = indices.contains(&i);
        let included = match mode {
            FilterMode::Keep => selected,
            FilterMode::Remove => !selected,
        };
        if included {
            smf.tracks.push(track.clone());
        }
    }

    if smf.tracks.is_empty() {
        return None;
    }

    let mut filtered = MidiDocument::from_smf(smf);
    filtered.path = doc.path.clone();
    Some(filtered)
}
