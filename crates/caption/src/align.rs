use transcript_interface::SpeakerSegment;

use crate::types::{TaggedWord, WordToken};

/// Label used when diarization is absent or a segment carries no speaker.
pub const DEFAULT_SPEAKER: &str = "SPK0";

/// Tag each word with the diarization speaker active at its start time.
///
/// The timeline is sorted by `start` first (producers don't guarantee
/// order), then walked with a single forward pointer as words are scanned:
/// advance while the next segment's start is already reached by the word's
/// start; if the word starts strictly after the current segment's end and a
/// next segment exists, advance once more: skip the silence gap rather than
/// tag the word into it from the wrong side.
///
/// Diarization is optional: an empty timeline tags every word with
/// [`DEFAULT_SPEAKER`].
///
/// # Precondition
///
/// Segments must be non-overlapping once sorted. The pointer never
/// regresses, so overlapping segments can tag a word from a segment it does
/// not temporally belong to; such timelines are malformed input, not
/// something this walk recovers from.
pub fn assign_speakers(
    words: Vec<WordToken>,
    mut timeline: Vec<SpeakerSegment>,
) -> Vec<TaggedWord> {
    if timeline.is_empty() {
        return words.into_iter().map(|w| w.tagged(DEFAULT_SPEAKER)).collect();
    }

    timeline.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut i = 0;
    words
        .into_iter()
        .map(|word| {
            while i + 1 < timeline.len() && word.start >= timeline[i + 1].start {
                i += 1;
            }
            if word.start > timeline[i].end && i + 1 < timeline.len() {
                i += 1;
            }

            let speaker = timeline[i].speaker.as_deref().unwrap_or(DEFAULT_SPEAKER);
            word.tagged(speaker)
        })
        .collect()
}
