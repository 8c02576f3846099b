use transcript_interface::{SpeakerSegment, Transcript};

use crate::align::assign_speakers;
use crate::config::RechunkConfig;
use crate::error::Error;
use crate::rechunk::rechunk;
use crate::types::Cue;
use crate::words::collect_words;

/// Run the whole pipeline: token loader → speaker aligner → rechunker.
///
/// Pure and deterministic (no I/O, no clock, no randomness), so identical
/// inputs always produce identical cue lists. An empty transcript yields an
/// empty cue list; that is a valid terminal state, not an error.
pub fn build_cues(
    transcript: &Transcript,
    timeline: Vec<SpeakerSegment>,
    config: &RechunkConfig,
) -> Result<Vec<Cue>, Error> {
    let words = collect_words(transcript)?;
    let tagged = assign_speakers(words, timeline);
    Ok(rechunk(tagged, config))
}
