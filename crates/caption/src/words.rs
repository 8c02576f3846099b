use transcript_interface::Transcript;

use crate::error::Error;
use crate::types::WordToken;

/// Flatten a transcript into an ordered word-token sequence.
///
/// Word-level entries win when any segment carries them: every entry with
/// `start`, `end` and `word` all present is collected in order, text
/// whitespace-trimmed. Entries the provider left incomplete are skipped.
///
/// With no word-level data anywhere, falls back to one token per segment
/// from the segment's own timing and text; a fallback segment missing any of
/// those is a hard error: there is nothing left to caption from.
///
/// Timing is validated either way: `end < start` or a non-finite timestamp
/// fails fast rather than corrupting downstream cue timing.
pub fn collect_words(transcript: &Transcript) -> Result<Vec<WordToken>, Error> {
    let mut words = Vec::new();

    for segment in &transcript.segments {
        for entry in segment.words() {
            if let (Some(start), Some(end), Some(text)) =
                (entry.start, entry.end, entry.word.as_deref())
            {
                words.push(validated(start, end, text.trim())?);
            }
        }
    }

    if words.is_empty() {
        for (index, segment) in transcript.segments.iter().enumerate() {
            let (Some(start), Some(end), Some(text)) =
                (segment.start, segment.end, segment.text.as_deref())
            else {
                return Err(Error::MalformedSegment { index });
            };
            words.push(validated(start, end, text.trim())?);
        }
    }

    Ok(words)
}

fn validated(start: f64, end: f64, text: &str) -> Result<WordToken, Error> {
    if !start.is_finite() || !end.is_finite() || end < start {
        return Err(Error::InvalidTiming {
            text: text.to_string(),
            start,
            end,
        });
    }

    Ok(WordToken {
        start,
        end,
        text: text.to_string(),
    })
}
