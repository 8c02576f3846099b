/// A single timestamped word from the transcript. Sequences are ordered
/// non-decreasing by `start`, with `start <= end` per word.
///
/// In segment-fallback mode (no word-level timestamps anywhere) a "word" is
/// a whole segment's text, so `text` may contain internal spaces.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordToken {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl WordToken {
    pub fn tagged(self, speaker: impl Into<String>) -> TaggedWord {
        TaggedWord {
            start: self.start,
            end: self.end,
            text: self.text,
            speaker: speaker.into(),
        }
    }
}

/// A word plus the diarization speaker label active at its start time.
/// Immutable once tagged; the rechunker only reads these.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TaggedWord {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub speaker: String,
}

/// One finished caption.
///
/// `content` is either a wrapped text block, or that block preceded by a
/// `">> <Name>"` speaker header line. `index` is 1-based and contiguous
/// after `Rechunker::finish`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cue {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub content: String,
}

impl Cue {
    /// The speaker header line, when this cue carries one.
    pub fn header(&self) -> Option<&str> {
        self.content
            .lines()
            .next()
            .filter(|line| line.starts_with(">> "))
    }

    /// The caption text without the speaker header line.
    pub fn body(&self) -> &str {
        match self.header() {
            Some(header) => self.content[header.len()..].trim_start_matches('\n'),
            None => &self.content,
        }
    }
}
