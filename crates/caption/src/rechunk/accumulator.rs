use crate::text::char_len;
use crate::types::TaggedWord;

/// The open cue: every word accumulated since the last split, the fixed
/// start time, and the speaker the cue is attributed to.
///
/// Never empty: constructed seeded with one word and reset the same way.
#[derive(Debug)]
pub(super) struct Accumulator {
    words: Vec<TaggedWord>,
    start: f64,
    speaker: String,
}

impl Accumulator {
    pub(super) fn seed(word: TaggedWord) -> Self {
        Self {
            start: word.start,
            speaker: word.speaker.clone(),
            words: vec![word],
        }
    }

    pub(super) fn append(&mut self, word: TaggedWord) {
        self.words.push(word);
    }

    /// Close the open cue and start a fresh one seeded with `next`.
    /// Returns the finished words.
    pub(super) fn restart(&mut self, next: TaggedWord) -> Vec<TaggedWord> {
        let start = next.start;
        let speaker = next.speaker.clone();
        let finished = std::mem::replace(&mut self.words, vec![next]);
        self.start = start;
        self.speaker = speaker;
        finished
    }

    pub(super) fn last(&self) -> &TaggedWord {
        self.words.last().expect("accumulator is never empty")
    }

    pub(super) fn start(&self) -> f64 {
        self.start
    }

    pub(super) fn speaker(&self) -> &str {
        &self.speaker
    }

    pub(super) fn end(&self) -> f64 {
        self.last().end
    }

    pub(super) fn duration(&self) -> f64 {
        self.end() - self.start
    }

    /// Character count of the space-joined text. Tokens are pre-trimmed, so
    /// joining adds exactly `len - 1` spaces.
    pub(super) fn char_len(&self) -> usize {
        let chars: usize = self.words.iter().map(|w| char_len(&w.text)).sum();
        chars + self.words.len() - 1
    }

    pub(super) fn texts(&self) -> Vec<&str> {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}
