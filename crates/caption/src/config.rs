use std::collections::HashMap;

/// Tunable thresholds for the rechunker and line wrapper. Durations and
/// pauses are seconds; character limits count Unicode scalars.
///
/// Deserialization falls back to `Default` per the container attribute, so a
/// partial JSON config file overrides only the fields it names.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RechunkConfig {
    /// Cues shorter than this merge into the following content, unless the
    /// split was mandated by a speaker change.
    pub min_duration: f64,
    /// Hard cap on cue duration; always splits.
    pub max_duration: f64,
    /// Hard cap on cue character count; also caps each wrapped line.
    pub max_chars: usize,
    /// Reading-speed cap in characters per second; always splits.
    pub max_chars_per_sec: f64,
    /// A gap at least this long prefers a split when the previous token ends
    /// in terminal punctuation.
    pub soft_pause: f64,
    /// A gap at least this long prefers a split regardless of punctuation.
    pub hard_pause: f64,
    /// Wrap-line capacity in whitespace-separated words.
    pub max_words_per_line: usize,
    /// Veto a post-punctuation pause split when the next token alone is
    /// shorter than this many characters. Doubles as the minimum character
    /// count below which a candidate cue merges back.
    pub post_punct_min_chars: usize,
    /// Veto a post-punctuation pause split when the next token alone has
    /// fewer than this many words.
    pub post_punct_min_words: usize,
    /// Silence after which a same-speaker run is treated as a new
    /// conversational turn: forced split, header re-shown.
    pub long_pause_retag: f64,
    /// Append a trailing " …" to the previous cue when splitting on a pause
    /// mid-sentence.
    pub ellipsis_on_pause: bool,
    /// Diarization label → display name. Unmapped labels are shown raw.
    pub speaker_names: HashMap<String, String>,
}

impl Default for RechunkConfig {
    fn default() -> Self {
        Self {
            min_duration: 1.5,
            max_duration: 6.5,
            max_chars: 84,
            max_chars_per_sec: 15.0,
            soft_pause: 0.35,
            hard_pause: 0.60,
            max_words_per_line: 8,
            post_punct_min_chars: 12,
            post_punct_min_words: 3,
            long_pause_retag: 10.0,
            ellipsis_on_pause: true,
            speaker_names: HashMap::new(),
        }
    }
}

impl RechunkConfig {
    pub fn display_name<'a>(&'a self, label: &'a str) -> &'a str {
        self.speaker_names
            .get(label)
            .map(String::as_str)
            .unwrap_or(label)
    }
}
