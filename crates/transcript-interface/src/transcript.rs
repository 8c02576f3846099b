/// Whisper-style transcript JSON: an ordered list of segments, each
/// optionally carrying word-level entries with their own timestamps.
///
/// Everything is optional at the wire level. Speech-recognition output is
/// messy (segments without word lists, word entries with missing timing),
/// so deciding what counts as malformed is the loader's job
/// (`caption::collect_words`), which reports a typed error instead of a
/// serde parse failure.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub text: Option<String>,
    /// Word-level entries. Providers emit `null` rather than `[]` when word
    /// timestamps are disabled, hence the double optionality.
    #[serde(default)]
    pub words: Option<Vec<WordEntry>>,
}

impl Segment {
    pub fn words(&self) -> &[WordEntry] {
        self.words.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct WordEntry {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub word: Option<String>,
}
