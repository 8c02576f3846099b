#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("segment {index} has no word-level entries and is missing start/end/text")]
    MalformedSegment { index: usize },
    #[error("token {text:?} has invalid timing: start {start}, end {end}")]
    InvalidTiming { text: String, start: f64, end: f64 },
}
