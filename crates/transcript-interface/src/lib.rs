mod diarization;
mod transcript;

pub use diarization::SpeakerSegment;
pub use transcript::{Segment, Transcript, WordEntry};
