/// One diarization turn: a slice of the timeline attributed to a single
/// speaker. Files are a bare JSON array of these.
///
/// The producer does not guarantee ordering; consumers must sort by `start`
/// before walking the timeline.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SpeakerSegment {
    pub start: f64,
    pub end: f64,
    pub speaker: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timeline_array() {
        let json = r#"[
            {"start": 0.0, "end": 4.2, "speaker": "SPEAKER_00"},
            {"start": 4.5, "end": 9.0, "speaker": "SPEAKER_01"}
        ]"#;

        let timeline: Vec<SpeakerSegment> = serde_json::from_str(json).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[1].speaker.as_deref(), Some("SPEAKER_01"));
    }

    #[test]
    fn speaker_field_is_optional() {
        let json = r#"[{"start": 0.0, "end": 1.0}]"#;
        let timeline: Vec<SpeakerSegment> = serde_json::from_str(json).unwrap();
        assert!(timeline[0].speaker.is_none());
    }
}
