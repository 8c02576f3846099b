//! Caption rechunking: the segmentation state machine.
//!
//! Consumes speaker-tagged words in order and decides where caption
//! boundaries fall. Capacity limits (duration, characters, reading speed,
//! speaker change) always split. Pause heuristics merely *prefer* a split
//! and can be vetoed by narrower guards: known abbreviations and numeric
//! tokens that masquerade as sentence ends, and pauses whose following
//! token is too small to open a cue worth reading. A candidate cue that is
//! still under the minimum length merges back into the following content
//! instead of being emitted, unless the split was mandated by a speaker
//! change, which always wins.

mod accumulator;

use accumulator::Accumulator;

use crate::config::RechunkConfig;
use crate::text::{char_len, ends_terminal, is_no_split_token, word_count};
use crate::types::{Cue, TaggedWord};
use crate::wrap::wrap_lines;

/// Rechunk a whole word sequence into caption cues.
pub fn rechunk(words: Vec<TaggedWord>, config: &RechunkConfig) -> Vec<Cue> {
    let mut rechunker = Rechunker::new(config);
    for word in words {
        rechunker.push(word);
    }
    rechunker.finish()
}

/// Streaming-style driver around the open-cue [`Accumulator`].
///
/// Call [`push`](Self::push) once per tagged word, then
/// [`finish`](Self::finish) to flush the open cue and reindex. Pure and
/// deterministic: identical pushes always produce identical cue lists.
pub struct Rechunker<'a> {
    config: &'a RechunkConfig,
    cues: Vec<Cue>,
    acc: Option<Accumulator>,
    /// Header line currently in effect, so same-speaker runs show it once.
    shown_header: Option<String>,
    /// Set when a split closed a conversational turn; the next cue re-shows
    /// its header even if the label is unchanged (long-silence re-tag).
    pending_header: bool,
}

impl<'a> Rechunker<'a> {
    pub fn new(config: &'a RechunkConfig) -> Self {
        Self {
            config,
            cues: Vec::new(),
            acc: None,
            shown_header: None,
            pending_header: false,
        }
    }

    pub fn push(&mut self, word: TaggedWord) {
        let Some(acc) = &self.acc else {
            self.acc = Some(Accumulator::seed(word));
            return;
        };

        let last = acc.last();
        let gap = word.start - last.end;
        let mut same_speaker = word.speaker == acc.speaker();

        let chars_try = acc.char_len() + 1 + char_len(&word.text);
        let dur_try = word.end - acc.start();

        let mut force = dur_try > self.config.max_duration
            || chars_try > self.config.max_chars
            || !reading_speed_ok(chars_try, dur_try, self.config.max_chars_per_sec)
            || !same_speaker;

        let mut prefer = gap >= self.config.hard_pause
            || (gap >= self.config.soft_pause && ends_terminal(&last.text));

        // Never split right after "Dr.", "U.S.", "3.5%", …
        if is_no_split_token(&last.text) {
            prefer = false;
        }

        // A pause split after punctuation is not worth a dangling orphan cue.
        if ends_terminal(&last.text)
            && gap >= self.config.soft_pause
            && (char_len(&word.text) < self.config.post_punct_min_chars
                || word_count(&word.text) < self.config.post_punct_min_words)
        {
            prefer = false;
        }

        // Long silence opens a new conversational turn even when the label
        // is unchanged: forced split, header re-shown.
        if same_speaker && gap >= self.config.long_pause_retag {
            same_speaker = false;
            force = true;
        }

        if !force && !prefer {
            self.open().append(word);
            return;
        }

        // Merge-back: the candidate cue is too short to stand alone and
        // nothing mandates flushing it, so keep accumulating.
        if same_speaker
            && (acc.duration() < self.config.min_duration
                || acc.char_len() < self.config.post_punct_min_chars)
        {
            self.open().append(word);
            return;
        }

        self.emit(word, same_speaker, gap);
    }

    /// Flush the open cue and return all cues, reindexed 1..N.
    pub fn finish(mut self) -> Vec<Cue> {
        if let Some(acc) = self.acc.take() {
            let body = wrap_lines(&acc.texts(), self.config);
            let content = self.compose(acc.speaker(), body);
            self.cues.push(Cue {
                index: self.cues.len() + 1,
                start: acc.start(),
                end: acc.end(),
                content,
            });
        }

        for (i, cue) in self.cues.iter_mut().enumerate() {
            cue.index = i + 1;
        }
        self.cues
    }

    fn open(&mut self) -> &mut Accumulator {
        self.acc.as_mut().expect("push seeds the accumulator first")
    }

    fn emit(&mut self, next: TaggedWord, same_speaker: bool, gap: f64) {
        let acc = self.open();
        let start = acc.start();
        let end = acc.end();
        let speaker = acc.speaker().to_string();
        let finished = acc.restart(next);

        let texts: Vec<&str> = finished.iter().map(|w| w.text.as_str()).collect();
        let body = wrap_lines(&texts, self.config);
        let content = self.compose(&speaker, body);

        self.cues.push(Cue {
            index: self.cues.len() + 1,
            start,
            end,
            content,
        });

        if !same_speaker {
            self.pending_header = true;
        }

        // A pause split signals continuation: the cue before the one just
        // emitted picks up a trailing ellipsis unless it already ended a
        // sentence.
        if self.config.ellipsis_on_pause && gap >= self.config.soft_pause && self.cues.len() > 1 {
            let idx = self.cues.len() - 2;
            let prev = &mut self.cues[idx];
            let open_ended = !ends_terminal(prev.content.rsplit('\n').next().unwrap_or_default());
            if open_ended {
                prev.content = format!("{} …", prev.content.trim_end());
            }
        }
    }

    fn compose(&mut self, speaker: &str, body: String) -> String {
        let name = self.config.display_name(speaker);
        let header = format!(">> {name}");

        let show = self.cues.is_empty()
            || self.pending_header
            || self.shown_header.as_deref() != Some(header.as_str());

        if show {
            self.shown_header = Some(header.clone());
            self.pending_header = false;
            format!("{header}\n{body}")
        } else {
            body
        }
    }
}

fn reading_speed_ok(chars: usize, duration: f64, max_cps: f64) -> bool {
    duration > 0.0 && chars as f64 / duration <= max_cps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(text: &str, start: f64, end: f64, speaker: &str) -> TaggedWord {
        TaggedWord {
            start,
            end,
            text: text.to_string(),
            speaker: speaker.to_string(),
        }
    }

    fn word(text: &str, start: f64, end: f64) -> TaggedWord {
        tagged(text, start, end, "SPK0")
    }

    fn run(words: Vec<TaggedWord>) -> Vec<Cue> {
        rechunk(words, &RechunkConfig::default())
    }

    /// Structural invariants every cue list must satisfy: 1-based contiguous
    /// indices, non-decreasing starts, per-cue `start <= end`, and coverage:
    /// the body words, in order, are exactly the input words.
    fn assert_valid_cues(cues: &[Cue], input: &[TaggedWord]) {
        for (i, cue) in cues.iter().enumerate() {
            assert_eq!(cue.index, i + 1, "indices must be contiguous from 1");
            assert!(cue.start <= cue.end, "cue {} runs backwards", cue.index);
        }
        assert!(
            cues.windows(2).all(|w| w[0].start <= w[1].start),
            "cue starts must be non-decreasing"
        );

        let emitted: Vec<&str> = cues
            .iter()
            .flat_map(|cue| cue.body().split_whitespace())
            .filter(|token| *token != "…")
            .collect();
        let expected: Vec<&str> = input
            .iter()
            .flat_map(|w| w.text.split_whitespace())
            .collect();
        assert_eq!(emitted, expected, "every input word in exactly one cue");
    }

    #[test]
    fn empty_input_yields_no_cues() {
        assert!(run(vec![]).is_empty());
    }

    #[test]
    fn single_word_yields_one_headed_cue() {
        let cues = run(vec![word("hello", 0.2, 0.7)]);

        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].index, 1);
        assert_eq!(cues[0].start, 0.2);
        assert_eq!(cues[0].end, 0.7);
        assert_eq!(cues[0].content, ">> SPK0\nhello");
    }

    #[test]
    fn continuous_same_speaker_words_stay_in_one_cue() {
        // Scenario: no diarization, three words over two seconds, no gaps.
        let input = vec![
            word("three", 0.0, 0.6),
            word("quick", 0.6, 1.2),
            word("words", 1.2, 2.0),
        ];

        let cues = run(input.clone());
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].content, ">> SPK0\nthree quick words");
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn speaker_change_forces_a_split_regardless_of_length() {
        let input = vec![
            tagged("hello", 0.0, 0.5, "SPEAKER_00"),
            tagged("hi", 0.6, 1.0, "SPEAKER_01"),
        ];

        let cues = run(input.clone());
        assert_eq!(cues.len(), 2);
        // both cues are far under min_duration; the speaker change wins
        assert_eq!(cues[0].content, ">> SPEAKER_00\nhello");
        assert_eq!(cues[1].content, ">> SPEAKER_01\nhi");
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn abbreviation_suppresses_the_pause_split() {
        // "Dr." ends in terminal punctuation and is followed by a soft
        // pause, but splitting after an abbreviation reads as a mistake.
        let input = vec![word("Dr.", 0.0, 0.4), word("Smith", 0.9, 1.3)];

        let cues = run(input);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].body(), "Dr. Smith");
    }

    #[test]
    fn number_token_suppresses_the_pause_split() {
        let input = vec![
            word("up", 0.0, 0.3),
            word("3.5%", 0.4, 0.9),
            word("overnight", 1.6, 2.4),
        ];

        let cues = run(input);
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn long_silence_splits_and_reshows_the_header() {
        let input = vec![
            tagged("before", 0.0, 1.0, "SPEAKER_00"),
            tagged("after", 13.0, 14.0, "SPEAKER_00"),
        ];

        let cues = run(input.clone());
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].header(), Some(">> SPEAKER_00"));
        // same label, but the silence started a new turn
        assert_eq!(cues[1].header(), Some(">> SPEAKER_00"));
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn tiny_token_after_punctuation_is_absorbed() {
        // The accumulated cue is past both minimums, so without the orphan
        // guard the pause after "finished." would split before "ok".
        let input = vec![
            word("this", 0.0, 0.5),
            word("sentence", 0.5, 1.2),
            word("is", 1.2, 1.5),
            word("finished.", 1.5, 2.0),
            word("ok", 2.4, 2.6),
        ];

        let cues = run(input.clone());
        assert_eq!(cues.len(), 1);
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn short_candidate_merges_into_following_content() {
        let input = vec![
            word("tiny", 0.0, 0.4),
            word("following", 1.2, 2.0),
            word("content", 2.1, 2.9),
        ];

        let cues = run(input.clone());
        // hard pause after "tiny", but a 0.4 s cue is below min_duration
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].body(), "tiny following content");
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn hard_pause_splits_without_punctuation() {
        let input = vec![
            word("leading", 0.0, 0.8),
            word("words", 0.9, 1.6),
            word("after", 2.3, 2.8),
        ];

        let cues = run(input.clone());
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].body(), "leading words");
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn exceeding_max_duration_forces_a_split() {
        let input = vec![
            word("lengthy", 0.0, 3.0),
            word("spoken", 3.0, 6.0),
            word("words", 6.0, 7.0),
        ];

        let cues = run(input.clone());
        assert_eq!(cues.len(), 2);
        let config = RechunkConfig::default();
        assert!(cues.iter().all(|c| c.end - c.start <= config.max_duration));
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn exceeding_reading_speed_forces_a_split() {
        let input = vec![
            word("deliberately", 0.0, 1.0),
            word("measured", 1.2, 2.0),
            word("incomprehensibilities", 2.05, 2.2),
        ];

        let cues = run(input);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].body(), "deliberately measured");
    }

    #[test]
    fn header_shown_once_per_speaker_run() {
        let input = vec![
            word("opening", 0.0, 0.9),
            word("remarks", 1.0, 1.8),
            word("second", 2.6, 3.4),
            word("thought", 3.5, 4.3),
            word("third", 5.1, 5.9),
            word("idea", 6.0, 6.7),
        ];

        let cues = run(input.clone());
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].header(), Some(">> SPK0"));
        assert_eq!(cues[1].header(), None);
        assert_eq!(cues[2].header(), None);
        assert!(
            cues.windows(2)
                .all(|w| w[0].header().is_none() || w[0].header() != w[1].header()),
            "no two consecutive cues repeat a header"
        );
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn pause_split_marks_the_previous_cue_with_an_ellipsis() {
        let input = vec![
            tagged("alpha", 0.0, 0.8, "SPEAKER_00"),
            tagged("beta", 0.9, 1.7, "SPEAKER_00"),
            tagged("gamma-ray", 1.8, 2.5, "SPEAKER_01"),
            tagged("detector", 2.6, 3.4, "SPEAKER_01"),
            tagged("epsilon", 4.2, 5.0, "SPEAKER_01"),
        ];

        let cues = run(input);
        assert_eq!(cues.len(), 3);
        // the pause fell between "detector" and "epsilon"; the continuation
        // marker lands on the cue before the one that split flushed
        assert!(cues[0].content.ends_with("alpha beta …"));
        assert!(!cues[1].content.contains('…'));
    }

    #[test]
    fn no_ellipsis_after_a_finished_sentence() {
        let input = vec![
            tagged("alpha", 0.0, 0.8, "SPEAKER_00"),
            tagged("beta.", 0.9, 1.7, "SPEAKER_00"),
            tagged("gamma-ray", 1.8, 2.5, "SPEAKER_01"),
            tagged("detector", 2.6, 3.4, "SPEAKER_01"),
            tagged("epsilon", 4.2, 5.0, "SPEAKER_01"),
        ];

        let cues = run(input);
        assert!(cues[0].content.ends_with("alpha beta."));
    }

    #[test]
    fn ellipsis_can_be_disabled() {
        let config = RechunkConfig {
            ellipsis_on_pause: false,
            ..RechunkConfig::default()
        };
        let input = vec![
            tagged("alpha", 0.0, 0.8, "SPEAKER_00"),
            tagged("beta", 0.9, 1.7, "SPEAKER_00"),
            tagged("gamma-ray", 1.8, 2.5, "SPEAKER_01"),
            tagged("detector", 2.6, 3.4, "SPEAKER_01"),
            tagged("epsilon", 4.2, 5.0, "SPEAKER_01"),
        ];

        let cues = rechunk(input, &config);
        assert!(cues.iter().all(|c| !c.content.contains('…')));
    }

    #[test]
    fn speaker_names_resolve_through_the_map() {
        let config = RechunkConfig {
            speaker_names: [("SPEAKER_00".to_string(), "Dave".to_string())].into(),
            ..RechunkConfig::default()
        };

        let cues = rechunk(vec![tagged("hello", 0.0, 0.5, "SPEAKER_00")], &config);
        assert_eq!(cues[0].content, ">> Dave\nhello");
    }

    #[test]
    fn oversized_single_word_gets_its_own_cue() {
        let big = "a".repeat(100);
        let input = vec![
            word("opening", 0.0, 0.9),
            word("statement", 1.0, 1.8),
            word(&big, 1.9, 3.9),
            word("closing", 4.0, 4.9),
        ];

        let cues = run(input.clone());
        assert_eq!(cues.len(), 3);
        // unavoidable: the atomic word alone busts the character cap
        assert_eq!(cues[1].body(), big);
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn capacity_limits_hold_over_a_long_stream() {
        let config = RechunkConfig::default();
        // 0.625 s word cadence is exactly representable, so the cap
        // comparisons below are exact too
        let input: Vec<TaggedWord> = (0..40)
            .map(|i| {
                let start = i as f64 * 0.625;
                word(&format!("word{i:02}"), start, start + 0.5)
            })
            .collect();

        let cues = run(input.clone());
        assert!(cues.len() > 1);
        for cue in &cues {
            let duration = cue.end - cue.start;
            let body = cue.body().replace('\n', " ");
            assert!(duration <= config.max_duration);
            assert!(char_len(&body) <= config.max_chars);
            assert!(char_len(&body) as f64 / duration <= config.max_chars_per_sec);
            for line in cue.body().lines() {
                assert!(word_count(line) <= config.max_words_per_line);
            }
        }
        assert_valid_cues(&cues, &input);
    }

    #[test]
    fn rechunking_is_deterministic() {
        let input = vec![
            tagged("alpha", 0.0, 0.8, "SPEAKER_00"),
            tagged("beta.", 0.9, 1.7, "SPEAKER_00"),
            tagged("gamma", 2.5, 3.2, "SPEAKER_01"),
            tagged("delta", 3.3, 4.0, "SPEAKER_01"),
            tagged("omega", 15.0, 15.8, "SPEAKER_01"),
        ];

        let first = run(input.clone());
        let second = run(input);
        assert_eq!(first, second);
    }
}
