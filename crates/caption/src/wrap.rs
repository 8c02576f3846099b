use crate::config::RechunkConfig;
use crate::text::{char_len, ends_soft_pause, ends_terminal, word_count};

/// Lay out one cue's tokens as a single line, or two lines joined by `\n`.
///
/// Token runs within the words-per-line budget stay on one line. Longer runs
/// get a brute-force scan over every split position: splits where either
/// line busts the character or word budget are rejected, the rest are scored
/// by line-length balance with a bias toward breaking after punctuation.
/// Strictly-lower score wins, so the first split seen keeps a tie. If no
/// split is acceptable the run stays on one line.
///
/// Local and deterministic, not a global line-breaking optimum.
pub fn wrap_lines(tokens: &[&str], config: &RechunkConfig) -> String {
    if tokens.len() <= config.max_words_per_line {
        return tokens.join(" ");
    }

    let mut best: Option<(i64, String)> = None;

    for k in 1..tokens.len() {
        let line1 = tokens[..k].join(" ");
        let line2 = tokens[k..].join(" ");

        if char_len(&line1).max(char_len(&line2)) > config.max_chars {
            continue;
        }
        if word_count(&line1) > config.max_words_per_line
            || word_count(&line2) > config.max_words_per_line
        {
            continue;
        }

        let balance = (char_len(&line1) as i64 - char_len(&line2) as i64).abs();
        let mut score = balance + if ends_terminal(&line1) { -2 } else { 3 };
        if ends_soft_pause(&line1) {
            score -= 1;
        }

        if best.as_ref().is_none_or(|(best_score, _)| score < *best_score) {
            best = Some((score, format!("{line1}\n{line2}")));
        }
    }

    match best {
        Some((_, text)) => text,
        None => tokens.join(" "),
    }
}
