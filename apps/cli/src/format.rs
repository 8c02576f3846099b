//! Minimal SRT/VTT text composition for the final cue list.

use subtidy_caption::Cue;

pub fn compose_srt(cues: &[Cue]) -> String {
    let blocks: Vec<String> = cues
        .iter()
        .map(|cue| {
            format!(
                "{}\n{} --> {}\n{}",
                cue.index,
                timestamp(cue.start, ','),
                timestamp(cue.end, ','),
                cue.content,
            )
        })
        .collect();

    if blocks.is_empty() {
        String::new()
    } else {
        blocks.join("\n\n") + "\n"
    }
}

pub fn compose_vtt(cues: &[Cue]) -> String {
    let mut out = String::from("WEBVTT\n");
    for cue in cues {
        out.push_str(&format!(
            "\n{}\n{} --> {}\n{}\n",
            cue.index,
            timestamp(cue.start, '.'),
            timestamp(cue.end, '.'),
            cue.content,
        ));
    }
    out
}

/// `HH:MM:SS<sep>mmm`: comma for SRT, dot for VTT.
fn timestamp(seconds: f64, sep: char) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let s = (total_ms / 1000) % 60;
    let m = (total_ms / 60_000) % 60;
    let h = total_ms / 3_600_000;
    format!("{h:02}:{m:02}:{s:02}{sep}{ms:03}")
}
