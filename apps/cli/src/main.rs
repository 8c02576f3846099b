mod format;

use std::path::{Path, PathBuf};

use clap::Parser;
use subtidy_caption::{RechunkConfig, build_cues};
use transcript_interface::{SpeakerSegment, Transcript};

#[derive(Parser)]
#[command(
    name = "subtidy",
    about = "Merge a word-level transcript with speaker diarization into tidy subtitles"
)]
struct Cli {
    /// Whisper-style transcript JSON with word timestamps.
    transcript: PathBuf,

    /// Diarization timeline JSON: an array of {start, end, speaker}.
    /// Without it every cue is attributed to the default speaker.
    #[arg(long)]
    speakers: Option<PathBuf>,

    /// JSON file overriding rechunker thresholds and the speaker name map.
    /// Unnamed fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path; defaults to the transcript path with extension "srt".
    /// A ".vtt" sibling is always written next to it.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Caption(#[from] subtidy_caption::Error),
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let transcript: Transcript = read_json(&cli.transcript)?;
    let timeline: Vec<SpeakerSegment> = match &cli.speakers {
        Some(path) => read_json(path)?,
        None => {
            tracing::warn!("no diarization timeline; tagging everything with the default speaker");
            vec![]
        }
    };
    let config: RechunkConfig = match &cli.config {
        Some(path) => read_json(path)?,
        None => RechunkConfig::default(),
    };

    let cues = build_cues(&transcript, timeline, &config)?;

    let srt_path = cli
        .output
        .unwrap_or_else(|| cli.transcript.with_extension("srt"));
    let vtt_path = srt_path.with_extension("vtt");

    write_text(&srt_path, &format::compose_srt(&cues))?;
    write_text(&vtt_path, &format::compose_vtt(&cues))?;

    tracing::info!(
        cues = cues.len(),
        srt = %srt_path.display(),
        vtt = %vtt_path.display(),
        "subtitles_written"
    );

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, content: &str) -> Result<(), Error> {
    std::fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
