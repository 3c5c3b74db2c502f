//! Lip-sync pipeline: audio conversion followed by viseme extraction
//!
//! For message `i` the pipeline turns `message_<i>.mp3` into
//! `message_<i>.wav` with ffmpeg, then runs rhubarb on the wav to produce the
//! `message_<i>.json` mouth-cue transcript. Files are keyed by index only, so
//! two requests in flight overwrite each other's assets.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use super::super::CoreResult;
use super::shell::{self, CommandInput};

/// Filename conventions inside the audios directory
#[derive(Clone, Debug)]
pub struct AudioLayout {
    root: PathBuf,
}

impl AudioLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Synthesized speech for reply message `index`
    pub fn speech_path(&self, index: usize) -> PathBuf {
        self.root.join(format!("message_{}.mp3", index))
    }

    pub fn wav_path(&self, index: usize) -> PathBuf {
        self.root.join(format!("message_{}.wav", index))
    }

    pub fn transcript_path(&self, index: usize) -> PathBuf {
        self.root.join(format!("message_{}.json", index))
    }

    /// Pre-rendered asset such as `intro_0.wav`
    pub fn asset(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Seam between the dialogue pipeline and the external lip-sync tools
#[async_trait]
pub trait LipSync: Send + Sync {
    /// Produce the transcript for message `index` from its synthesized speech
    async fn lip_sync_message(&self, index: usize) -> CoreResult<()>;
}

/// Runs ffmpeg and rhubarb as subprocesses
pub struct LipSyncRunner {
    layout: AudioLayout,
    ffmpeg_bin: PathBuf,
    rhubarb_bin: PathBuf,
}

impl LipSyncRunner {
    pub fn new(layout: AudioLayout, ffmpeg_bin: impl Into<PathBuf>, rhubarb_bin: impl Into<PathBuf>) -> Self {
        Self {
            layout,
            ffmpeg_bin: ffmpeg_bin.into(),
            rhubarb_bin: rhubarb_bin.into(),
        }
    }

    pub fn conversion_command(&self, index: usize) -> CommandInput {
        CommandInput::new(&self.ffmpeg_bin)
            .arg("-y")
            .arg("-i")
            .arg(self.layout.speech_path(index))
            .arg(self.layout.wav_path(index))
    }

    pub fn extraction_command(&self, index: usize) -> CommandInput {
        CommandInput::new(&self.rhubarb_bin)
            .arg("-f")
            .arg("json")
            .arg("-o")
            .arg(self.layout.transcript_path(index))
            .arg(self.layout.wav_path(index))
            .arg("-r")
            .arg("phonetic")
    }
}

#[async_trait]
impl LipSync for LipSyncRunner {
    async fn lip_sync_message(&self, index: usize) -> CoreResult<()> {
        let started = Instant::now();
        info!("Starting conversion for message {}", index);

        shell::run(&self.conversion_command(index)).await?;
        info!("Conversion done in {}ms", started.elapsed().as_millis());

        shell::run(&self.extraction_command(index)).await?;
        info!("Lip sync done in {}ms", started.elapsed().as_millis());

        Ok(())
    }
}
