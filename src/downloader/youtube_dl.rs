use std::{
    env,
    ffi::{OsStr, OsString},
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Stdio,
};

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use super::Downloader;
use crate::{
    helpers::temp_dir::TempDir,
    song::{AudioFormat, Song},
};

pub const DEFAULT_FETCHER: &str = "youtube-dl";
pub const DEFAULT_TRANSCODER: &str = "ffmpeg";

const FETCH_OUTPUT_NAME: &str = "file.dat";

#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub fetcher: OsString,
    pub transcoder: OsString,
}
impl ToolConfig {
    /// Warns about every tool that can't be found. Nothing fails here, a
    /// missing tool only becomes an error once a song needs it.
    pub fn check_available(&self) {
        for tool in [&self.fetcher, &self.transcoder] {
            match which::which(tool) {
                Ok(path) => debug!(?tool, ?path, "Found external tool"),
                Err(e) => warn!(?tool, ?e, "External tool not found"),
            }
        }
    }
}

/// Fetches with `youtube-dl` and tags with `ffmpeg` (or compatible tools
/// configured in [`ToolConfig`]).
#[derive(Debug)]
pub struct YoutubeDlDownloader {
    tools: ToolConfig,
    temp_root: PathBuf,
    output_dir: PathBuf,
}
impl YoutubeDlDownloader {
    pub fn new(tools: ToolConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools,
            temp_root: env::temp_dir(),
            output_dir: output_dir.into(),
        }
    }

    /// Create the per-song temp dirs somewhere other than the system temp dir.
    #[cfg(test)]
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = temp_root.into();
        self
    }

    #[tracing::instrument(skip(self, work_dir))]
    async fn fetch_audio(
        &self,
        work_dir: &Path,
        url: &str,
        audio_format: AudioFormat,
    ) -> anyhow::Result<PathBuf> {
        debug!("Fetching audio");
        let cmd_status = Command::new(&self.tools.fetcher)
            .arg(url)
            .arg("-x")
            .arg(format!("--audio-format={}", audio_format))
            .args(["-o", FETCH_OUTPUT_NAME])
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .with_context(|| format!("Failed to run {:?}", self.tools.fetcher))?;
        trace!(status = ?cmd_status, "Fetch command finished");

        // The fetch tool swaps the extension of the `-o` name for the one of
        // the extracted audio.
        Ok(work_dir.join(format!("file.{}", audio_format.container_extension())))
    }

    #[tracing::instrument(skip(self, work_dir, song), fields(title = %song.title, artist = %song.artist))]
    async fn tag_audio(
        &self,
        work_dir: &Path,
        input: &Path,
        song: &Song,
        audio_format: AudioFormat,
    ) -> anyhow::Result<PathBuf> {
        debug!("Tagging audio");
        let output = work_dir.join(format!("file1.{}", audio_format.container_extension()));

        let cmd_status = Command::new(&self.tools.transcoder)
            .args([OsStr::new("-i"), input.as_os_str()])
            .args(["-metadata", &format!("title={}", song.title)])
            .args(["-metadata", &format!("author={}", song.artist)])
            .args(["-metadata", &format!("artist={}", song.artist)])
            .args(["-codec", "copy"])
            .arg(&output)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .with_context(|| format!("Failed to run {:?}", self.tools.transcoder))?;
        trace!(status = ?cmd_status, "Tag command finished");

        Ok(output)
    }
}

#[async_trait::async_trait]
impl Downloader for YoutubeDlDownloader {
    #[tracing::instrument(skip(self, song), fields(song = %song))]
    async fn download(&self, song: &Song, audio_format: AudioFormat) -> anyhow::Result<()> {
        let temp_dir = TempDir::with_prefix_in(&self.temp_root, "songd-")
            .context("Failed to create temp dir")?;

        let fetched = self
            .fetch_audio(temp_dir.path(), &song.url, audio_format)
            .await?;
        trace!(?fetched, "Audio fetched");

        let tagged = self
            .tag_audio(temp_dir.path(), &fetched, song, audio_format)
            .await?;
        trace!(?tagged, "Audio tagged");

        let destination = self
            .output_dir
            .join(format!("{}.{}", song.title, audio_format));
        move_file(&tagged, &destination).await.with_context(|| {
            format!(
                "Failed to move {} to {}",
                tagged.display(),
                destination.display()
            )
        })?;

        debug!(?destination, "Song saved");

        Ok(())
    }
}

/// Rename, falling back to copy and remove when the two paths are on
/// different file systems. Overwrites `to`.
async fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match tokio::fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(e),
        Err(e) => {
            trace!(?e, "Rename failed, copying instead");
            tokio::fs::copy(from, to).await?;
            tokio::fs::remove_file(from).await
        }
    }
}
