pub mod youtube_dl;

use crate::song::{AudioFormat, Song};

pub use youtube_dl::{ToolConfig, YoutubeDlDownloader};

/// Fetches a song and leaves it, tagged and in `audio_format`, in the
/// downloader's output directory.
///
/// Failures of the external tools themselves are not reported; an error is
/// only returned when the song could not be placed at all.
#[async_trait::async_trait]
pub trait Downloader: std::fmt::Debug + Send + Sync {
    async fn download(&self, song: &Song, audio_format: AudioFormat) -> anyhow::Result<()>;
}
