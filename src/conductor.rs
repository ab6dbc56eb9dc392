use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, trace};

use crate::{
    downloader::Downloader,
    song::{ParsingOptions, Song},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("PARSING: invalid number of arguments on line {line}")]
    InvalidFieldCount { line: usize },
}

#[derive(Error, Debug)]
pub enum ConductorError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to download {song}")]
    Download {
        song: Song,
        #[source]
        source: anyhow::Error,
    },
}

/// Turns input lines into songs and downloads them, one at a time and in
/// input order.
#[derive(Debug)]
pub struct Conductor<D> {
    options: ParsingOptions,
    downloader: D,
}
impl<D: Downloader> Conductor<D> {
    pub const fn new(options: ParsingOptions, downloader: D) -> Self {
        Self {
            options,
            downloader,
        }
    }

    /// Returns the number of songs downloaded. Stops at the first line that
    /// doesn't parse or the first song that fails; nothing after it is read.
    pub async fn run<R>(&self, input: R) -> Result<usize, ConductorError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut downloaded = 0;

        for index in 0.. {
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let song = self.parse_line(&line, index)?;
            trace!(index, %song, "Parsed line");

            info!(title = %song.title, artist = %song.artist, "Downloading song");
            self.downloader
                .download(&song, self.options.audio_format)
                .await
                .map_err(|source| ConductorError::Download {
                    song: song.clone(),
                    source,
                })?;

            downloaded += 1;
        }

        debug!(songs = downloaded, "Input exhausted");

        Ok(downloaded)
    }

    pub fn parse_line(&self, line: &str, index: usize) -> Result<Song, ParseError> {
        let fields = line.split(self.options.delimiter.as_str()).collect::<Vec<_>>();

        match fields[..] {
            [artist, title, url] => Ok(Song::new(artist, title, url)),
            _ => Err(ParseError::InvalidFieldCount { line: index }),
        }
    }
}
