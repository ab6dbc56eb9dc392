use std::fmt::Display;

use clap::ValueEnum;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub artist: String,
    pub title: String,
    pub url: String,
}
impl Song {
    pub fn new<A, T, U>(artist: A, title: T, url: U) -> Self
    where
        A: Into<String>,
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            artist: artist.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}
impl Display for Song {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Song({}, {}, {})", self.artist, self.title, self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioFormat {
    Aac,
    Flac,
    Mp3,
    M4a,
    Opus,
    Vorbis,
    Wav,
}
impl AudioFormat {
    /// Extension of the file the fetch tool writes when asked to extract
    /// audio in this format.
    pub const fn container_extension(self) -> &'static str {
        match self {
            Self::Vorbis => "ogg",
            other => other.name(),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
            Self::Opus => "opus",
            Self::Vorbis => "vorbis",
            Self::Wav => "wav",
        }
    }
}
impl Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct ParsingOptions {
    pub delimiter: String,
    pub audio_format: AudioFormat,
}
