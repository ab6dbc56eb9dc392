use std::{ffi::OsString, path::PathBuf};

use clap::{builder::NonEmptyStringValueParser, Parser};

use crate::{
    downloader::{
        youtube_dl::{DEFAULT_FETCHER, DEFAULT_TRANSCODER},
        ToolConfig,
    },
    song::{AudioFormat, ParsingOptions},
};

/// Reads `artist,title,url` lines from stdin, downloads every song and
/// converts it to the requested format.
#[derive(Parser, Debug)]
#[command(name = "songd", version, long_about = None)]
pub struct Args {
    /// Specify the input format delimiter
    #[arg(long, default_value = ",", value_parser = NonEmptyStringValueParser::new())]
    pub delimiter: String,

    /// Specify the resulting audio format
    #[arg(long, value_enum)]
    pub audio_format: AudioFormat,

    /// Program used to fetch audio from a URL
    #[arg(long, env = "SONGD_FETCHER", default_value = DEFAULT_FETCHER)]
    pub fetcher: OsString,

    /// Program used to tag the fetched audio
    #[arg(long, env = "SONGD_TRANSCODER", default_value = DEFAULT_TRANSCODER)]
    pub transcoder: OsString,

    /// Where finished songs are saved
    #[arg(long, env = "SONGD_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,
}
impl Args {
    pub fn parsing_options(&self) -> ParsingOptions {
        ParsingOptions {
            delimiter: self.delimiter.clone(),
            audio_format: self.audio_format,
        }
    }

    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            fetcher: self.fetcher.clone(),
            transcoder: self.transcoder.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, CommandFactory};

    use super::*;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["songd", "--audio-format", "m4a"]).unwrap();

        let options = args.parsing_options();
        assert_eq!(options.delimiter, ",");
        assert_eq!(options.audio_format, AudioFormat::M4a);
        assert_eq!(args.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_custom_delimiter() {
        let args =
            Args::try_parse_from(["songd", "--delimiter", "|", "--audio-format=vorbis"]).unwrap();

        assert_eq!(args.parsing_options().delimiter, "|");
        assert_eq!(args.audio_format, AudioFormat::Vorbis);
    }

    #[test]
    fn test_every_format_is_accepted() {
        for name in ["aac", "flac", "mp3", "m4a", "opus", "vorbis", "wav"] {
            let args = Args::try_parse_from(["songd", "--audio-format", name]).unwrap();
            assert_eq!(args.audio_format.to_string(), name);
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = Args::try_parse_from(["songd", "--audio-format", "ogg"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_format_is_required() {
        let err = Args::try_parse_from(["songd"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_empty_delimiter_is_rejected() {
        let err = Args::try_parse_from(["songd", "--delimiter", "", "--audio-format", "mp3"])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_tool_overrides() {
        let args = Args::try_parse_from([
            "songd",
            "--audio-format",
            "mp3",
            "--fetcher",
            "yt-dlp",
            "--transcoder",
            "/opt/ffmpeg/bin/ffmpeg",
        ])
        .unwrap();

        let tools = args.tool_config();
        assert_eq!(tools.fetcher, "yt-dlp");
        assert_eq!(tools.transcoder, "/opt/ffmpeg/bin/ffmpeg");
    }
}
