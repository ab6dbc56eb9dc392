mod cli;
mod conductor;
mod downloader;
mod helpers;
mod song;

use std::process::ExitCode;

use clap::Parser;
use cli::Args;
use conductor::{Conductor, ConductorError};
use downloader::YoutubeDlDownloader;
use tokio::io::BufReader;
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::{filter::Builder as TracingFilterBuilder, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    match dotenvy::dotenv() {
        Err(e) if e.not_found() => {}
        Ok(_) => {}
        Err(e) => {
            panic!("Failed to load .env file: {}", e);
        }
    }

    let args = Args::parse();

    init_log();

    debug!(?args, "Starting songd");

    let tools = args.tool_config();
    tools.check_available();

    let conductor = Conductor::new(
        args.parsing_options(),
        YoutubeDlDownloader::new(tools, &args.output_dir),
    );

    let result = conductor.run(BufReader::new(tokio::io::stdin())).await;
    let code = exit_code(&result);

    match result {
        Ok(songs) => info!(songs, "All songs downloaded"),
        Err(ConductorError::Parse(e)) => eprintln!("{e}"),
        Err(e) => eprintln!("Error: {:?}", anyhow::Error::from(e)),
    }

    code
}

/// A malformed line exits with 1, like every other fault. Usage errors never
/// get here, clap exits with 2 for those.
fn exit_code(result: &Result<usize, ConductorError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(ConductorError::Parse(_)) => ExitCode::from(1),
        Err(_) => ExitCode::FAILURE,
    }
}

fn init_log() {
    tracing_subscriber::fmt()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            TracingFilterBuilder::default()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{conductor::ParseError, song::Song};

    #[test]
    fn test_success_exits_zero() {
        assert_eq!(exit_code(&Ok(0)), ExitCode::SUCCESS);
        assert_eq!(exit_code(&Ok(3)), ExitCode::SUCCESS);
    }

    #[test]
    fn test_malformed_line_exits_one() {
        let result = Err(ConductorError::Parse(ParseError::InvalidFieldCount { line: 0 }));

        assert_eq!(exit_code(&result), ExitCode::from(1));
    }

    #[test]
    fn test_failed_download_exits_non_zero() {
        let result = Err(ConductorError::Download {
            song: Song::new("A", "T", "http://x"),
            source: anyhow::anyhow!("No such file or directory"),
        });

        assert_eq!(exit_code(&result), ExitCode::FAILURE);
        assert_ne!(exit_code(&result), ExitCode::SUCCESS);
    }

    #[test]
    fn test_unreadable_input_exits_non_zero() {
        let result = Err(ConductorError::Read(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        )));

        assert_eq!(exit_code(&result), ExitCode::FAILURE);
    }
}
