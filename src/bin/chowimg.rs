use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chowimg::{ByteBuffer, Whence, decode, decode_rgba};
use clap::{ArgAction, Parser};

/// Output buffer size used when the decoded size is unknown.
const DEFAULT_INITIAL_CAPACITY: usize = 0xFFFF;

#[derive(Parser, Debug)]
#[command(name = "chowimg")]
#[command(about = "Decode a chowimg hunk stream into raw bytes", long_about = None)]
struct Cli {
    /// File containing raw compressed data
    input: PathBuf,

    /// Where to write the decoded bytes
    output: PathBuf,

    /// Initial size of the output buffer; it grows as needed
    #[arg(long, default_value_t = DEFAULT_INITIAL_CAPACITY, conflicts_with = "width")]
    initial_capacity: usize,

    /// Image width; the output must hold exactly width * height * 4 bytes
    #[arg(long, requires = "height")]
    width: Option<u16>,

    /// Image height
    #[arg(long, requires = "width")]
    height: Option<u16>,

    /// Offset of the first hunk in the input file
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Offset where the hunk stream ends (defaults to the end of the file)
    #[arg(long)]
    end: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let data = fs::read(&cli.input)
        .with_context(|| format!("failed to read input file {}", cli.input.display()))?;

    let end = cli.end.unwrap_or(data.len());
    if cli.offset > end || end > data.len() {
        bail!(
            "invalid range {:#x}..{:#x} for a {}-byte input",
            cli.offset,
            end,
            data.len()
        );
    }

    let decoded = match (cli.width, cli.height) {
        (Some(width), Some(height)) => decode_rgba(&data[cli.offset..end], width, height)
            .with_context(|| {
                format!(
                    "chowimg decompression failure for image ({width}x{height}), offset={:#x}",
                    cli.offset
                )
            })?,
        _ => {
            let mut input = ByteBuffer::from_source(&data);
            input.seek(cli.offset, Whence::Start)?;
            let mut output = ByteBuffer::with_capacity(cli.initial_capacity);
            decode(&mut output, &mut input, end).with_context(|| {
                format!("chowimg decompression failure, offset={:#x}", cli.offset)
            })?;
            output.into_vec()
        }
    };

    fs::write(&cli.output, &decoded)
        .with_context(|| format!("failed to write output file {}", cli.output.display()))?;

    log::info!("Wrote {} bytes to {}", decoded.len(), cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, DEFAULT_INITIAL_CAPACITY};
    use clap::{CommandFactory, Parser, error::ErrorKind};

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["chowimg", "in.bin", "out.bin"]).unwrap();
        assert_eq!(cli.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(cli.offset, 0);
        assert_eq!(cli.end, None);
        assert_eq!((cli.width, cli.height), (None, None));
    }

    #[test]
    fn test_dimensions_come_in_pairs() {
        let err = Cli::try_parse_from(["chowimg", "in.bin", "out.bin", "--width", "4"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_initial_capacity_conflicts_with_image_mode() {
        let err = Cli::try_parse_from([
            "chowimg",
            "in.bin",
            "out.bin",
            "--width",
            "4",
            "--height",
            "4",
            "--initial-capacity",
            "1024",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["chowimg", "in.bin", "out.bin", "--width", "4", "--height", "4"])
            .unwrap();
        assert_eq!((cli.width, cli.height), (Some(4), Some(4)));
    }
}
