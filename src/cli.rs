//! Command-line definition for the `lz4s` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use lz4_stream::CompressionLevel;

/// Compress or decompress files in the LZ4 frame format.
#[derive(Parser, Debug)]
#[command(name = "lz4s", version, about)]
pub struct Args {
    /// Decompress INPUT instead of compressing it.
    #[arg(short, long)]
    pub decompress: bool,

    /// Compression effort preset.
    #[arg(long, value_enum, default_value_t = LevelArg::Balanced)]
    pub level: LevelArg,

    /// Seed the codec with the last 64 KiB of FILE (both directions).
    #[arg(short = 'D', long = "dictionary", value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Overwrite the output file if it already exists.
    #[arg(short, long)]
    pub force: bool,

    /// Suppress the summary line.
    #[arg(short, long)]
    pub quiet: bool,

    /// Report extra detail on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Input path, or `-` for stdin.
    pub input: Option<PathBuf>,

    /// Output path, or `-` for stdout [default: INPUT.lz4, or INPUT minus .lz4 with -d].
    pub output: Option<PathBuf>,
}

/// Effort presets accepted by `--level`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelArg {
    Default,
    Fastest,
    Balanced,
    Best,
}

impl From<LevelArg> for CompressionLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Default => CompressionLevel::Default,
            LevelArg::Fastest => CompressionLevel::Fastest,
            LevelArg::Balanced => CompressionLevel::Balanced,
            LevelArg::Best => CompressionLevel::Best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    /// Clap's own consistency checks: duplicate shorts, bad conflicts, etc.
    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    /// Typical invocations parse the way the help text promises.
    #[test]
    fn parses_typical_invocations() {
        let args = Args::parse_from(["lz4s", "-d", "archive.lz4"]);
        assert!(args.decompress);
        assert_eq!(args.level, LevelArg::Balanced);
        assert_eq!(args.input.as_deref(), Some(Path::new("archive.lz4")));
        assert_eq!(args.output, None);

        let args = Args::parse_from(["lz4s", "--level", "best", "-D", "dict.bin", "in", "out"]);
        assert!(!args.decompress);
        assert_eq!(args.level, LevelArg::Best);
        assert_eq!(args.dictionary.as_deref(), Some(Path::new("dict.bin")));
        assert_eq!(args.input.as_deref(), Some(Path::new("in")));
        assert_eq!(args.output.as_deref(), Some(Path::new("out")));
    }
}
