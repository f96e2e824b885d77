//! `lz4s`: compress or decompress files in the LZ4 frame format.
//!
//! A thin shell over the library: it resolves paths and the optional
//! dictionary, then pumps the data through [`compress_stream`] or
//! [`decompress_stream`].

mod cli;

use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use lz4_stream::{compress_stream, decompress_stream, Dictionary};

use crate::cli::Args;

/// Conventional suffix for LZ4 frame files.
const LZ4_EXTENSION: &str = "lz4";

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("lz4s: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let dict = match &args.dictionary {
        Some(path) => Some(
            Dictionary::from_file(path)
                .with_context(|| format!("can't load dictionary {}", path.display()))?,
        ),
        None => None,
    };
    if args.verbose {
        if let (Some(dict), Some(path)) = (&dict, &args.dictionary) {
            eprintln!(
                "lz4s: using {} bytes of dictionary from {}",
                dict.len(),
                path.display()
            );
        }
    }

    let input = args.input.as_deref().filter(|p| p.as_os_str() != "-");
    let output = resolve_output(args, input)?;

    // Compressed bytes splattered over an interactive terminal help no one.
    if !args.decompress && output.is_none() && io::stdout().is_terminal() && !args.force {
        bail!("refusing to write compressed data to a terminal; redirect stdout or pass --force");
    }
    if let Some(path) = &output {
        if path.exists() && !args.force {
            bail!("{} already exists; pass --force to overwrite", path.display());
        }
    }
    if args.verbose {
        match &output {
            Some(path) => eprintln!("lz4s: writing to {}", path.display()),
            None => eprintln!("lz4s: writing to standard output"),
        }
    }

    let mut reader: Box<dyn Read> = match input {
        Some(path) => {
            Box::new(File::open(path).with_context(|| format!("can't open {}", path.display()))?)
        }
        None => Box::new(io::stdin().lock()),
    };
    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("can't create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let (read, written) = if args.decompress {
        decompress_stream(&mut reader, &mut writer, dict.as_ref())
    } else {
        compress_stream(&mut reader, &mut writer, args.level.into(), dict.as_ref())
    }
    .with_context(|| match input {
        Some(path) => format!("can't process {}", path.display()),
        None => "can't process standard input".to_string(),
    })?;

    if !args.quiet {
        if args.decompress {
            eprintln!("lz4s: decoded {read} bytes into {written} bytes");
        } else {
            let ratio = if read == 0 {
                100.0
            } else {
                written as f64 * 100.0 / read as f64
            };
            eprintln!("lz4s: compressed {read} bytes into {written} bytes ({ratio:.2}%)");
        }
    }
    Ok(())
}

/// Pick the destination: an explicit OUTPUT (`-` meaning stdout), or a name
/// derived from INPUT by appending or stripping the `.lz4` suffix.
fn resolve_output(args: &Args, input: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = &args.output {
        if path.as_os_str() == "-" {
            return Ok(None);
        }
        return Ok(Some(path.clone()));
    }
    let Some(input) = input else {
        return Ok(None);
    };
    if args.decompress {
        match input.extension() {
            Some(ext) if ext.eq_ignore_ascii_case(LZ4_EXTENSION) => {
                Ok(Some(input.with_extension("")))
            }
            _ => bail!(
                "can't infer an output name for {} (no .{} suffix); pass OUTPUT",
                input.display(),
                LZ4_EXTENSION
            ),
        }
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".");
        name.push(LZ4_EXTENSION);
        Ok(Some(PathBuf::from(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(argv)
    }

    /// Output names follow the lz4 tool conventions in both directions.
    #[test]
    fn output_name_derivation() {
        let compress = args(&["lz4s", "notes.txt"]);
        let out = resolve_output(&compress, Some(Path::new("notes.txt"))).expect("resolve");
        assert_eq!(out, Some(PathBuf::from("notes.txt.lz4")));

        let decompress = args(&["lz4s", "-d", "notes.txt.lz4"]);
        let out = resolve_output(&decompress, Some(Path::new("notes.txt.lz4"))).expect("resolve");
        assert_eq!(out, Some(PathBuf::from("notes.txt")));
    }

    /// Without a .lz4 suffix there is nothing safe to strip.
    #[test]
    fn refuses_to_guess_decompressed_name() {
        let decompress = args(&["lz4s", "-d", "archive.bin"]);
        let err = resolve_output(&decompress, Some(Path::new("archive.bin")))
            .expect_err("no suffix to strip");
        assert!(err.to_string().contains("archive.bin"));
    }

    /// `-` always means the standard streams, never a file called `-`.
    #[test]
    fn dash_selects_stdio() {
        let to_stdout = args(&["lz4s", "input.txt", "-"]);
        let out = resolve_output(&to_stdout, Some(Path::new("input.txt"))).expect("resolve");
        assert_eq!(out, None);
    }
}
