//! Command line front end. Text ciphers print to stdout; the symbolic cipher
//! prints the absolute path of the image it wrote.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glyph_cipher::cipher::{caesar, numeric};
use glyph_cipher::config::resolve_config;
use glyph_cipher::render::compose::Interpolation;
use log::{debug, info};

/// Cipher text with a Caesar shift, numeric codes or glyph images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON settings file (defaults to $GLYPH_CIPHER_CONFIG when set)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shift every letter along the alphabet
    Caesar {
        plain_text: String,

        /// Positions to shift (configured default: 5)
        #[arg(short, long, allow_negative_numbers = true)]
        shift: Option<i64>,
    },
    /// Replace letters with two-digit codes
    Numeric { plain_text: String },
    /// Render letters as glyph images and save a PNG
    Symbolic {
        plain_text: String,

        /// Whitespace glyphs per tab (configured default: 4)
        #[arg(short, long)]
        tab_size: Option<usize>,

        /// Directory containing the glyph images
        #[arg(long)]
        symbols_dir: Option<PathBuf>,

        /// Directory the output image is written to
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Resampling used when glyph heights differ
        #[arg(long)]
        interpolation: Option<Interpolation>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = resolve_config(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!("configuration: {config:?}");

    match cli.command {
        Command::Caesar { plain_text, shift } => {
            let shift = shift.unwrap_or(config.caesar_shift);
            println!("{}", caesar::cipher(&plain_text, shift));
        }
        Command::Numeric { plain_text } => {
            println!("{}", numeric::cipher(&plain_text));
        }
        Command::Symbolic {
            plain_text,
            tab_size,
            symbols_dir,
            output_dir,
            interpolation,
        } => {
            if let Some(tab_size) = tab_size {
                config.tab_size = tab_size;
            }
            if let Some(dir) = symbols_dir {
                config.symbols_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(interpolation) = interpolation {
                config.interpolation = interpolation;
            }

            info!(
                "symbolic cipher: glyphs from {}, tab size {}, {} interpolation",
                config.symbols_dir.display(),
                config.tab_size,
                config.interpolation
            );
            let path = config
                .symbolic_cipher()
                .cipher(&plain_text)
                .context("Symbolic cipher failed")?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
