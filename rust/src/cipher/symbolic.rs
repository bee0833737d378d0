//! Symbolic cipher: every character becomes a glyph tile and the tiles are
//! composed into a single image. Input is validated in full before any glyph
//! is loaded, so a rejected message never produces an output file.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{debug, info, warn};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use super::fold_case;
use crate::render::compose::{
    concat_horizontal, concat_vertical, CompositionError, Interpolation,
};
use crate::render::glyphs::{GlyphError, GlyphMap, GlyphStore};

pub const DEFAULT_TAB_SIZE: usize = 4;
pub const DEFAULT_OUTPUT_PREFIX: &str = "encrypted_message_";
pub const SUPPORTED_CHARACTERS: &str = "a-z (any case), space, tab, newline, carriage return";

const OUTPUT_EXTENSION: &str = "png";

#[derive(Debug, Error)]
pub enum SymbolicError {
    #[error("unsupported character: {character:?}. Valid characters are: {supported}")]
    UnsupportedCharacter {
        character: char,
        supported: &'static str,
    },
    #[error(transparent)]
    Glyph(#[from] GlyphError),
    #[error(transparent)]
    Composition(#[from] CompositionError),
    #[error("could not write {}: {reason}", .path.display())]
    Output { path: PathBuf, reason: String },
}

fn is_supported(c: char) -> bool {
    matches!(fold_case(c), 'a'..='z' | ' ' | '\t' | '\n' | '\r')
}

/// Random RFC 4122 version 4 identifier.
fn unique_id() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

/// Renders text as glyph images and writes the result to disk.
#[derive(Debug, Clone)]
pub struct SymbolicCipher {
    glyphs: GlyphStore,
    tab_size: usize,
    interpolation: Interpolation,
    output_dir: PathBuf,
    output_prefix: String,
}

impl SymbolicCipher {
    pub fn new(glyphs: GlyphStore) -> Self {
        Self {
            glyphs,
            tab_size: DEFAULT_TAB_SIZE,
            interpolation: Interpolation::default(),
            output_dir: PathBuf::from("."),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }

    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Rejects the first character that has no glyph and is not a layout
    /// control (tab, newline, carriage return).
    pub fn validate(&self, plain_text: &str) -> Result<(), SymbolicError> {
        match plain_text.chars().find(|&c| !is_supported(c)) {
            Some(character) => {
                warn!("rejecting input: unsupported character {character:?}");
                Err(SymbolicError::UnsupportedCharacter {
                    character,
                    supported: SUPPORTED_CHARACTERS,
                })
            }
            None => Ok(()),
        }
    }

    /// Validates and composes `plain_text` without touching the filesystem
    /// beyond reading glyphs.
    pub fn render(&self, plain_text: &str) -> Result<RgbImage, SymbolicError> {
        self.validate(plain_text)?;

        let text = plain_text.replace('\r', "");
        debug!("loading glyphs from {}", self.glyphs.root().display());
        let glyphs = self.glyphs.build_map()?;
        let tab = self.tab_tile(&glyphs)?;

        let lines = text
            .split('\n')
            .enumerate()
            .map(|(index, line)| {
                let image = self.render_line(line, &glyphs, tab.as_ref())?;
                debug!(
                    "line {index}: {} chars -> {}x{}",
                    line.chars().count(),
                    image.width(),
                    image.height()
                );
                Ok(image)
            })
            .collect::<Result<Vec<_>, SymbolicError>>()?;

        Ok(concat_vertical(&lines)?)
    }

    /// Renders `plain_text` and saves it as a uniquely named PNG in the output
    /// directory, returning the resolved absolute path of the new file.
    pub fn cipher(&self, plain_text: &str) -> Result<PathBuf, SymbolicError> {
        let image = self.render(plain_text)?;
        let path = self.output_path()?;
        image.save(&path).map_err(|e| SymbolicError::Output {
            path: path.clone(),
            reason: format!("{e}"),
        })?;
        let path = fs::canonicalize(&path).map_err(|e| SymbolicError::Output {
            path: path.clone(),
            reason: format!("{e}"),
        })?;
        info!(
            "wrote {}x{} symbolic image to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(path)
    }

    fn output_path(&self) -> Result<PathBuf, SymbolicError> {
        let file_name = format!("{}{}.{OUTPUT_EXTENSION}", self.output_prefix, unique_id());
        let path = self.output_dir.join(file_name);
        std::path::absolute(&path).map_err(|e| SymbolicError::Output {
            path,
            reason: format!("{e}"),
        })
    }

    /// `tab_size` whitespace glyphs joined together, or `None` for a zero
    /// tab size.
    fn tab_tile(&self, glyphs: &GlyphMap) -> Result<Option<RgbImage>, SymbolicError> {
        if self.tab_size == 0 {
            return Ok(None);
        }
        let units = vec![glyphs.whitespace(); self.tab_size];
        Ok(Some(concat_horizontal(&units, self.interpolation)?))
    }

    fn render_line(
        &self,
        line: &str,
        glyphs: &GlyphMap,
        tab: Option<&RgbImage>,
    ) -> Result<RgbImage, SymbolicError> {
        let mut tiles: Vec<&RgbImage> = Vec::with_capacity(line.len());
        for c in line.chars() {
            if c == '\t' {
                tiles.extend(tab);
                continue;
            }
            tiles.push(glyphs.get(fold_case(c)).ok_or(GlyphError::NoGlyph(c))?);
        }

        // Empty lines (and lines made only of zero-width tabs) keep one
        // whitespace tile of height.
        if tiles.is_empty() {
            return Ok(glyphs.whitespace().clone());
        }
        Ok(concat_horizontal(&tiles, self.interpolation)?)
    }
}
