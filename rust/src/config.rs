//! Configuration loader. Settings live in an optional JSON file; every key has
//! a default so an empty object (or no file at all) is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cipher::caesar::DEFAULT_SHIFT;
use crate::cipher::symbolic::{SymbolicCipher, DEFAULT_OUTPUT_PREFIX, DEFAULT_TAB_SIZE};
use crate::render::compose::Interpolation;
use crate::render::glyphs::{GlyphStore, DEFAULT_EXTENSION, DEFAULT_WHITESPACE_NAME};

/// Environment variable consulted for the config path when none is given.
pub const CONFIG_ENV_VAR: &str = "GLYPH_CIPHER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(String),
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CipherConfig {
    /// Directory holding `<letter>.<ext>` and the whitespace glyph.
    pub symbols_dir: PathBuf,
    pub glyph_extension: String,
    /// File stem of the whitespace glyph.
    pub whitespace_glyph: String,
    /// Where symbolic output images are written.
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub tab_size: usize,
    pub caesar_shift: i64,
    pub interpolation: Interpolation,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            symbols_dir: PathBuf::from("symbols"),
            glyph_extension: DEFAULT_EXTENSION.to_string(),
            whitespace_glyph: DEFAULT_WHITESPACE_NAME.to_string(),
            output_dir: PathBuf::from("."),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            tab_size: DEFAULT_TAB_SIZE,
            caesar_shift: DEFAULT_SHIFT,
            interpolation: Interpolation::default(),
        }
    }
}

impl CipherConfig {
    pub fn glyph_store(&self) -> GlyphStore {
        GlyphStore::new(&self.symbols_dir)
            .with_extension(&self.glyph_extension)
            .with_whitespace_name(&self.whitespace_glyph)
    }

    pub fn symbolic_cipher(&self) -> SymbolicCipher {
        SymbolicCipher::new(self.glyph_store())
            .with_tab_size(self.tab_size)
            .with_interpolation(self.interpolation)
            .with_output_dir(&self.output_dir)
            .with_output_prefix(&self.output_prefix)
    }
}

/// Reads and parses a JSON configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<CipherConfig, ConfigError> {
    let path = path.as_ref();
    let raw_json = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))
}

/// Loads the explicit path if given, else the path named by
/// [`CONFIG_ENV_VAR`], else falls back to defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CipherConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_config(PathBuf::from(path)),
        None => Ok(CipherConfig::default()),
    }
}
