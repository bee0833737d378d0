//! Glyph loading for the symbolic cipher. Every letter and the whitespace tile
//! live as individual image files in one directory; the store reads them
//! eagerly so rendering never starts with a missing glyph.

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::debug;
use thiserror::Error;

pub const DEFAULT_EXTENSION: &str = "png";
pub const DEFAULT_WHITESPACE_NAME: &str = "whitespace";

#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("glyph resource not found: {}: {reason}", .path.display())]
    NotFound { path: PathBuf, reason: String },
    #[error("no glyph exists for character {0:?}")]
    NoGlyph(char),
}

/// Directory-backed source of glyph images.
#[derive(Debug, Clone)]
pub struct GlyphStore {
    root: PathBuf,
    extension: String,
    whitespace_name: String,
}

impl GlyphStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            whitespace_name: DEFAULT_WHITESPACE_NAME.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_whitespace_name(mut self, name: impl Into<String>) -> Self {
        self.whitespace_name = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the resource backing `character`, or `None` when the character
    /// has no glyph slot.
    pub fn resource_path(&self, character: char) -> Option<PathBuf> {
        let stem = match character.to_ascii_lowercase() {
            ' ' => self.whitespace_name.clone(),
            letter @ 'a'..='z' => letter.to_string(),
            _ => return None,
        };
        Some(self.root.join(format!("{stem}.{}", self.extension)))
    }

    /// Loads the glyph for a letter or the space character as an RGB image.
    pub fn load(&self, character: char) -> Result<RgbImage, GlyphError> {
        let path = self
            .resource_path(character)
            .ok_or(GlyphError::NoGlyph(character))?;
        let image = image::open(&path)
            .map_err(|e| GlyphError::NotFound {
                path: path.clone(),
                reason: format!("{e}"),
            })?
            .to_rgb8();
        if image.width() == 0 || image.height() == 0 {
            return Err(GlyphError::NotFound {
                path,
                reason: "image has no pixels".to_string(),
            });
        }
        debug!(
            "loaded glyph {:?} from {} ({}x{})",
            character,
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Loads all 26 letters and the whitespace glyph, failing on the first
    /// resource that cannot be read.
    pub fn build_map(&self) -> Result<GlyphMap, GlyphError> {
        let letters = ('a'..='z')
            .map(|letter| self.load(letter))
            .collect::<Result<Vec<_>, _>>()?;
        let whitespace = self.load(' ')?;
        Ok(GlyphMap { letters, whitespace })
    }
}

/// Fully populated character to glyph mapping.
#[derive(Debug, Clone)]
pub struct GlyphMap {
    // Indexed by `letter - 'a'`.
    letters: Vec<RgbImage>,
    whitespace: RgbImage,
}

impl GlyphMap {
    /// Glyph for a letter (either case) or space.
    pub fn get(&self, character: char) -> Option<&RgbImage> {
        match character.to_ascii_lowercase() {
            ' ' => Some(&self.whitespace),
            letter @ 'a'..='z' => self.letters.get(letter as usize - 'a' as usize),
            _ => None,
        }
    }

    pub fn whitespace(&self) -> &RgbImage {
        &self.whitespace
    }
}

#[cfg(test)]
mod tests {
    use super::{GlyphError, GlyphStore};
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_glyph(dir: &TempDir, stem: &str, width: u32, shade: u8) {
        RgbImage::from_pixel(width, 8, Rgb([shade, shade, shade]))
            .save(dir.path().join(format!("{stem}.png")))
            .expect("glyph fixture should save");
    }

    fn full_set() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        for (index, letter) in ('a'..='z').enumerate() {
            write_glyph(&dir, &letter.to_string(), index as u32 + 1, index as u8);
        }
        write_glyph(&dir, "whitespace", 5, 255);
        dir
    }

    #[test]
    fn loads_every_glyph() {
        let dir = full_set();
        let map = GlyphStore::new(dir.path()).build_map().expect("map should build");
        assert_eq!(map.get('a').unwrap().width(), 1);
        assert_eq!(map.get('z').unwrap().width(), 26);
        assert_eq!(map.get('Q').unwrap().width(), map.get('q').unwrap().width());
        assert_eq!(map.get(' ').unwrap().width(), 5);
        assert_eq!(*map.whitespace().get_pixel(0, 0), Rgb([255, 255, 255]));
        assert!(map.get('\t').is_none());
    }

    #[test]
    fn missing_glyph_fails_whole_map() {
        let dir = full_set();
        std::fs::remove_file(dir.path().join("m.png")).unwrap();
        let err = GlyphStore::new(dir.path()).build_map().unwrap_err();
        match err {
            GlyphError::NotFound { path, .. } => assert!(path.ends_with("m.png")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_whitespace_glyph_is_reported() {
        let dir = full_set();
        std::fs::remove_file(dir.path().join("whitespace.png")).unwrap();
        let err = GlyphStore::new(dir.path()).load(' ').unwrap_err();
        assert!(format!("{err}").contains("whitespace.png"));
    }

    #[test]
    fn unreadable_glyph_is_not_found() {
        let dir = full_set();
        std::fs::write(dir.path().join("b.png"), b"not a png").unwrap();
        let err = GlyphStore::new(dir.path()).load('b').unwrap_err();
        assert!(matches!(err, GlyphError::NotFound { .. }));
    }

    #[test]
    fn characters_without_slots_are_rejected() {
        let store = GlyphStore::new("/nonexistent");
        assert!(store.resource_path('7').is_none());
        assert!(matches!(store.load('7'), Err(GlyphError::NoGlyph('7'))));
    }

    #[test]
    fn custom_layout_is_respected() {
        let store = GlyphStore::new("/glyphs")
            .with_extension("bmp")
            .with_whitespace_name("space");
        assert_eq!(store.resource_path(' ').unwrap(), std::path::Path::new("/glyphs/space.bmp"));
        assert_eq!(store.resource_path('K').unwrap(), std::path::Path::new("/glyphs/k.bmp"));
    }

    #[test]
    fn loads_bmp_glyph_sets() {
        let dir = TempDir::new().expect("temp dir");
        for letter in 'a'..='z' {
            RgbImage::from_pixel(4, 6, Rgb([10, 20, 30]))
                .save(dir.path().join(format!("{letter}.bmp")))
                .expect("bmp fixture should save");
        }
        RgbImage::from_pixel(2, 6, Rgb([255, 255, 255]))
            .save(dir.path().join("space.bmp"))
            .expect("bmp fixture should save");

        let map = GlyphStore::new(dir.path())
            .with_extension("bmp")
            .with_whitespace_name("space")
            .build_map()
            .expect("bmp glyphs should load");
        assert_eq!(map.get('k').unwrap().dimensions(), (4, 6));
        assert_eq!(*map.get('k').unwrap().get_pixel(3, 5), Rgb([10, 20, 30]));
        assert_eq!(map.whitespace().dimensions(), (2, 6));
    }
}
