//! Image composition primitives used to assemble glyph tiles.
//! Horizontal joins shrink every tile to the shortest height so nothing is
//! upscaled; vertical joins pad lines on the right so each line keeps its own
//! height.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("cannot concatenate an empty image sequence ({0})")]
    EmptySequence(&'static str),
    #[error("image {index} has no pixels ({width}x{height})")]
    EmptyImage { index: usize, width: u32, height: u32 },
}

/// Rejects any image with a zero dimension; such a tile has no edge column to
/// replicate and no aspect ratio to keep.
fn ensure_pixels<I: Borrow<RgbImage>>(images: &[I]) -> Result<(), CompositionError> {
    match images
        .iter()
        .map(|image| image.borrow().dimensions())
        .enumerate()
        .find(|(_, (width, height))| *width == 0 || *height == 0)
    {
        Some((index, (width, height))) => Err(CompositionError::EmptyImage {
            index,
            width,
            height,
        }),
        None => Ok(()),
    }
}

/// Resampling filter applied when a tile is resized during a horizontal join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    Linear,
    #[default]
    Cubic,
    Gaussian,
    Lanczos3,
}

impl Interpolation {
    fn filter(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Linear => FilterType::Triangle,
            Interpolation::Cubic => FilterType::CatmullRom,
            Interpolation::Gaussian => FilterType::Gaussian,
            Interpolation::Lanczos3 => FilterType::Lanczos3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Linear => "linear",
            Interpolation::Cubic => "cubic",
            Interpolation::Gaussian => "gaussian",
            Interpolation::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Interpolation::Nearest),
            "linear" => Ok(Interpolation::Linear),
            "cubic" => Ok(Interpolation::Cubic),
            "gaussian" => Ok(Interpolation::Gaussian),
            "lanczos3" => Ok(Interpolation::Lanczos3),
            other => Err(format!(
                "unknown interpolation '{other}'; expected nearest, linear, cubic, gaussian or lanczos3"
            )),
        }
    }
}

/// Width a tile gets when scaled to `target_height` with its aspect ratio kept.
fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    let scaled = (f64::from(width) * f64::from(target_height) / f64::from(height)).round();
    (scaled as u32).max(1)
}

/// Joins `images` left to right after resizing each one to the smallest height
/// in the sequence.
pub fn concat_horizontal<I: Borrow<RgbImage>>(
    images: &[I],
    interpolation: Interpolation,
) -> Result<RgbImage, CompositionError> {
    let height = images
        .iter()
        .map(|image| image.borrow().height())
        .min()
        .ok_or(CompositionError::EmptySequence("horizontal"))?;
    ensure_pixels(images)?;

    let resized: Vec<Option<RgbImage>> = images
        .iter()
        .map(|image| {
            let image = image.borrow();
            if image.height() == height {
                None
            } else {
                let width = scaled_width(image.width(), image.height(), height);
                Some(imageops::resize(image, width, height, interpolation.filter()))
            }
        })
        .collect();
    let tiles: Vec<&RgbImage> = images
        .iter()
        .zip(&resized)
        .map(|(original, scaled)| scaled.as_ref().unwrap_or_else(|| original.borrow()))
        .collect();

    let width = tiles.iter().map(|tile| tile.width()).sum();
    let mut output = RgbImage::new(width, height);
    let mut x = 0i64;
    for tile in tiles {
        imageops::replace(&mut output, tile, x, 0);
        x += i64::from(tile.width());
    }
    Ok(output)
}

/// Stacks `images` top to bottom after padding each one on the right edge to
/// the widest width in the sequence.
pub fn concat_vertical<I: Borrow<RgbImage>>(images: &[I]) -> Result<RgbImage, CompositionError> {
    let width = images
        .iter()
        .map(|image| image.borrow().width())
        .max()
        .ok_or(CompositionError::EmptySequence("vertical"))?;
    ensure_pixels(images)?;
    let height = images.iter().map(|image| image.borrow().height()).sum();

    let mut output = RgbImage::new(width, height);
    let mut y = 0u32;
    for image in images {
        let image = image.borrow();
        pad_right_into(&mut output, image, y);
        y += image.height();
    }
    Ok(output)
}

/// Copies `image` into `output` at row `y`, filling the columns right of it by
/// repeating its rightmost column.
fn pad_right_into(output: &mut RgbImage, image: &RgbImage, y: u32) {
    let last_column = image.width().saturating_sub(1);
    for row in 0..image.height() {
        for x in 0..output.width() {
            output.put_pixel(x, y + row, *image.get_pixel(x.min(last_column), row));
        }
    }
}
