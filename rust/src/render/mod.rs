//! Image side of the symbolic cipher: glyph loading and tile composition.

pub mod compose;
pub mod glyphs;
