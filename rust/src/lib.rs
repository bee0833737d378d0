//! Toy text ciphers: Caesar shift, numeric digit pairs, and a symbolic cipher
//! that draws each character as a glyph image and composes them into a PNG.

pub mod cipher;
pub mod config;
pub mod render;
