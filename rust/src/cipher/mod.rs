//! The three cipher modes. Caesar and numeric are plain text transforms; the
//! symbolic cipher renders glyph images through the `render` module.

pub mod caesar;
pub mod numeric;
pub mod symbolic;

/// Lowercases `c` when that yields exactly one character, otherwise returns
/// it unchanged.
pub(crate) fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}
