//! Letter-shift cipher. Only ASCII letters move; everything else is copied
//! through so punctuation and layout survive.

pub const DEFAULT_SHIFT: i64 = 5;

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Rotation table: `table[i]` is the letter that `ALPHABET[i]` becomes.
fn rotation_table(shift: i64) -> [u8; 26] {
    let offset = shift.rem_euclid(26) as usize;
    let mut table = [0u8; 26];
    for (index, slot) in table.iter_mut().enumerate() {
        *slot = ALPHABET[(index + offset) % 26];
    }
    table
}

/// Shifts every ASCII letter of `plain_text` by `shift` positions, keeping its
/// case.
pub fn cipher(plain_text: &str, shift: i64) -> String {
    let table = rotation_table(shift);
    plain_text
        .chars()
        .map(|c| {
            if !c.is_ascii_alphabetic() {
                return c;
            }
            let shifted = table[(c.to_ascii_lowercase() as u8 - b'a') as usize] as char;
            if c.is_ascii_uppercase() {
                shifted.to_ascii_uppercase()
            } else {
                shifted
            }
        })
        .collect()
}
