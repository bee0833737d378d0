//! Digit-pair substitution cipher. The table repeats some codes (`k`/`q` are
//! both 13, `g`/`v` both 22), so the output cannot always be reversed.

use super::fold_case;

/// Two-digit code for a letter, matched case-insensitively.
fn code(letter: char) -> Option<&'static str> {
    let code = match letter {
        'a' => "11",
        'b' => "21",
        'c' => "31",
        'd' => "41",
        'e' => "51",
        'f' => "12",
        'g' => "22",
        'h' => "32",
        'i' => "42",
        'j' => "52",
        'k' => "13",
        'l' => "23",
        'm' => "33",
        'n' => "43",
        'ñ' => "53",
        'o' => "14",
        'p' => "24",
        'q' => "13",
        'r' => "34",
        's' => "44",
        't' => "54",
        'u' => "15",
        'v' => "22",
        'w' => "25",
        'x' => "35",
        'y' => "45",
        'z' => "55",
        _ => return None,
    };
    Some(code)
}

fn cipher_line(line: &str) -> String {
    line.chars()
        .map(|c| match code(fold_case(c)) {
            Some(code) => code.to_string(),
            None => c.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces each letter with its code, separating characters within a line by
/// a single space.
pub fn cipher(plain_text: &str) -> String {
    plain_text
        .split('\n')
        .map(cipher_line)
        .collect::<Vec<_>>()
        .join("\n")
}
