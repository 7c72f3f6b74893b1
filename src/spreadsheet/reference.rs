//! Conversions between Excel-style A1 references and 0-based indexes.

/// Converts 0-based row and column indexes to an A1-style reference (e.g. (2, 1) -> "B3").
pub fn index_to_reference(row: usize, col: usize) -> String {
    let mut reference = col_to_letters(col);
    reference.push_str(&(row + 1).to_string());
    reference
}

/// Converts a 0-based column index to column letters (0 -> "A", 27 -> "AB").
pub fn col_to_letters(col: usize) -> String {
    let mut column = col + 1;
    let mut letters = String::new();
    while column > 0 {
        column -= 1;
        let digit = char::from(b'A' + (column % 26) as u8);
        column /= 26;
        letters.insert(0, digit);
    }
    letters
}

/// Converts column letters to a 0-based column index ("A" -> 0, "AB" -> 27).
/// Returns None for empty or non-alphabetic input.
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for char in letters.chars() {
        if !char.is_ascii_alphabetic() {
            return None;
        }
        let digit = (char.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

/// Converts a 1-based row number string to a 0-based row index ("1" -> 0).
/// Returns None for empty input, zero or anything that is not a number.
pub fn row_to_index(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok().filter(|row| *row > 0).map(|row| row - 1)
}
