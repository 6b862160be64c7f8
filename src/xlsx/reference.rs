//! Cell reference column decoding (`"B12"` → column 1).

/// Zero-based column index of a cell reference.
///
/// Only the leading run of ASCII letters is used; the row number and anything
/// after it are ignored. Letters are read as a bijective base-26 numeral
/// (`A` = 1 … `Z` = 26, `AA` = 27) and shifted to zero-based. A reference with
/// no leading letters, including the empty string, maps to column 0.
///
/// # Example
///
/// ```
/// use sheetgrid::xlsx::reference::column_index;
///
/// assert_eq!(column_index("A1"), 0);
/// assert_eq!(column_index("AB7"), 27);
/// assert_eq!(column_index("12"), 0);
/// ```
pub fn column_index(reference: &str) -> usize {
    let number = reference
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .fold(0usize, |acc, b| {
            let digit = (b.to_ascii_uppercase() - b'A' + 1) as usize;
            acc.saturating_mul(26).saturating_add(digit)
        });
    number.saturating_sub(1)
}

/// Column letters for a zero-based column index (`0` → `"A"`, `26` → `"AA"`).
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
