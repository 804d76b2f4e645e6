//! Roman numeral conversion
//!
//! Table numbering in academic papers commonly uses Roman numerals
//! ("Table IV"). Conversion feeds the final sort; absence of a valid
//! numeral is an expected case, so the converter returns an `Option`
//! rather than an error.

/// Convert a Roman numeral to an integer.
///
/// Accepts the symbols I, V, X, L, C, D, M case-insensitively and
/// evaluates with subtractive notation: a symbol smaller than its
/// successor is subtracted instead of added. No canonical-form check is
/// performed, so non-standard spellings seen in real documents still
/// evaluate ("IIII" is 4). Returns `None` for the empty string or any
/// string containing other characters.
pub fn roman_to_int(input: &str) -> Option<u32> {
    if input.is_empty() {
        return None;
    }

    let values = input
        .chars()
        .map(symbol_value)
        .collect::<Option<Vec<u32>>>()?;

    let mut total: i64 = 0;
    for (i, &value) in values.iter().enumerate() {
        let next = values.get(i + 1).copied().unwrap_or(0);
        if value < next {
            total -= i64::from(value);
        } else {
            total += i64::from(value);
        }
    }

    Some(total as u32)
}

fn symbol_value(symbol: char) -> Option<u32> {
    match symbol.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}
