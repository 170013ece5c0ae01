//! Input Checks
//!
//! Lightweight client-side checks on user-entered text. None of these are a
//! security boundary; they keep obviously malformed input out of the UI flow.

/// Characters stripped by [`sanitize_input`]
pub const STRIPPED_CHARACTERS: &[char] = &['<', '>', '"', '\'', ';'];

/// Card numbers are 13 to 19 digits long
const CARD_DIGITS_MIN: usize = 13;
const CARD_DIGITS_MAX: usize = 19;

/// Remove `< > " ' ;` and trim surrounding whitespace
pub fn sanitize_input(input: &str) -> String {
    let stripped: String = input
        .chars()
        .filter(|c| !STRIPPED_CHARACTERS.contains(c))
        .collect();
    stripped.trim().to_string()
}

/// Check the `local@domain.tld` shape
///
/// No whitespace anywhere, exactly one `@`, a non-empty local part, and a
/// domain containing a `.` with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Any dot that is neither the first nor the last character of the domain
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Luhn checksum over a card number
///
/// Whitespace is ignored; anything else that is not a digit fails.
pub fn is_valid_card_number(number: &str) -> bool {
    let digits: Vec<u32> = number
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
        .unwrap_or_default();

    if !(CARD_DIGITS_MIN..=CARD_DIGITS_MAX).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}
