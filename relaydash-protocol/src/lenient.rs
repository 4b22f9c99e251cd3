//! Best-effort numeric parsing
//!
//! Telemetry producers are not validated, so numbers are read the way a C
//! `strtol` would read them: skip leading whitespace, accept an optional sign,
//! consume digits until the first byte that is not one, and yield 0 when no
//! digit was found. Parsing never fails.

/// Parse the leading decimal integer of `text`
///
/// Saturates at the `i64` bounds instead of overflowing.
pub fn parse_decimal(text: &[u8]) -> i64 {
    let (negative, digits) = split_sign(skip_whitespace(text));

    let mut value: i64 = 0;
    for &byte in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = (byte - b'0') as i64;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Parse the leading decimal integer of `text`, clamped into `i32`
///
/// `"42.7 %"` reads as 42 and `"n/a"` reads as 0.
pub fn parse_i32(text: &str) -> i32 {
    parse_decimal(text.as_bytes()).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Parse the leading hexadecimal integer of `text`
///
/// An optional `0x`/`0X` prefix is accepted. A leading `-` negates the value
/// with two's complement wrap-around, and overflow saturates at `u32::MAX`.
pub fn parse_hex(text: &str) -> u32 {
    let (negative, rest) = split_sign(skip_whitespace(text.as_bytes()));
    let rest = match rest {
        [b'0', b'x' | b'X', tail @ ..] if tail.first().is_some_and(u8::is_ascii_hexdigit) => tail,
        _ => rest,
    };

    let mut value: u32 = 0;
    for &byte in rest.iter().take_while(|b| b.is_ascii_hexdigit()) {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            _ => byte - b'A' + 10,
        };
        value = value.saturating_mul(16).saturating_add(digit as u32);
    }

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

fn skip_whitespace(text: &[u8]) -> &[u8] {
    let start = text
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(text.len());
    &text[start..]
}

fn split_sign(text: &[u8]) -> (bool, &[u8]) {
    match text {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, text),
    }
}
