//! Embed color parsing
//!
//! Colors are stored as plain integers in `0..=0xFFFFFF`. User input may be
//! `#RRGGBB`, `RRGGBB`, or a base 10 integer. The branch is picked by length
//! alone: after stripping one leading `#`, exactly six characters are read as
//! hex and anything else as decimal. `"1000000"` is therefore one million,
//! while `"FFFFFFF"` is rejected.

use std::num::IntErrorKind;

use crate::error::{HerokronError, Result};

/// Heroku Lavender, from https://brand.heroku.com
pub const DEFAULT_COLOR: u32 = 0x7673C0;

/// Largest representable color (`#FFFFFF`)
pub const MAX_COLOR: u32 = 0xFFFFFF;

/// Parse user color input into an integer in range
pub fn parse_color(input: &str) -> Result<u32> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    let radix = if digits.chars().count() == 6 { 16 } else { 10 };

    let value = i64::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            HerokronError::ColorOutOfRange(input.to_string())
        }
        _ => HerokronError::InvalidColorFormat(input.to_string()),
    })?;

    if (0..=i64::from(MAX_COLOR)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(HerokronError::ColorOutOfRange(value.to_string()))
    }
}

/// Format a color as `#RRGGBB`
pub fn to_hex(color: u32) -> String {
    format!("#{:06X}", color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_in_every_format() {
        assert_eq!(parse_color("#FFFFFF").unwrap(), 16777215);
        assert_eq!(parse_color("FFFFFF").unwrap(), 16777215);
        assert_eq!(parse_color("16777215").unwrap(), 16777215);
    }

    #[test]
    fn test_lowercase_hex() {
        assert_eq!(parse_color("#7673c0").unwrap(), DEFAULT_COLOR);
    }

    #[test]
    fn test_seven_digits_is_decimal() {
        assert_eq!(parse_color("1000000").unwrap(), 1_000_000);
    }

    #[test]
    fn test_seven_hex_digits_rejected() {
        assert!(matches!(
            parse_color("FFFFFFF"),
            Err(HerokronError::InvalidColorFormat(_))
        ));
        assert!(matches!(
            parse_color("#FFFFFFF"),
            Err(HerokronError::InvalidColorFormat(_))
        ));
    }

    #[test]
    fn test_six_digit_decimal_is_read_as_hex() {
        // "100000" has six characters, so it is hex 0x100000
        assert_eq!(parse_color("100000").unwrap(), 0x100000);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            parse_color("16777216"),
            Err(HerokronError::ColorOutOfRange(_))
        ));
        assert!(matches!(
            parse_color("-1"),
            Err(HerokronError::ColorOutOfRange(_))
        ));
        assert!(matches!(
            parse_color("99999999999999999999999"),
            Err(HerokronError::ColorOutOfRange(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            parse_color("lavender"),
            Err(HerokronError::InvalidColorFormat(_))
        ));
        assert!(matches!(
            parse_color(""),
            Err(HerokronError::InvalidColorFormat(_))
        ));
        assert!(matches!(
            parse_color("#GGGGGG"),
            Err(HerokronError::InvalidColorFormat(_))
        ));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(DEFAULT_COLOR), "#7673C0");
        assert_eq!(to_hex(0), "#000000");
    }
}
