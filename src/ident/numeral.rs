//! Arbitrary-precision conversion between decimal and hexadecimal numerals.
//!
//! Card UIDs routinely exceed 64 bits once a reader prepends manufacturer
//! bytes, so conversion works digit-by-digit on the numeral strings instead
//! of going through a fixed-width integer.

use serde::Serialize;
use thiserror::Error;

/// Failure to interpret a string as a numeral in the expected base.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumeralError {
    /// Nothing left to convert (e.g. the input was only separators).
    #[error("numeral has no digits")]
    Empty,

    /// A character outside the base's alphabet.
    #[error("invalid base-{radix} digit '{found}' at position {position}")]
    InvalidDigit {
        found: char,
        position: usize,
        radix: u32,
    },
}

/// Converts a decimal numeral to uppercase hexadecimal without padding.
///
/// Leading zeros in the input are not preserved: `"0042"` becomes `"2A"`.
pub fn decimal_to_hex(decimal: &str) -> Result<String, NumeralError> {
    let digits = parse_digits(decimal, 10)?;
    Ok(render(&convert_radix(&digits, 10, 16)))
}

/// Converts a hexadecimal numeral (either case) to decimal.
pub fn hex_to_decimal(hex: &str) -> Result<String, NumeralError> {
    let digits = parse_digits(hex, 16)?;
    Ok(render(&convert_radix(&digits, 16, 10)))
}

fn parse_digits(numeral: &str, radix: u32) -> Result<Vec<u8>, NumeralError> {
    if numeral.is_empty() {
        return Err(NumeralError::Empty);
    }

    numeral
        .chars()
        .enumerate()
        .map(|(position, ch)| {
            ch.to_digit(radix)
                .map(|d| d as u8)
                .ok_or(NumeralError::InvalidDigit {
                    found: ch,
                    position,
                    radix,
                })
        })
        .collect()
}

/// Schoolbook long division: repeatedly divide the source digits by `to`,
/// collecting remainders as the target digits (most significant first).
fn convert_radix(digits: &[u8], from: u32, to: u32) -> Vec<u8> {
    let mut number = digits.to_vec();
    let mut out = Vec::new();

    while !number.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(number.len());

        for &digit in &number {
            let acc = remainder * from + u32::from(digit);
            let q = acc / to;
            remainder = acc % to;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q as u8);
            }
        }

        out.push(remainder as u8);
        number = quotient;
    }

    if out.is_empty() {
        out.push(0);
    }
    out.reverse();
    out
}

fn render(digits: &[u8]) -> String {
    digits
        .iter()
        .filter_map(|&d| char::from_digit(u32::from(d), 16))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_to_hex_four_byte_uid() {
        assert_eq!(decimal_to_hex("2686677508").unwrap(), "A0237204");
    }

    #[test]
    fn test_hex_to_decimal_seven_byte_uid() {
        assert_eq!(hex_to_decimal("04AE7EA6682681").unwrap(), "1317758887798401");
        assert_eq!(hex_to_decimal("04ae7ea6682681").unwrap(), "1317758887798401");
    }

    #[test]
    fn test_zero_and_leading_zeros() {
        assert_eq!(decimal_to_hex("0").unwrap(), "0");
        assert_eq!(decimal_to_hex("0000").unwrap(), "0");
        assert_eq!(decimal_to_hex("0042").unwrap(), "2A");
        assert_eq!(hex_to_decimal("00FF").unwrap(), "255");
    }

    #[test]
    fn test_beyond_u128() {
        let decimal = "340282366920938463463374607431768211456"; // 2^128
        let hex = decimal_to_hex(decimal).unwrap();
        assert_eq!(hex, format!("1{}", "0".repeat(32)));
        assert_eq!(hex_to_decimal(&hex).unwrap(), decimal);
    }

    #[test]
    fn test_rejects_empty_and_bad_digits() {
        assert_eq!(decimal_to_hex(""), Err(NumeralError::Empty));
        assert_eq!(
            decimal_to_hex("12a"),
            Err(NumeralError::InvalidDigit {
                found: 'a',
                position: 2,
                radix: 10
            })
        );
        assert!(hex_to_decimal("0G").is_err());
    }
}
