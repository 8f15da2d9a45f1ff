//! Decimal amount parsing for command-line input.

use crate::error::{AppError, Result};

/// Parses a decimal string into integer minor units.
///
/// Accepts `.` or `,` as the decimal separator and at most two fractional
/// digits. Amounts entered on the command line are always positive; the
/// transaction kind carries the sign.
pub fn parse_minor(raw: &str) -> Result<i64> {
    let invalid = || AppError::Command(format!("invalid amount: {raw}"));

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Command("empty amount".to_string()));
    }

    let normalized = trimmed.replace(',', ".");
    let mut parts = normalized.split('.');
    let units_str = parts.next().ok_or_else(invalid)?;
    let fraction = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let units: i64 = units_str.parse().map_err(|_| invalid())?;

    let cents: i64 = match fraction {
        None | Some("") => 0,
        Some(frac) => {
            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            match frac.len() {
                1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                2 => frac.parse::<i64>().map_err(|_| invalid())?,
                _ => return Err(AppError::Command(format!("too many decimals: {raw}"))),
            }
        }
    };

    units
        .checked_mul(100)
        .and_then(|value| value.checked_add(cents))
        .ok_or_else(|| AppError::Command(format!("amount too large: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_dot_or_comma() {
        assert_eq!(parse_minor("10").unwrap(), 1_000);
        assert_eq!(parse_minor("10.5").unwrap(), 1_050);
        assert_eq!(parse_minor("10,50").unwrap(), 1_050);
        assert_eq!(parse_minor(" 2.30 ").unwrap(), 230);
    }

    #[test]
    fn rejects_more_than_two_decimals() {
        assert!(parse_minor("12.345").is_err());
        assert!(parse_minor("0.001").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_minor("").is_err());
        assert!(parse_minor("-3").is_err());
        assert!(parse_minor("1.2.3").is_err());
        assert!(parse_minor("abc").is_err());
    }
}
