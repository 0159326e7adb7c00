//! Native token unit conversion.
//!
//! User input and escrow amounts are displayed in whole token units, while
//! the chain counts in the smallest denomination (`10^-18` of a token). Both
//! directions here are exact integer arithmetic; no binary floating point is
//! involved, so any amount with at most 18 fractional digits converts without
//! rounding.

use crate::constants::NATIVE_DECIMALS;
use rust_decimal::Decimal;

/// Errors converting a display amount to smallest-denomination units.
#[derive(Debug, thiserror::Error)]
pub enum AmountError {
    /// The input is not a decimal number.
    #[error("not a decimal number: {0}")]
    Parse(#[from] rust_decimal::Error),
    /// Negative amounts cannot be attached to a transaction.
    #[error("amount must not be negative")]
    Negative,
    /// The token only has 18 decimal places.
    #[error("at most 18 decimal places are supported, got {0}")]
    TooManyDecimals(u32),
    /// The scaled value exceeds the representable range.
    #[error("amount is too large for the native token range")]
    Overflow,
}

/// Converts a display-unit decimal string to an integer string of
/// smallest-denomination units.
///
/// `"0.5"` becomes `"500000000000000000"`.
pub fn to_smallest_unit(amount: &str) -> Result<String, AmountError> {
    let amount = Decimal::from_str_exact(amount.trim())?;
    if amount.is_sign_negative() {
        return Err(AmountError::Negative);
    }
    if amount.scale() > NATIVE_DECIMALS {
        return Err(AmountError::TooManyDecimals(amount.scale()));
    }
    let mantissa = amount.mantissa().unsigned_abs();
    let factor = 10u128.pow(NATIVE_DECIMALS - amount.scale());
    let value = mantissa.checked_mul(factor).ok_or(AmountError::Overflow)?;
    Ok(value.to_string())
}

/// Formats a smallest-denomination value as a canonical display-unit decimal
/// string, with trailing fractional zeros trimmed.
pub fn from_smallest_unit(value: u128) -> String {
    let digits = value.to_string();
    let decimals = NATIVE_DECIMALS as usize;
    let (int, frac) = if digits.len() <= decimals {
        (String::from("0"), format!("{digits:0>decimals$}"))
    } else {
        let (int, frac) = digits.split_at(digits.len() - decimals);
        (int.to_owned(), frac.to_owned())
    };
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        int
    } else {
        format!("{int}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_half_token() {
        assert_eq!(to_smallest_unit("0.5").unwrap(), "500000000000000000");
    }

    #[test]
    fn scales_whole_and_zero() {
        assert_eq!(to_smallest_unit("1").unwrap(), "1000000000000000000");
        assert_eq!(to_smallest_unit("0").unwrap(), "0");
    }

    #[test]
    fn keeps_full_precision() {
        assert_eq!(to_smallest_unit("1.000000000000000001").unwrap(), "1000000000000000001");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(to_smallest_unit("-1").unwrap_err(), AmountError::Negative));
        assert!(matches!(
            to_smallest_unit("0.0000000000000000001").unwrap_err(),
            AmountError::TooManyDecimals(19)
        ));
        assert!(matches!(to_smallest_unit("a lot").unwrap_err(), AmountError::Parse(_)));
    }

    #[test]
    fn formats_smallest_units() {
        assert_eq!(from_smallest_unit(0), "0");
        assert_eq!(from_smallest_unit(1), "0.000000000000000001");
        assert_eq!(from_smallest_unit(500_000_000_000_000_000), "0.5");
        assert_eq!(from_smallest_unit(1_000_000_000_000_000_000), "1");
        assert_eq!(from_smallest_unit(1_234_500_000_000_000_000_000), "1234.5");
    }

    #[test]
    fn round_trips_canonical_amounts() {
        for amount in ["0", "1", "0.5", "123.456", "0.000000000000000001", "98765.4321"] {
            let scaled: u128 = to_smallest_unit(amount).unwrap().parse().unwrap();
            assert_eq!(from_smallest_unit(scaled), amount, "round trip of {amount}");
        }
    }
}
