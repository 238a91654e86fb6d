//! Integer helpers shared by the fraction, pool and liquidity math.

use crate::error::SwapError;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Rounding mode applied when a value is formatted to fewer digits than it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Truncate toward zero.
    RoundDown,
    /// Round to nearest, ties away from zero.
    #[default]
    RoundHalfUp,
    /// Round away from zero.
    RoundUp,
}

/// `10^exp` as a big integer.
pub fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// Integer square root rounded down, computed with Newton's method.
pub fn floor_sqrt(value: &BigInt) -> Result<BigInt, SwapError> {
    if value.is_negative() {
        return Err(SwapError::InvalidAmount(format!(
            "square root of negative value {value}"
        )));
    }

    let two = BigInt::from(2u32);
    if *value > BigInt::from(3u32) {
        let mut z = value.clone();
        let mut x = value / &two + BigInt::one();
        while x < z {
            z = x.clone();
            x = (value / &x + &x) / &two;
        }
        Ok(z)
    } else if value.is_zero() {
        Ok(BigInt::zero())
    } else {
        Ok(BigInt::one())
    }
}

/// Divide a non-negative numerator by a positive denominator, rounding the
/// quotient as requested.
pub(crate) fn div_round(numerator: &BigInt, denominator: &BigInt, rounding: Rounding) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.is_zero() {
        return quotient;
    }
    match rounding {
        Rounding::RoundDown => quotient,
        Rounding::RoundUp => quotient + BigInt::one(),
        Rounding::RoundHalfUp => {
            if remainder * BigInt::from(2u32) >= *denominator {
                quotient + BigInt::one()
            } else {
                quotient
            }
        }
    }
}
