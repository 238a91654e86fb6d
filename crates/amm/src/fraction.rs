//! Exact rational numbers over big integers.
//!
//! Every monetary quantity in the crate is an integer or a ratio of integers;
//! floating point is never used. Formatting rounds only at the very end.

use crate::error::SwapError;
use crate::math::{div_round, pow10, Rounding};
use crate::types::{BigInt, BPS_DENOMINATOR};
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A ratio of two big integers. The denominator is always positive.
#[derive(Debug, Clone)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Create a fraction. Fails if the denominator is zero.
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, SwapError> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(SwapError::DivisionByZero);
        }
        if denominator.is_negative() {
            return Ok(Self {
                numerator: -numerator,
                denominator: -denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// A whole number `value / 1`.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    /// `raw / 10^decimals`, the human-readable value of a raw amount.
    pub fn from_decimals(raw: impl Into<BigInt>, decimals: u8) -> Self {
        Self {
            numerator: raw.into(),
            denominator: pow10(u32::from(decimals)),
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Integer part, truncated toward zero.
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// What is left after removing the quotient.
    pub fn remainder(&self) -> Fraction {
        Self {
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
    }

    /// Swap numerator and denominator. Fails for a zero fraction.
    pub fn invert(&self) -> Result<Fraction, SwapError> {
        Fraction::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Exact division. Fails when dividing by zero.
    pub fn checked_div(&self, other: &Fraction) -> Result<Fraction, SwapError> {
        Fraction::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Format with the given number of significant digits. Trailing zeros
    /// after the decimal point are dropped.
    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, SwapError> {
        if significant_digits == 0 {
            return Err(SwapError::InvalidPrecision);
        }
        if self.numerator.is_zero() {
            return Ok("0".to_string());
        }

        let negative = self.numerator.is_negative();
        let magnitude = self.numerator.abs();
        let exponent = decimal_exponent(&magnitude, &self.denominator);
        let scale = i64::from(significant_digits) - 1 - exponent;

        let digits = if scale >= 0 {
            div_round(
                &(&magnitude * pow10(scale as u32)),
                &self.denominator,
                rounding,
            )
        } else {
            div_round(
                &magnitude,
                &(&self.denominator * pow10((-scale) as u32)),
                rounding,
            )
        };

        let mut formatted = if scale > 0 {
            let fixed = place_decimal_point(&digits, scale as u32);
            let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
            trimmed.to_string()
        } else {
            let mut whole = digits.to_string();
            whole.push_str(&"0".repeat((-scale) as usize));
            whole
        };
        if negative && !digits.is_zero() {
            formatted.insert(0, '-');
        }
        Ok(formatted)
    }

    /// Format with exactly `decimal_places` digits after the decimal point.
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        let negative = self.numerator.is_negative();
        let digits = div_round(
            &(self.numerator.abs() * pow10(decimal_places)),
            &self.denominator,
            rounding,
        );
        let mut formatted = place_decimal_point(&digits, decimal_places);
        if negative && !digits.is_zero() {
            formatted.insert(0, '-');
        }
        formatted
    }
}

/// `floor(log10(numerator / denominator))` for a positive ratio.
fn decimal_exponent(numerator: &BigInt, denominator: &BigInt) -> i64 {
    let whole = numerator / denominator;
    if !whole.is_zero() {
        return whole.to_string().len() as i64 - 1;
    }
    let ten = BigInt::from(10u32);
    let mut scaled = numerator.clone();
    let mut shift = 0i64;
    while scaled < *denominator {
        scaled *= &ten;
        shift += 1;
    }
    -shift
}

/// Render a non-negative integer with `scale` digits after the decimal point.
fn place_decimal_point(digits: &BigInt, scale: u32) -> String {
    let raw = digits.to_string();
    if scale == 0 {
        return raw;
    }
    let scale = scale as usize;
    let padded = if raw.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - raw.len()), raw)
    } else {
        raw
    };
    let split = padded.len() - scale;
    format!("{}.{}", &padded[..split], &padded[split..])
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Fraction::from_integer(value)
    }
}

impl Add for &Fraction {
    type Output = Fraction;

    fn add(self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction {
                numerator: &self.numerator + &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Fraction {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

impl Sub for &Fraction {
    type Output = Fraction;

    fn sub(self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction {
                numerator: &self.numerator - &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Fraction {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

impl Mul for &Fraction {
    type Output = Fraction;

    fn mul(self, other: &Fraction) -> Fraction {
        Fraction {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// A fraction displayed as a percentage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(Fraction);

impl Percent {
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, SwapError> {
        Fraction::new(numerator, denominator).map(Self)
    }

    /// A percentage expressed in basis points, e.g. 50 = 0.5%.
    pub fn from_bps(bps: u32) -> Self {
        Self(Fraction {
            numerator: BigInt::from(bps),
            denominator: BigInt::from(BPS_DENOMINATOR),
        })
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, SwapError> {
        self.scaled().to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        self.scaled().to_fixed(decimal_places, rounding)
    }

    fn scaled(&self) -> Fraction {
        &self.0 * &Fraction::from_integer(100u32)
    }
}

impl From<Fraction> for Percent {
    fn from(fraction: Fraction) -> Self {
        Self(fraction)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.to_fixed(2, Rounding::RoundHalfUp))
    }
}
