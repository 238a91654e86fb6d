//! Amounts of a currency in its smallest unit.

use crate::currency::{Currency, Token};
use crate::error::SwapError;
use crate::fraction::Fraction;
use crate::math::Rounding;
use crate::types::BigInt;
use num_traits::Zero;
use std::fmt;

/// An amount of a specific token. `raw` is never decimal-adjusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    token: Token,
    raw: BigInt,
}

impl TokenAmount {
    pub fn new(token: Token, raw: impl Into<BigInt>) -> Self {
        Self {
            token,
            raw: raw.into(),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn raw(&self) -> &BigInt {
        &self.raw
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Sum of two amounts of the same token.
    pub fn add(&self, other: &TokenAmount) -> Result<TokenAmount, SwapError> {
        if self.token != other.token {
            return Err(SwapError::CurrencyMismatch);
        }
        Ok(Self::new(self.token.clone(), &self.raw + &other.raw))
    }

    /// Difference of two amounts of the same token.
    pub fn subtract(&self, other: &TokenAmount) -> Result<TokenAmount, SwapError> {
        if self.token != other.token {
            return Err(SwapError::CurrencyMismatch);
        }
        Ok(Self::new(self.token.clone(), &self.raw - &other.raw))
    }

    pub fn to_exact(&self) -> String {
        format_exact(&self.raw, self.token.decimals)
    }

    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, SwapError> {
        adjusted(&self.raw, self.token.decimals).to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        adjusted(&self.raw, self.token.decimals).to_fixed(decimal_places, rounding)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.token.symbol)
    }
}

/// An amount of any currency, native or token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAmount {
    currency: Currency,
    raw: BigInt,
}

impl CurrencyAmount {
    pub fn new(currency: impl Into<Currency>, raw: impl Into<BigInt>) -> Self {
        Self {
            currency: currency.into(),
            raw: raw.into(),
        }
    }

    /// Parse a human-readable decimal such as `"1.5"` into raw units.
    pub fn from_decimal_str(currency: impl Into<Currency>, value: &str) -> Result<Self, SwapError> {
        let currency = currency.into();
        let raw = parse_units(value, currency.decimals())?;
        Ok(Self { currency, raw })
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn raw(&self) -> &BigInt {
        &self.raw
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// The same quantity expressed in the currency's pool token.
    pub fn wrapped(&self) -> TokenAmount {
        TokenAmount::new(self.currency.wrapped().clone(), self.raw.clone())
    }

    pub fn add(&self, other: &CurrencyAmount) -> Result<CurrencyAmount, SwapError> {
        if self.currency != other.currency {
            return Err(SwapError::CurrencyMismatch);
        }
        Ok(Self::new(self.currency.clone(), &self.raw + &other.raw))
    }

    pub fn subtract(&self, other: &CurrencyAmount) -> Result<CurrencyAmount, SwapError> {
        if self.currency != other.currency {
            return Err(SwapError::CurrencyMismatch);
        }
        Ok(Self::new(self.currency.clone(), &self.raw - &other.raw))
    }

    pub fn to_exact(&self) -> String {
        format_exact(&self.raw, self.currency.decimals())
    }

    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, SwapError> {
        adjusted(&self.raw, self.currency.decimals()).to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        adjusted(&self.raw, self.currency.decimals()).to_fixed(decimal_places, rounding)
    }
}

impl From<TokenAmount> for CurrencyAmount {
    fn from(amount: TokenAmount) -> Self {
        Self {
            currency: Currency::Token(amount.token),
            raw: amount.raw,
        }
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.currency.symbol())
    }
}

fn adjusted(raw: &BigInt, decimals: u8) -> Fraction {
    Fraction::from_decimals(raw.clone(), decimals)
}

/// Every significant digit, without trailing zeros.
fn format_exact(raw: &BigInt, decimals: u8) -> String {
    let fixed = adjusted(raw, decimals).to_fixed(u32::from(decimals), Rounding::RoundDown);
    if decimals == 0 {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn parse_units(value: &str, decimals: u8) -> Result<BigInt, SwapError> {
    let value = value.trim();
    let invalid = || SwapError::InvalidAmount(value.to_string());

    let (whole, fractional) = match value.split_once('.') {
        Some((whole, fractional)) => (whole, fractional),
        None => (value, ""),
    };
    if whole.is_empty() && fractional.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fractional) {
        return Err(invalid());
    }
    if fractional.len() > usize::from(decimals) {
        return Err(invalid());
    }

    let padded = format!(
        "{}{}{}",
        whole,
        fractional,
        "0".repeat(usize::from(decimals) - fractional.len())
    );
    padded.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;

    fn token(byte: u8, decimals: u8) -> Token {
        Token::new(1, Address::repeat_byte(byte), decimals, "TKN", "Token")
    }

    #[test]
    fn test_add_and_subtract_same_token() {
        let a = TokenAmount::new(token(1, 18), 1500);
        let b = TokenAmount::new(token(1, 18), 500);

        assert_eq!(a.add(&b).unwrap().raw(), &BigInt::from(2000));
        assert_eq!(a.subtract(&b).unwrap().raw(), &BigInt::from(1000));
    }

    #[test]
    fn test_arithmetic_rejects_other_token() {
        let a = TokenAmount::new(token(1, 18), 1);
        let b = TokenAmount::new(token(2, 18), 1);

        assert_eq!(a.add(&b).unwrap_err(), SwapError::CurrencyMismatch);
        assert_eq!(a.subtract(&b).unwrap_err(), SwapError::CurrencyMismatch);

        let x = CurrencyAmount::from(a);
        let y = CurrencyAmount::from(b);
        assert_eq!(x.add(&y).unwrap_err(), SwapError::CurrencyMismatch);
    }

    #[test]
    fn test_formatting() {
        let amount = TokenAmount::new(token(1, 6), 1_234_500);
        assert_eq!(amount.to_exact(), "1.2345");
        assert_eq!(amount.to_fixed(2, Rounding::RoundHalfUp), "1.23");
        assert_eq!(amount.to_significant(3, Rounding::RoundHalfUp).unwrap(), "1.23");
        assert_eq!(amount.to_string(), "1.2345 TKN");

        let whole = TokenAmount::new(token(1, 0), 100);
        assert_eq!(whole.to_exact(), "100");

        let round = TokenAmount::new(token(1, 18), BigInt::from(10u64).pow(18));
        assert_eq!(round.to_exact(), "1");
    }

    #[test]
    fn test_from_decimal_str() {
        let amount = CurrencyAmount::from_decimal_str(token(1, 6), "12.5").unwrap();
        assert_eq!(amount.raw(), &BigInt::from(12_500_000));

        let whole = CurrencyAmount::from_decimal_str(token(1, 6), "3").unwrap();
        assert_eq!(whole.raw(), &BigInt::from(3_000_000));

        let leading = CurrencyAmount::from_decimal_str(token(1, 6), ".25").unwrap();
        assert_eq!(leading.raw(), &BigInt::from(250_000));

        for bad in ["", ".", "1.2345678", "abc", "-1", "1.2.3"] {
            assert!(
                CurrencyAmount::from_decimal_str(token(1, 6), bad).is_err(),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_wrapped_keeps_raw() {
        let amount = CurrencyAmount::new(token(1, 18), 42);
        let wrapped = amount.wrapped();
        assert_eq!(wrapped.token(), &token(1, 18));
        assert_eq!(wrapped.raw(), &BigInt::from(42));
    }
}
