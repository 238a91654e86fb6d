//! Exchange rates between two currencies.

use crate::amount::CurrencyAmount;
use crate::currency::Currency;
use crate::error::SwapError;
use crate::fraction::Fraction;
use crate::math::{pow10, Rounding};
use crate::types::BigInt;
use std::fmt;

/// How much `quote` currency one unit of `base` currency is worth.
///
/// `raw` relates smallest units; `adjusted` relates whole units by applying
/// `10^base_decimals / 10^quote_decimals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    base: Currency,
    quote: Currency,
    raw: Fraction,
    scalar: Fraction,
}

impl Price {
    /// `denominator` raw units of `base` are worth `numerator` raw units of `quote`.
    pub fn new(
        base: impl Into<Currency>,
        quote: impl Into<Currency>,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> Result<Self, SwapError> {
        let base = base.into();
        let quote = quote.into();
        let raw = Fraction::new(numerator, denominator)?;
        let scalar = Fraction::new(
            pow10(u32::from(base.decimals())),
            pow10(u32::from(quote.decimals())),
        )?;
        Ok(Self {
            base,
            quote,
            raw,
            scalar,
        })
    }

    /// The rate implied by trading `base_amount` for `quote_amount`.
    pub fn from_amounts(
        base_amount: &CurrencyAmount,
        quote_amount: &CurrencyAmount,
    ) -> Result<Self, SwapError> {
        Self::new(
            base_amount.currency().clone(),
            quote_amount.currency().clone(),
            base_amount.raw().clone(),
            quote_amount.raw().clone(),
        )
    }

    pub fn base_currency(&self) -> &Currency {
        &self.base
    }

    pub fn quote_currency(&self) -> &Currency {
        &self.quote
    }

    /// Ratio of raw units.
    pub fn raw(&self) -> &Fraction {
        &self.raw
    }

    /// Ratio of whole units.
    pub fn adjusted(&self) -> Fraction {
        &self.raw * &self.scalar
    }

    pub fn invert(&self) -> Result<Price, SwapError> {
        Price::new(
            self.quote.clone(),
            self.base.clone(),
            self.raw.numerator().clone(),
            self.raw.denominator().clone(),
        )
    }

    /// Chain two rates: `base -> quote` then `other.base -> other.quote`.
    pub fn multiply(&self, other: &Price) -> Result<Price, SwapError> {
        if self.quote != other.base {
            return Err(SwapError::CurrencyMismatch);
        }
        let product = &self.raw * &other.raw;
        Price::new(
            self.base.clone(),
            other.quote.clone(),
            product.denominator().clone(),
            product.numerator().clone(),
        )
    }

    /// Convert an amount of the base currency, rounding down.
    pub fn quote(&self, amount: &CurrencyAmount) -> Result<CurrencyAmount, SwapError> {
        if amount.currency() != &self.base {
            return Err(SwapError::CurrencyMismatch);
        }
        let raw = (&self.raw * &Fraction::from_integer(amount.raw().clone())).quotient();
        Ok(CurrencyAmount::new(self.quote.clone(), raw))
    }

    pub fn to_significant(
        &self,
        significant_digits: u32,
        rounding: Rounding,
    ) -> Result<String, SwapError> {
        self.adjusted().to_significant(significant_digits, rounding)
    }

    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        self.adjusted().to_fixed(decimal_places, rounding)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self
            .to_significant(6, Rounding::RoundHalfUp)
            .map_err(|_| fmt::Error)?;
        write!(f, "{} {}/{}", value, self.quote, self.base)
    }
}
