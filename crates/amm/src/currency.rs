//! Currencies: a chain's native coin and chain-scoped fungible tokens.

use crate::error::SwapError;
use crate::types::{Address, ChainId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A fungible token living at a contract address on one chain.
///
/// Identity is `(chain_id, address)`; decimals and metadata do not take part
/// in equality or hashing.
#[derive(Debug, Clone)]
pub struct Token {
    pub chain_id: ChainId,
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

impl Token {
    pub fn new(
        chain_id: ChainId,
        address: Address,
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Whether this token is `token0` of a pool made with `other`.
    pub fn sorts_before(&self, other: &Token) -> Result<bool, SwapError> {
        if self.chain_id != other.chain_id {
            return Err(SwapError::ChainMismatch);
        }
        if self.address == other.address {
            return Err(SwapError::IdenticalTokens);
        }
        Ok(self.address < other.address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// The native currency of a chain, e.g. ETH on mainnet.
///
/// Pools never hold the native currency directly; they hold its wrapped token.
#[derive(Debug, Clone)]
pub struct Native {
    pub chain_id: ChainId,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
    pub wrapped: Token,
}

impl Native {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        wrapped: Token,
    ) -> Self {
        Self {
            chain_id: wrapped.chain_id,
            decimals: wrapped.decimals,
            symbol: symbol.into(),
            name: name.into(),
            wrapped,
        }
    }
}

impl PartialEq for Native {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id
    }
}

impl Eq for Native {}

/// Either a chain's native currency or a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Currency {
    Native(Native),
    Token(Token),
}

impl Currency {
    pub fn chain_id(&self) -> ChainId {
        match self {
            Currency::Native(native) => native.chain_id,
            Currency::Token(token) => token.chain_id,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Currency::Native(native) => native.decimals,
            Currency::Token(token) => token.decimals,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Currency::Native(native) => &native.symbol,
            Currency::Token(token) => &token.symbol,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Currency::Native(native) => &native.name,
            Currency::Token(token) => &token.name,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native(_))
    }

    /// The token that represents this currency inside pools.
    pub fn wrapped(&self) -> &Token {
        match self {
            Currency::Native(native) => &native.wrapped,
            Currency::Token(token) => token,
        }
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Currency::Token(token)
    }
}

impl From<Native> for Currency {
    fn from(native: Native) -> Self {
        Currency::Native(native)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn weth() -> Token {
        Token::new(
            1,
            address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            18,
            "WETH",
            "Wrapped Ether",
        )
    }

    #[test]
    fn test_token_equality_ignores_metadata() {
        let a = Token::new(1, Address::repeat_byte(0x01), 18, "A", "Token A");
        let renamed = Token::new(1, Address::repeat_byte(0x01), 6, "AA", "Other");
        let other_chain = Token::new(3, Address::repeat_byte(0x01), 18, "A", "Token A");

        assert_eq!(a, renamed);
        assert_ne!(a, other_chain);
    }

    #[test]
    fn test_sorts_before() {
        let a = Token::new(1, Address::repeat_byte(0x01), 18, "A", "A");
        let b = Token::new(1, Address::repeat_byte(0x02), 18, "B", "B");

        assert!(a.sorts_before(&b).unwrap());
        assert!(!b.sorts_before(&a).unwrap());
        assert_eq!(a.sorts_before(&a).unwrap_err(), SwapError::IdenticalTokens);

        let elsewhere = Token::new(3, Address::repeat_byte(0x02), 18, "B", "B");
        assert_eq!(
            a.sorts_before(&elsewhere).unwrap_err(),
            SwapError::ChainMismatch
        );
    }

    #[test]
    fn test_native_wraps_to_token() {
        let eth = Currency::from(Native::new("ETH", "Ether", weth()));

        assert!(eth.is_native());
        assert_eq!(eth.chain_id(), 1);
        assert_eq!(eth.decimals(), 18);
        assert_eq!(eth.symbol(), "ETH");
        assert_eq!(eth.wrapped(), &weth());
        assert_ne!(eth, Currency::from(weth()));
    }
}
