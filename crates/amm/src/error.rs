//! Error types for pool math, pricing, and route construction.

/// Errors raised by the AMM math and trade construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    /// A pool reserve is zero, or the requested output meets or exceeds the reserve.
    #[error("insufficient reserves")]
    InsufficientReserves,

    /// The computed amount (or minted liquidity) is not positive.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Operands are denominated in incompatible currencies.
    #[error("currency mismatch")]
    CurrencyMismatch,

    /// The pools of a route do not connect its input to its output.
    #[error("invalid route: {0}")]
    InvalidRoute(&'static str),

    #[error("division by zero")]
    DivisionByZero,

    #[error("tokens are identical")]
    IdenticalTokens,

    #[error("tokens are on different chains")]
    ChainMismatch,

    #[error("invalid fee: {0}")]
    InvalidFee(u32),

    #[error("invalid pool type: {0}")]
    InvalidPoolType(u8),

    #[error("slippage tolerance must not be negative")]
    InvalidSlippageTolerance,

    #[error("invalid search options: {0}")]
    InvalidSearchOptions(&'static str),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("no deployment configured for chain {0}")]
    UnknownChain(u64),

    #[error("invalid precision")]
    InvalidPrecision,
}

impl SwapError {
    /// Whether a route search should skip the pool that raised this error
    /// instead of aborting.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            SwapError::InsufficientReserves | SwapError::InsufficientInputAmount
        )
    }
}
