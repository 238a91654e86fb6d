//! In-memory AMM engine for two-token liquidity pools.
//!
//! This library provides:
//! - Exact rational arithmetic for prices, amounts and percentages
//! - Constant-product and weighted swap curves with output-side fees
//! - Deterministic CREATE2 pool addresses per chain
//! - Routes, trades and a bounded best-trade search over a pool set
//! - A pool registry that prunes unreachable pools before searching

pub mod address;
pub mod amount;
pub mod config;
pub mod currency;
pub mod error;
pub mod fraction;
pub mod math;
pub mod pool;
pub mod price;
pub mod registry;
pub mod route;
pub mod router;
pub mod trade;
pub mod types;

pub use address::{compute_pool_address, AddressBook, Deployment};
pub use amount::{CurrencyAmount, TokenAmount};
pub use config::{BestTradeOptions, RouterConfig};
pub use currency::{Currency, Native, Token};
pub use error::SwapError;
pub use fraction::{Fraction, Percent};
pub use math::Rounding;
pub use pool::{Fee, Pool, PoolType, DEFAULT_EXPONENT, LIQUIDITY_TOKEN_DECIMALS};
pub use price::Price;
pub use registry::{PoolRegistry, Quote, RegistryError};
pub use route::Route;
pub use router::TokenGraph;
pub use trade::{input_output_comparator, sorted_insert, trade_comparator, Trade};
pub use types::{Address, BigInt, ChainId, TradeType, B256, BPS_DENOMINATOR, MINIMUM_LIQUIDITY};
