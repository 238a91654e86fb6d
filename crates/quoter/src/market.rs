//! Market description files and the registry built from them.

use alloy::primitives::{Address, B256};
use amm::{
    AddressBook, ChainId, Currency, CurrencyAmount, Deployment, Fee, Native, Pool, PoolRegistry,
    PoolType, RouterConfig, SwapError, Token,
};
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Top-level layout of a market JSON file.
#[derive(Debug, Deserialize)]
pub struct MarketFile {
    pub chains: Vec<ChainEntry>,
    pub tokens: Vec<TokenEntry>,
    pub pools: Vec<PoolEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ChainEntry {
    pub chain_id: ChainId,
    pub factory: Address,
    pub init_code_hash: B256,
    #[serde(default)]
    pub typed_salts: bool,
    /// Native currency, wrapped by one of the chain's tokens.
    #[serde(default)]
    pub native: Option<NativeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct NativeEntry {
    pub symbol: String,
    pub name: String,
    /// Symbol of the wrapped token.
    pub wrapped: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenEntry {
    pub chain_id: ChainId,
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PoolEntry {
    pub chain_id: ChainId,
    pub token_a: String,
    /// Reserve of `token_a` in whole units, e.g. `"1500.25"`.
    pub reserve_a: String,
    pub token_b: String,
    pub reserve_b: String,
    /// Pool type code; defaults to constant product.
    #[serde(default = "default_pool_type")]
    pub pool_type: u8,
    #[serde(default)]
    pub fee_bps: u32,
    /// Known pool address; derived from the chain deployment when absent.
    #[serde(default)]
    pub address: Option<Address>,
}

fn default_pool_type() -> u8 {
    PoolType::ConstantProduct.code()
}

/// Errors that can occur while loading a market.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("failed to read market file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid market file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown currency {symbol} on chain {chain_id}")]
    UnknownCurrency { chain_id: ChainId, symbol: String },

    #[error("currency {0} not found")]
    CurrencyNotFound(String),

    #[error("currency {0} is ambiguous, use its address or --chain")]
    AmbiguousCurrency(String),

    #[error("pool {token_a}/{token_b}: {source}")]
    InvalidPool {
        token_a: String,
        token_b: String,
        source: SwapError,
    },
}

/// Loaded market: deployments, currencies and the pool registry.
#[derive(Debug)]
pub struct Market {
    addresses: AddressBook,
    currencies: HashMap<(ChainId, String), Currency>,
    registry: PoolRegistry,
}

impl Market {
    /// Read and build a market from a JSON file.
    pub fn load(path: &Path, config: RouterConfig) -> Result<Self, MarketError> {
        let contents = std::fs::read_to_string(path)?;
        let file: MarketFile = serde_json::from_str(&contents)?;
        info!(path = %path.display(), "loaded market file");
        Self::from_file(file, config)
    }

    pub fn from_file(file: MarketFile, config: RouterConfig) -> Result<Self, MarketError> {
        let mut market = Self {
            addresses: AddressBook::new(),
            currencies: HashMap::new(),
            registry: PoolRegistry::with_config(config),
        };

        for entry in file.tokens {
            let token = Token::new(
                entry.chain_id,
                entry.address,
                entry.decimals,
                entry.symbol,
                entry.name,
            );
            market.insert_currency(token.into())?;
        }

        for chain in file.chains {
            let deployment = Deployment::new(chain.factory, chain.init_code_hash)
                .with_typed_salts(chain.typed_salts);
            market.addresses.insert_deployment(chain.chain_id, deployment);

            if let Some(native) = chain.native {
                let wrapped = market.token(chain.chain_id, &native.wrapped)?;
                market.insert_currency(Native::new(native.symbol, native.name, wrapped).into())?;
            }
        }

        for entry in file.pools {
            let pool = market.build_pool(&entry)?;
            debug!(address = %pool.address(), %pool, "registering pool");
            market.registry.upsert_pool(pool);
        }

        info!(
            chains = market.chain_ids().len(),
            currencies = market.currencies.len(),
            pools = market.registry.len(),
            "market ready"
        );
        Ok(market)
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Resolve a currency by symbol (case-insensitive) or token address.
    ///
    /// `chain_id` narrows the lookup when several chains share a symbol.
    pub fn resolve(&self, key: &str, chain_id: Option<ChainId>) -> Result<Currency, MarketError> {
        let needle = key.to_ascii_uppercase();
        let address = key.parse::<Address>().ok();

        let mut matches = self.currencies.iter().filter(|((chain, symbol), currency)| {
            chain_id.map_or(true, |id| id == *chain)
                && (*symbol == needle
                    || matches!((address, currency), (Some(a), Currency::Token(t)) if t.address == a))
        });

        match (matches.next(), matches.next()) {
            (Some((_, currency)), None) => Ok(currency.clone()),
            (Some(_), Some(_)) => Err(MarketError::AmbiguousCurrency(key.to_string())),
            (None, _) => Err(MarketError::CurrencyNotFound(key.to_string())),
        }
    }

    fn chain_ids(&self) -> Vec<ChainId> {
        let mut ids: Vec<ChainId> = self.currencies.keys().map(|(chain, _)| *chain).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Symbols are unique per chain; a repeated one is rejected.
    fn insert_currency(&mut self, currency: Currency) -> Result<(), MarketError> {
        let key = (currency.chain_id(), currency.symbol().to_ascii_uppercase());
        match self.currencies.entry(key) {
            Entry::Occupied(_) => Err(MarketError::AmbiguousCurrency(currency.symbol().to_string())),
            Entry::Vacant(slot) => {
                slot.insert(currency);
                Ok(())
            }
        }
    }

    fn token(&self, chain_id: ChainId, symbol: &str) -> Result<Token, MarketError> {
        match self
            .currencies
            .get(&(chain_id, symbol.to_ascii_uppercase()))
        {
            Some(Currency::Token(token)) => Ok(token.clone()),
            _ => Err(MarketError::UnknownCurrency {
                chain_id,
                symbol: symbol.to_string(),
            }),
        }
    }

    fn build_pool(&self, entry: &PoolEntry) -> Result<Pool, MarketError> {
        let invalid = |source: SwapError| MarketError::InvalidPool {
            token_a: entry.token_a.clone(),
            token_b: entry.token_b.clone(),
            source,
        };

        let token_a = self.token(entry.chain_id, &entry.token_a)?;
        let token_b = self.token(entry.chain_id, &entry.token_b)?;
        let reserve_a = CurrencyAmount::from_decimal_str(token_a, &entry.reserve_a)
            .map_err(invalid)?
            .wrapped();
        let reserve_b = CurrencyAmount::from_decimal_str(token_b, &entry.reserve_b)
            .map_err(invalid)?
            .wrapped();
        let pool_type = PoolType::try_from(entry.pool_type).map_err(invalid)?;
        let fee = Fee::from_bps(entry.fee_bps).map_err(invalid)?;

        match entry.address {
            Some(address) => Pool::with_address(address, reserve_a, reserve_b, pool_type, fee),
            None => Pool::new(reserve_a, reserve_b, pool_type, fee, &self.addresses),
        }
        .map_err(invalid)
    }
}
