//! Registry of known pools with routing and quoting on top.

use crate::amount::CurrencyAmount;
use crate::config::RouterConfig;
use crate::currency::{Currency, Token};
use crate::error::SwapError;
use crate::fraction::Percent;
use crate::pool::Pool;
use crate::router::TokenGraph;
use crate::trade::Trade;
use crate::types::{Address, TradeType};
use num_traits::Signed;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// The best trade for a request together with its slippage bound.
#[derive(Debug, Clone)]
pub struct Quote {
    /// The winning trade.
    pub trade: Trade,
    /// Tolerance the bound was computed with.
    pub slippage_tolerance: Percent,
    /// Minimum output for exact-in quotes, maximum input for exact-out quotes.
    pub amount_limit: CurrencyAmount,
}

/// Owns the current pool set, keyed by pool address.
///
/// Mutation happens through `&mut self`; wrap the registry in a lock to share
/// it between threads.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    config: RouterConfig,
    /// Pools in address order, which fixes the search order.
    pools: BTreeMap<Address, Pool>,
    /// Index of tokens to the pools holding them.
    token_pools: HashMap<Token, HashSet<Address>>,
    graph: TokenGraph,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            pools: BTreeMap::new(),
            token_pools: HashMap::new(),
            graph: TokenGraph::new(),
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RouterConfig) {
        self.config = config;
    }

    /// Insert a pool, replacing any pool at the same address.
    /// Returns the replaced pool.
    pub fn upsert_pool(&mut self, pool: Pool) -> Option<Pool> {
        let address = pool.address();
        let previous = self.remove_pool(address);

        for token in [pool.token0(), pool.token1()] {
            self.token_pools
                .entry(token.clone())
                .or_default()
                .insert(address);
        }
        self.graph.add_pool(&pool);

        debug!(%address, %pool, replaced = previous.is_some(), "upserted pool");
        self.pools.insert(address, pool);
        previous
    }

    /// Remove the pool at `address`, if present.
    pub fn remove_pool(&mut self, address: Address) -> Option<Pool> {
        let pool = self.pools.remove(&address)?;

        for token in [pool.token0(), pool.token1()] {
            if let Some(addresses) = self.token_pools.get_mut(token) {
                addresses.remove(&address);
                if addresses.is_empty() {
                    self.token_pools.remove(token);
                }
            }
        }
        self.graph.remove_pool(&pool);

        debug!(%address, "removed pool");
        Some(pool)
    }

    pub fn pool(&self, address: Address) -> Option<&Pool> {
        self.pools.get(&address)
    }

    /// All pools in address order.
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Pools holding `token`, in address order.
    pub fn pools_for_token(&self, token: &Token) -> Vec<&Pool> {
        let mut pools: Vec<&Pool> = self
            .token_pools
            .get(token)
            .map(|addresses| {
                addresses
                    .iter()
                    .filter_map(|address| self.pools.get(address))
                    .collect()
            })
            .unwrap_or_default();
        pools.sort_by_key(|pool| pool.address());
        pools
    }

    /// Every token held by some pool.
    pub fn tokens(&self) -> Vec<Token> {
        self.graph.tokens()
    }

    /// Whether `to` is reachable from `from` within the configured hop limit.
    pub fn has_route(&self, from: &Currency, to: &Currency) -> bool {
        self.graph.has_path(
            from.wrapped(),
            to.wrapped(),
            self.config.trade_options.max_hops,
        )
    }

    /// Ranked trades spending exactly `amount_in`. Empty when no route exists.
    pub fn best_trades_exact_in(
        &self,
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
    ) -> Result<Vec<Trade>, RegistryError> {
        self.config.trade_options.validate()?;
        self.validate_request(amount_in, currency_out)?;
        let candidates = self.candidate_pools(amount_in.currency(), currency_out);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Trade::best_trade_exact_in(
            &candidates,
            amount_in,
            currency_out,
            self.config.trade_options,
        )?)
    }

    /// Ranked trades receiving exactly `amount_out`. Empty when no route exists.
    pub fn best_trades_exact_out(
        &self,
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
    ) -> Result<Vec<Trade>, RegistryError> {
        self.config.trade_options.validate()?;
        self.validate_request(amount_out, currency_in)?;
        let candidates = self.candidate_pools(currency_in, amount_out.currency());
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Trade::best_trade_exact_out(
            &candidates,
            currency_in,
            amount_out,
            self.config.trade_options,
        )?)
    }

    /// The best exact-in trade and its minimum output at the configured slippage.
    pub fn quote_exact_in(
        &self,
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
    ) -> Result<Quote, RegistryError> {
        let trade = self
            .best_trades_exact_in(amount_in, currency_out)?
            .into_iter()
            .next()
            .ok_or(RegistryError::NoRouteFound)?;
        self.quote(trade)
    }

    /// The best exact-out trade and its maximum input at the configured slippage.
    pub fn quote_exact_out(
        &self,
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
    ) -> Result<Quote, RegistryError> {
        let trade = self
            .best_trades_exact_out(currency_in, amount_out)?
            .into_iter()
            .next()
            .ok_or(RegistryError::NoRouteFound)?;
        self.quote(trade)
    }

    fn quote(&self, trade: Trade) -> Result<Quote, RegistryError> {
        let slippage_tolerance = self.config.slippage_tolerance();
        let amount_limit = match trade.trade_type() {
            TradeType::ExactInput => trade.minimum_amount_out(&slippage_tolerance)?,
            TradeType::ExactOutput => trade.maximum_amount_in(&slippage_tolerance)?,
        };
        info!(
            route = %trade.route(),
            input = %trade.input_amount(),
            output = %trade.output_amount(),
            price_impact = %trade.price_impact(),
            "quoted trade"
        );
        Ok(Quote {
            trade,
            slippage_tolerance,
            amount_limit,
        })
    }

    fn validate_request(
        &self,
        amount: &CurrencyAmount,
        other: &Currency,
    ) -> Result<(), RegistryError> {
        if amount.currency().wrapped() == other.wrapped() {
            return Err(RegistryError::IdenticalCurrencies);
        }
        if amount.currency().chain_id() != other.chain_id() {
            return Err(SwapError::ChainMismatch.into());
        }
        if !amount.raw().is_positive() {
            return Err(RegistryError::InvalidAmount);
        }
        Ok(())
    }

    /// Pools in the connected component of `from`, when `to` is within reach.
    fn candidate_pools(&self, from: &Currency, to: &Currency) -> Vec<Pool> {
        let max_hops = self.config.trade_options.max_hops;
        let mut reachable = self.graph.reachable_tokens(from.wrapped(), max_hops);
        if !reachable.contains(to.wrapped()) {
            debug!(%from, %to, max_hops, "no route within hop limit");
            return Vec::new();
        }
        reachable.insert(from.wrapped().clone());

        let candidates: Vec<Pool> = self
            .pools
            .values()
            .filter(|pool| reachable.contains(pool.token0()) && reachable.contains(pool.token1()))
            .cloned()
            .collect();
        debug!(
            candidates = candidates.len(),
            total = self.pools.len(),
            "selected candidate pools"
        );
        candidates
    }
}

/// Errors from registry-level requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Input and output resolve to the same token.
    #[error("input and output currencies are identical")]
    IdenticalCurrencies,
    /// The requested amount is zero or negative.
    #[error("amount must be positive")]
    InvalidAmount,
    /// No pool path connects the currencies.
    #[error("no route found")]
    NoRouteFound,
    #[error(transparent)]
    Swap(#[from] SwapError),
}
