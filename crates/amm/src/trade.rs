//! Trades along a route and the best-trade search over a pool set.

use crate::amount::{CurrencyAmount, TokenAmount};
use crate::config::BestTradeOptions;
use crate::currency::Currency;
use crate::error::SwapError;
use crate::fraction::{Fraction, Percent};
use crate::pool::Pool;
use crate::price::Price;
use crate::route::Route;
use crate::types::TradeType;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// A swap of a specific amount along a route.
///
/// All derived values are computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    route: Route,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
    execution_price: Price,
    next_mid_price: Price,
    price_impact: Percent,
}

impl Trade {
    /// Trade spending exactly `amount_in` along `route`.
    pub fn exact_in(route: Route, amount_in: CurrencyAmount) -> Result<Self, SwapError> {
        Self::new(route, amount_in, TradeType::ExactInput)
    }

    /// Trade receiving exactly `amount_out` along `route`.
    pub fn exact_out(route: Route, amount_out: CurrencyAmount) -> Result<Self, SwapError> {
        Self::new(route, amount_out, TradeType::ExactOutput)
    }

    /// Simulate `amount` through every pool of `route`.
    ///
    /// For exact input the amount must be in the route's input currency and the
    /// pools are walked forward; for exact output it must be in the output
    /// currency and the pools are walked backward.
    pub fn new(route: Route, amount: CurrencyAmount, trade_type: TradeType) -> Result<Self, SwapError> {
        let pools = route.pools();
        let mut next_pools = Vec::with_capacity(pools.len());

        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                if amount.currency() != route.input() {
                    return Err(SwapError::CurrencyMismatch);
                }
                let mut current = amount.wrapped();
                for pool in pools {
                    let (output, next) = pool.output_for_input(&current)?;
                    next_pools.push(next);
                    current = output;
                }
                let output = CurrencyAmount::new(route.output().clone(), current.raw().clone());
                (amount, output)
            }
            TradeType::ExactOutput => {
                if amount.currency() != route.output() {
                    return Err(SwapError::CurrencyMismatch);
                }
                let mut current = amount.wrapped();
                for pool in pools.iter().rev() {
                    let (input, next) = pool.input_for_output(&current)?;
                    next_pools.push(next);
                    current = input;
                }
                next_pools.reverse();
                let input = CurrencyAmount::new(route.input().clone(), current.raw().clone());
                (input, amount)
            }
        };

        let execution_price = Price::from_amounts(&input_amount, &output_amount)?;
        let next_mid_price =
            Route::new(next_pools, route.input().clone(), route.output().clone())?.mid_price()?;
        let price_impact = compute_price_impact(&route.mid_price()?, &input_amount, &output_amount)?;

        Ok(Self {
            route,
            trade_type,
            input_amount,
            output_amount,
            execution_price,
            next_mid_price,
            price_impact,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    /// Average rate actually obtained, input to output.
    pub fn execution_price(&self) -> &Price {
        &self.execution_price
    }

    /// Mid price of the route once the trade has moved the reserves.
    pub fn next_mid_price(&self) -> &Price {
        &self.next_mid_price
    }

    /// How far the execution price falls short of the mid price.
    pub fn price_impact(&self) -> &Percent {
        &self.price_impact
    }

    /// Least output acceptable at the given slippage tolerance.
    pub fn minimum_amount_out(&self, slippage_tolerance: &Percent) -> Result<CurrencyAmount, SwapError> {
        if slippage_tolerance.is_negative() {
            return Err(SwapError::InvalidSlippageTolerance);
        }
        match self.trade_type {
            TradeType::ExactOutput => Ok(self.output_amount.clone()),
            TradeType::ExactInput => {
                let factor = (&Fraction::from_integer(1) + slippage_tolerance.as_fraction()).invert()?;
                let raw = (&factor * &Fraction::from_integer(self.output_amount.raw().clone())).quotient();
                Ok(CurrencyAmount::new(self.output_amount.currency().clone(), raw))
            }
        }
    }

    /// Most input payable at the given slippage tolerance.
    pub fn maximum_amount_in(&self, slippage_tolerance: &Percent) -> Result<CurrencyAmount, SwapError> {
        if slippage_tolerance.is_negative() {
            return Err(SwapError::InvalidSlippageTolerance);
        }
        match self.trade_type {
            TradeType::ExactInput => Ok(self.input_amount.clone()),
            TradeType::ExactOutput => {
                let factor = &Fraction::from_integer(1) + slippage_tolerance.as_fraction();
                let raw = (&factor * &Fraction::from_integer(self.input_amount.raw().clone())).quotient();
                Ok(CurrencyAmount::new(self.input_amount.currency().clone(), raw))
            }
        }
    }

    /// Execution price if slippage consumes the whole tolerance.
    pub fn worst_execution_price(&self, slippage_tolerance: &Percent) -> Result<Price, SwapError> {
        Price::from_amounts(
            &self.maximum_amount_in(slippage_tolerance)?,
            &self.minimum_amount_out(slippage_tolerance)?,
        )
    }

    /// The best trades spending exactly `amount_in` to reach `currency_out`,
    /// best first.
    ///
    /// Every route through at most `max_hops` pools is tried; pools that cannot
    /// fill a hop are skipped and no pool is used twice in one route.
    pub fn best_trade_exact_in(
        pools: &[Pool],
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
        options: BestTradeOptions,
    ) -> Result<Vec<Trade>, SwapError> {
        options.validate()?;
        debug!(
            pools = pools.len(),
            max_hops = options.max_hops,
            amount_in = %amount_in,
            currency_out = %currency_out,
            "searching exact-in trades"
        );

        let mut search = ExactInSearch {
            amount_in,
            currency_out,
            max_num_results: options.max_num_results,
            best_trades: Vec::with_capacity(options.max_num_results),
        };
        search.visit(pools, options.max_hops, &[], &amount_in.wrapped())?;

        debug!(found = search.best_trades.len(), "exact-in search finished");
        Ok(search.best_trades)
    }

    /// The best trades receiving exactly `amount_out` when paying in
    /// `currency_in`, best first.
    pub fn best_trade_exact_out(
        pools: &[Pool],
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
    ) -> Result<Vec<Trade>, SwapError> {
        options.validate()?;
        debug!(
            pools = pools.len(),
            max_hops = options.max_hops,
            currency_in = %currency_in,
            amount_out = %amount_out,
            "searching exact-out trades"
        );

        let mut search = ExactOutSearch {
            currency_in,
            amount_out,
            max_num_results: options.max_num_results,
            best_trades: Vec::with_capacity(options.max_num_results),
        };
        search.visit(pools, options.max_hops, &[], &amount_out.wrapped())?;

        debug!(found = search.best_trades.len(), "exact-out search finished");
        Ok(search.best_trades)
    }
}

fn compute_price_impact(
    mid_price: &Price,
    input_amount: &CurrencyAmount,
    output_amount: &CurrencyAmount,
) -> Result<Percent, SwapError> {
    let exact_quote = mid_price.raw() * &Fraction::from_integer(input_amount.raw().clone());
    let shortfall = &exact_quote - &Fraction::from_integer(output_amount.raw().clone());
    Ok(Percent::from(shortfall.checked_div(&exact_quote)?))
}

/// Orders trades with the same currencies: more output first, then less input.
pub fn input_output_comparator(a: &Trade, b: &Trade) -> Ordering {
    b.output_amount
        .raw()
        .cmp(a.output_amount.raw())
        .then_with(|| a.input_amount.raw().cmp(b.input_amount.raw()))
}

/// Ranking used by the search: [`input_output_comparator`], then lower price
/// impact, then fewer hops.
pub fn trade_comparator(a: &Trade, b: &Trade) -> Ordering {
    input_output_comparator(a, b)
        .then_with(|| a.price_impact.cmp(&b.price_impact))
        .then_with(|| a.route.path().len().cmp(&b.route.path().len()))
}

/// Insert `item` into the sorted `items`, keeping at most `max_size` entries.
/// Returns whichever item fell off the end, if any.
pub fn sorted_insert<T>(
    items: &mut Vec<T>,
    item: T,
    max_size: usize,
    comparator: impl Fn(&T, &T) -> Ordering,
) -> Option<T> {
    if max_size == 0 {
        return Some(item);
    }
    if items.len() >= max_size {
        if let Some(last) = items.last() {
            if comparator(last, &item) != Ordering::Greater {
                return Some(item);
            }
        }
    }

    let position = items.partition_point(|existing| comparator(existing, &item) != Ordering::Greater);
    items.insert(position, item);
    if items.len() > max_size {
        items.pop()
    } else {
        None
    }
}

struct ExactInSearch<'a> {
    amount_in: &'a CurrencyAmount,
    currency_out: &'a Currency,
    max_num_results: usize,
    best_trades: Vec<Trade>,
}

impl ExactInSearch<'_> {
    fn visit(
        &mut self,
        pools: &[Pool],
        max_hops: usize,
        current_pools: &[Pool],
        hop_amount_in: &TokenAmount,
    ) -> Result<(), SwapError> {
        let currency_out = self.currency_out;
        let token_out = currency_out.wrapped();

        for (i, pool) in pools.iter().enumerate() {
            if !pool.involves_token(hop_amount_in.token()) {
                continue;
            }
            if pool.reserve0().is_zero() || pool.reserve1().is_zero() {
                continue;
            }

            let hop_amount_out = match pool.output_for_input(hop_amount_in) {
                Ok((amount, _)) => amount,
                Err(err) if err.is_skippable() => {
                    trace!(pool = %pool.address(), %err, "skipping pool");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let mut next_pools = current_pools.to_vec();
            next_pools.push(pool.clone());

            if hop_amount_out.token() == token_out {
                let route = Route::new(
                    next_pools,
                    self.amount_in.currency().clone(),
                    self.currency_out.clone(),
                )?;
                let trade = Trade::exact_in(route, self.amount_in.clone())?;
                sorted_insert(&mut self.best_trades, trade, self.max_num_results, trade_comparator);
            } else if max_hops > 1 && pools.len() > 1 {
                let remaining: Vec<Pool> = pools[..i].iter().chain(&pools[i + 1..]).cloned().collect();
                self.visit(&remaining, max_hops - 1, &next_pools, &hop_amount_out)?;
            }
        }
        Ok(())
    }
}

struct ExactOutSearch<'a> {
    currency_in: &'a Currency,
    amount_out: &'a CurrencyAmount,
    max_num_results: usize,
    best_trades: Vec<Trade>,
}

impl ExactOutSearch<'_> {
    fn visit(
        &mut self,
        pools: &[Pool],
        max_hops: usize,
        current_pools: &[Pool],
        hop_amount_out: &TokenAmount,
    ) -> Result<(), SwapError> {
        let currency_in = self.currency_in;
        let token_in = currency_in.wrapped();

        for (i, pool) in pools.iter().enumerate() {
            if !pool.involves_token(hop_amount_out.token()) {
                continue;
            }
            if pool.reserve0().is_zero() || pool.reserve1().is_zero() {
                continue;
            }

            let hop_amount_in = match pool.input_for_output(hop_amount_out) {
                Ok((amount, _)) => amount,
                Err(err) if err.is_skippable() => {
                    trace!(pool = %pool.address(), %err, "skipping pool");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let mut next_pools = Vec::with_capacity(current_pools.len() + 1);
            next_pools.push(pool.clone());
            next_pools.extend_from_slice(current_pools);

            if hop_amount_in.token() == token_in {
                let route = Route::new(
                    next_pools,
                    self.currency_in.clone(),
                    self.amount_out.currency().clone(),
                )?;
                let trade = Trade::exact_out(route, self.amount_out.clone())?;
                sorted_insert(&mut self.best_trades, trade, self.max_num_results, trade_comparator);
            } else if max_hops > 1 && pools.len() > 1 {
                let remaining: Vec<Pool> = pools[..i].iter().chain(&pools[i + 1..]).cloned().collect();
                self.visit(&remaining, max_hops - 1, &next_pools, &hop_amount_in)?;
            }
        }
        Ok(())
    }
}
