//! Ordered chains of pools from an input currency to an output currency.

use crate::currency::{Currency, Token};
use crate::error::SwapError;
use crate::pool::Pool;
use crate::price::Price;
use crate::types::ChainId;
use std::fmt;

/// A validated path through one or more pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pools: Vec<Pool>,
    path: Vec<Token>,
    input: Currency,
    output: Currency,
}

impl Route {
    /// Build a route, checking that every hop connects to the next.
    pub fn new(pools: Vec<Pool>, input: Currency, output: Currency) -> Result<Self, SwapError> {
        let first = pools.first().ok_or(SwapError::InvalidRoute("no pools"))?;
        let chain_id = first.chain_id();
        if pools.iter().any(|pool| pool.chain_id() != chain_id) {
            return Err(SwapError::InvalidRoute("pools span multiple chains"));
        }
        if !first.involves_token(input.wrapped()) {
            return Err(SwapError::InvalidRoute("input not in first pool"));
        }
        let last = pools.last().ok_or(SwapError::InvalidRoute("no pools"))?;
        if !last.involves_token(output.wrapped()) {
            return Err(SwapError::InvalidRoute("output not in last pool"));
        }

        let mut path = Vec::with_capacity(pools.len() + 1);
        path.push(input.wrapped().clone());
        for pool in &pools {
            let current = &path[path.len() - 1];
            let next = if current == pool.token0() {
                pool.token1().clone()
            } else if current == pool.token1() {
                pool.token0().clone()
            } else {
                return Err(SwapError::InvalidRoute("disconnected pools"));
            };
            path.push(next);
        }
        if path.last() != Some(output.wrapped()) {
            return Err(SwapError::InvalidRoute("path does not end at output"));
        }

        Ok(Self {
            pools,
            path,
            input,
            output,
        })
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Tokens visited, starting with the wrapped input.
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    pub fn input(&self) -> &Currency {
        &self.input
    }

    pub fn output(&self) -> &Currency {
        &self.output
    }

    pub fn chain_id(&self) -> ChainId {
        self.path[0].chain_id
    }

    /// Number of pools traversed.
    pub fn hops(&self) -> usize {
        self.pools.len()
    }

    /// Spot price of the whole route: the product of every hop's price.
    pub fn mid_price(&self) -> Result<Price, SwapError> {
        let mut hops = self
            .pools
            .iter()
            .zip(&self.path)
            .map(|(pool, token)| pool.price_of(token));

        let mut price = hops
            .next()
            .ok_or(SwapError::InvalidRoute("no pools"))??;
        for hop in hops {
            price = price.multiply(&hop?)?;
        }

        Price::new(
            self.input.clone(),
            self.output.clone(),
            price.raw().denominator().clone(),
            price.raw().numerator().clone(),
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<&str> = self.path.iter().map(|token| token.symbol.as_str()).collect();
        write!(f, "{}", symbols.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::TokenAmount;
    use crate::currency::Native;
    use crate::math::Rounding;
    use crate::pool::{Fee, PoolType};
    use crate::types::Address;

    fn token(byte: u8, symbol: &str) -> Token {
        Token::new(1, Address::repeat_byte(byte), 18, symbol, symbol)
    }

    fn pool(a: &Token, ra: u64, b: &Token, rb: u64) -> Pool {
        Pool::with_address(
            Address::repeat_byte(a.address[0] ^ b.address[0] ^ 0x80),
            TokenAmount::new(a.clone(), ra),
            TokenAmount::new(b.clone(), rb),
            PoolType::ConstantProduct,
            Fee::ZERO,
        )
        .unwrap()
    }

    #[test]
    fn test_path_follows_pools() {
        let (a, b, c) = (token(1, "A"), token(2, "B"), token(3, "C"));
        let route = Route::new(
            vec![pool(&a, 100, &b, 200), pool(&c, 100, &b, 100)],
            a.clone().into(),
            c.clone().into(),
        )
        .unwrap();

        assert_eq!(route.path(), &[a, b, c]);
        assert_eq!(route.hops(), 2);
        assert_eq!(route.chain_id(), 1);
        assert_eq!(route.to_string(), "A -> B -> C");
    }

    #[test]
    fn test_rejects_bad_routes() {
        let (a, b, c, d) = (token(1, "A"), token(2, "B"), token(3, "C"), token(4, "D"));

        assert_eq!(
            Route::new(vec![], a.clone().into(), b.clone().into()).unwrap_err(),
            SwapError::InvalidRoute("no pools")
        );
        assert!(matches!(
            Route::new(vec![pool(&b, 1, &c, 1)], a.clone().into(), c.clone().into()),
            Err(SwapError::InvalidRoute(_))
        ));
        assert!(matches!(
            Route::new(
                vec![pool(&a, 1, &b, 1), pool(&c, 1, &d, 1)],
                a.clone().into(),
                d.clone().into()
            ),
            Err(SwapError::InvalidRoute(_))
        ));
        assert!(matches!(
            Route::new(vec![pool(&a, 1, &b, 1)], a.into(), c.into()),
            Err(SwapError::InvalidRoute(_))
        ));
    }

    #[test]
    fn test_mid_price_composes_hops() {
        let (a, b, c) = (token(1, "A"), token(2, "B"), token(3, "C"));
        let route = Route::new(
            vec![pool(&a, 100, &b, 200), pool(&b, 100, &c, 300)],
            a.clone().into(),
            c.clone().into(),
        )
        .unwrap();

        let mid = route.mid_price().unwrap();
        assert_eq!(mid.base_currency(), &Currency::from(a));
        assert_eq!(mid.quote_currency(), &Currency::from(c));
        assert_eq!(mid.to_significant(6, Rounding::RoundHalfUp).unwrap(), "6");

        let reverse = Route::new(
            route.pools().iter().rev().cloned().collect(),
            mid.quote_currency().clone(),
            mid.base_currency().clone(),
        )
        .unwrap();
        assert_eq!(reverse.mid_price().unwrap(), mid.invert().unwrap());
    }

    #[test]
    fn test_native_input_uses_wrapped_token() {
        let weth = token(1, "WETH");
        let usdc = token(2, "USDC");
        let eth = Currency::from(Native::new("ETH", "Ether", weth.clone()));

        let route = Route::new(
            vec![pool(&weth, 1000, &usdc, 2000)],
            eth.clone(),
            usdc.clone().into(),
        )
        .unwrap();

        assert_eq!(route.input(), &eth);
        assert_eq!(route.path()[0], weth);
        assert_eq!(route.mid_price().unwrap().base_currency(), &eth);
    }
}
