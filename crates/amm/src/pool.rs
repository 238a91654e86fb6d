//! Two-token liquidity pools and their swap and liquidity math.

use crate::address::AddressBook;
use crate::amount::TokenAmount;
use crate::currency::Token;
use crate::error::SwapError;
use crate::math::floor_sqrt;
use crate::price::Price;
use crate::types::{Address, BigInt, ChainId, BPS_DENOMINATOR, MINIMUM_LIQUIDITY};
use num_traits::{Signed, Zero};
use std::fmt;

/// Curve scaling exponent assumed when a pool does not specify one.
pub const DEFAULT_EXPONENT: u32 = 32;

/// Decimals of every pool's liquidity token.
pub const LIQUIDITY_TOKEN_DECIMALS: u8 = 18;

/// The curve a pool prices along.
///
/// Weighted curves count the input-side reserve several times over, which
/// flattens the price response for small trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoolType {
    /// `x * y = k`. Code 1.
    #[default]
    ConstantProduct,
    /// Input reserve weighted 4x. Code 2.
    Weighted4,
    /// Input reserve weighted 32x. Code 4.
    Weighted32,
}

impl PoolType {
    /// Numeric code used by factories and indexers.
    pub fn code(self) -> u8 {
        match self {
            PoolType::ConstantProduct => 1,
            PoolType::Weighted4 => 2,
            PoolType::Weighted32 => 4,
        }
    }

    /// Gross output for an exact input, before fees.
    fn output_amount(self, reserve_in: &BigInt, reserve_out: &BigInt, amount_in: &BigInt) -> BigInt {
        match self {
            PoolType::ConstantProduct => reserve_out * amount_in / (reserve_in + amount_in),
            PoolType::Weighted4 => {
                reserve_out * amount_in / (reserve_in * BigInt::from(4u32) + amount_in)
            }
            PoolType::Weighted32 => {
                reserve_out * amount_in / (reserve_in * BigInt::from(32u32) + amount_in)
            }
        }
    }

    /// Gross input for an exact output, before fees. `amount_out < reserve_out`.
    fn input_amount(self, reserve_in: &BigInt, reserve_out: &BigInt, amount_out: &BigInt) -> BigInt {
        let remaining = reserve_out - amount_out;
        match self {
            PoolType::ConstantProduct => reserve_in * amount_out / remaining,
            PoolType::Weighted4 => reserve_in * BigInt::from(4u32) * amount_out / remaining,
            PoolType::Weighted32 => reserve_in * BigInt::from(32u32) * amount_out / remaining,
        }
    }
}

impl TryFrom<u8> for PoolType {
    type Error = SwapError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PoolType::ConstantProduct),
            2 => Ok(PoolType::Weighted4),
            4 => Ok(PoolType::Weighted32),
            other => Err(SwapError::InvalidPoolType(other)),
        }
    }
}

/// Swap fee in basis points, taken from the output of every swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Fee(u16);

impl Fee {
    pub const ZERO: Fee = Fee(0);

    /// A fee of `bps / 10_000`. Must be below 100%.
    pub fn from_bps(bps: u32) -> Result<Self, SwapError> {
        if bps >= BPS_DENOMINATOR {
            return Err(SwapError::InvalidFee(bps));
        }
        Ok(Fee(bps as u16))
    }

    /// A legacy fee tier: 3, 5 or 10 percent of the swap output (0 for none).
    pub fn from_tier(tier: u8) -> Result<Self, SwapError> {
        match tier {
            0 => Ok(Fee::ZERO),
            3 | 5 | 10 => Ok(Fee(u16::from(tier) * 100)),
            other => Err(SwapError::InvalidFee(u32::from(other))),
        }
    }

    pub fn bps(self) -> u16 {
        self.0
    }

    fn deduct(self, amount: &BigInt) -> BigInt {
        amount * BigInt::from(BPS_DENOMINATOR - u32::from(self.0)) / BigInt::from(BPS_DENOMINATOR)
    }

    fn add_back(self, amount: &BigInt) -> BigInt {
        amount * BigInt::from(BPS_DENOMINATOR + u32::from(self.0)) / BigInt::from(BPS_DENOMINATOR)
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}

/// A liquidity pool holding reserves of two tokens.
///
/// `token0` always sorts before `token1`. Pools are immutable; swaps return the
/// pool as it would be after the trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    address: Address,
    reserves: [TokenAmount; 2],
    pool_type: PoolType,
    fee: Fee,
    exponents: [u32; 2],
}

impl Pool {
    /// Create a pool whose address is derived from the chain's deployment.
    pub fn new(
        amount_a: TokenAmount,
        amount_b: TokenAmount,
        pool_type: PoolType,
        fee: Fee,
        addresses: &AddressBook,
    ) -> Result<Self, SwapError> {
        let address = addresses.pool_address(amount_a.token(), amount_b.token(), pool_type, fee)?;
        Self::with_address(address, amount_a, amount_b, pool_type, fee)
    }

    /// Create a pool at an already known address.
    pub fn with_address(
        address: Address,
        amount_a: TokenAmount,
        amount_b: TokenAmount,
        pool_type: PoolType,
        fee: Fee,
    ) -> Result<Self, SwapError> {
        let reserves = if amount_a.token().sorts_before(amount_b.token())? {
            [amount_a, amount_b]
        } else {
            [amount_b, amount_a]
        };
        Ok(Self {
            address,
            reserves,
            pool_type,
            fee,
            exponents: [DEFAULT_EXPONENT; 2],
        })
    }

    /// Override the curve scaling exponents of token0 and token1.
    pub fn with_exponents(mut self, exponent0: u32, exponent1: u32) -> Self {
        self.exponents = [exponent0, exponent1];
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> ChainId {
        self.token0().chain_id
    }

    pub fn token0(&self) -> &Token {
        self.reserves[0].token()
    }

    pub fn token1(&self) -> &Token {
        self.reserves[1].token()
    }

    pub fn reserve0(&self) -> &TokenAmount {
        &self.reserves[0]
    }

    pub fn reserve1(&self) -> &TokenAmount {
        &self.reserves[1]
    }

    pub fn pool_type(&self) -> PoolType {
        self.pool_type
    }

    pub fn fee(&self) -> Fee {
        self.fee
    }

    /// Curve scaling exponents of token0 and token1.
    pub fn exponents(&self) -> (u32, u32) {
        (self.exponents[0], self.exponents[1])
    }

    /// The token minted to liquidity providers, deployed at the pool address.
    pub fn liquidity_token(&self) -> Token {
        Token::new(
            self.chain_id(),
            self.address,
            LIQUIDITY_TOKEN_DECIMALS,
            "AMM-LP",
            "AMM Liquidity",
        )
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        token == self.token0() || token == self.token1()
    }

    pub fn reserve_of(&self, token: &Token) -> Result<&TokenAmount, SwapError> {
        self.directional_reserves(token).map(|(reserve, _)| reserve)
    }

    /// Price of token0 in terms of token1.
    pub fn token0_price(&self) -> Result<Price, SwapError> {
        Price::new(
            self.token0().clone(),
            self.token1().clone(),
            self.reserves[0].raw().clone(),
            self.reserves[1].raw().clone(),
        )
    }

    /// Price of token1 in terms of token0.
    pub fn token1_price(&self) -> Result<Price, SwapError> {
        Price::new(
            self.token1().clone(),
            self.token0().clone(),
            self.reserves[1].raw().clone(),
            self.reserves[0].raw().clone(),
        )
    }

    /// Price of `token` in terms of the other token.
    pub fn price_of(&self, token: &Token) -> Result<Price, SwapError> {
        if token == self.token0() {
            self.token0_price()
        } else if token == self.token1() {
            self.token1_price()
        } else {
            Err(SwapError::CurrencyMismatch)
        }
    }

    /// Amount received for an exact input, and the pool after the swap.
    pub fn output_for_input(&self, input: &TokenAmount) -> Result<(TokenAmount, Pool), SwapError> {
        let (reserve_in, reserve_out) = self.directional_reserves(input.token())?;
        if !reserve_in.raw().is_positive() || !reserve_out.raw().is_positive() {
            return Err(SwapError::InsufficientReserves);
        }
        if input.raw().is_negative() {
            return Err(SwapError::InsufficientInputAmount);
        }

        let gross = self
            .pool_type
            .output_amount(reserve_in.raw(), reserve_out.raw(), input.raw());
        let net = self.fee.deduct(&gross);
        if !net.is_positive() {
            return Err(SwapError::InsufficientInputAmount);
        }

        let output = TokenAmount::new(reserve_out.token().clone(), net);
        let next = self.with_reserves(reserve_in.add(input)?, reserve_out.subtract(&output)?);
        Ok((output, next))
    }

    /// Amount required for an exact output, and the pool after the swap.
    pub fn input_for_output(&self, output: &TokenAmount) -> Result<(TokenAmount, Pool), SwapError> {
        let (reserve_out, reserve_in) = self.directional_reserves(output.token())?;
        if !reserve_in.raw().is_positive() || !reserve_out.raw().is_positive() {
            return Err(SwapError::InsufficientReserves);
        }
        if output.raw() >= reserve_out.raw() {
            return Err(SwapError::InsufficientReserves);
        }
        if output.raw().is_negative() {
            return Err(SwapError::InsufficientInputAmount);
        }

        let gross = self
            .pool_type
            .input_amount(reserve_in.raw(), reserve_out.raw(), output.raw());
        let with_fee = self.fee.add_back(&gross);
        if !with_fee.is_positive() {
            return Err(SwapError::InsufficientInputAmount);
        }

        let input = TokenAmount::new(reserve_in.token().clone(), with_fee);
        let next = self.with_reserves(reserve_in.add(&input)?, reserve_out.subtract(output)?);
        Ok((input, next))
    }

    /// Liquidity minted for depositing `amount_a` and `amount_b` when
    /// `total_supply` liquidity tokens exist.
    pub fn minted_liquidity(
        &self,
        total_supply: &TokenAmount,
        amount_a: &TokenAmount,
        amount_b: &TokenAmount,
    ) -> Result<TokenAmount, SwapError> {
        let liquidity_token = self.liquidity_token();
        if total_supply.token() != &liquidity_token {
            return Err(SwapError::CurrencyMismatch);
        }
        let (amount0, amount1) = if amount_a.token().sorts_before(amount_b.token())? {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        if amount0.token() != self.token0() || amount1.token() != self.token1() {
            return Err(SwapError::CurrencyMismatch);
        }

        let liquidity = if total_supply.is_zero() {
            floor_sqrt(&(amount0.raw() * amount1.raw()))? - BigInt::from(MINIMUM_LIQUIDITY)
        } else {
            let (reserve0, reserve1) = (self.reserves[0].raw(), self.reserves[1].raw());
            if !reserve0.is_positive() || !reserve1.is_positive() {
                return Err(SwapError::InsufficientReserves);
            }
            let from0 = amount0.raw() * total_supply.raw() / reserve0;
            let from1 = amount1.raw() * total_supply.raw() / reserve1;
            from0.min(from1)
        };
        if !liquidity.is_positive() {
            return Err(SwapError::InsufficientInputAmount);
        }
        Ok(TokenAmount::new(liquidity_token, liquidity))
    }

    /// Amount of `token` redeemable for `liquidity`.
    ///
    /// `k_last` is the reserve product recorded at the last fee mint and is
    /// `Some` only when the protocol fee is switched on; the fee liquidity that
    /// would be minted on withdrawal is then added to the supply.
    pub fn liquidity_value(
        &self,
        token: &Token,
        total_supply: &TokenAmount,
        liquidity: &TokenAmount,
        k_last: Option<&BigInt>,
    ) -> Result<TokenAmount, SwapError> {
        let reserve = self.reserve_of(token)?;
        let liquidity_token = self.liquidity_token();
        if total_supply.token() != &liquidity_token || liquidity.token() != &liquidity_token {
            return Err(SwapError::CurrencyMismatch);
        }
        if !total_supply.raw().is_positive() || liquidity.raw() > total_supply.raw() {
            return Err(SwapError::InsufficientReserves);
        }

        let supply = match k_last {
            Some(k_last) if !k_last.is_zero() => {
                let root_k = floor_sqrt(&(self.reserves[0].raw() * self.reserves[1].raw()))?;
                let root_k_last = floor_sqrt(k_last)?;
                if root_k > root_k_last {
                    let numerator = total_supply.raw() * (&root_k - &root_k_last);
                    let denominator = &root_k * BigInt::from(5u32) + &root_k_last;
                    total_supply.raw() + numerator / denominator
                } else {
                    total_supply.raw().clone()
                }
            }
            _ => total_supply.raw().clone(),
        };

        Ok(TokenAmount::new(
            token.clone(),
            liquidity.raw() * reserve.raw() / supply,
        ))
    }

    /// `(reserve of token, reserve of the other token)`.
    fn directional_reserves(&self, token: &Token) -> Result<(&TokenAmount, &TokenAmount), SwapError> {
        if token == self.token0() {
            Ok((&self.reserves[0], &self.reserves[1]))
        } else if token == self.token1() {
            Ok((&self.reserves[1], &self.reserves[0]))
        } else {
            Err(SwapError::CurrencyMismatch)
        }
    }

    fn with_reserves(&self, amount_a: TokenAmount, amount_b: TokenAmount) -> Pool {
        let reserves = if amount_a.token() == self.token0() {
            [amount_a, amount_b]
        } else {
            [amount_b, amount_a]
        };
        Pool {
            reserves,
            ..self.clone()
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} (type {}, {})",
            self.token0(),
            self.token1(),
            self.pool_type.code(),
            self.fee
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Deployment;
    use crate::currency::Currency;
    use crate::types::B256;

    fn token(byte: u8, symbol: &str) -> Token {
        Token::new(1, Address::repeat_byte(byte), 18, symbol, symbol)
    }

    fn book() -> AddressBook {
        AddressBook::new().with_deployment(
            1,
            Deployment::new(Address::repeat_byte(0xfa), B256::repeat_byte(0x11)),
        )
    }

    fn pool(r0: u64, r1: u64, pool_type: PoolType, fee: Fee) -> Pool {
        Pool::new(
            TokenAmount::new(token(1, "A"), r0),
            TokenAmount::new(token(2, "B"), r1),
            pool_type,
            fee,
            &book(),
        )
        .unwrap()
    }

    #[test]
    fn test_token0_sorts_first_regardless_of_argument_order() {
        let forward = pool(100, 200, PoolType::ConstantProduct, Fee::ZERO);
        let backward = Pool::new(
            TokenAmount::new(token(2, "B"), 200),
            TokenAmount::new(token(1, "A"), 100),
            PoolType::ConstantProduct,
            Fee::ZERO,
            &book(),
        )
        .unwrap();

        assert_eq!(forward, backward);
        assert_eq!(backward.token0(), &token(1, "A"));
        assert_eq!(backward.reserve0().raw(), &BigInt::from(100));
        assert_eq!(backward.reserve1().raw(), &BigInt::from(200));
    }

    #[test]
    fn test_identical_tokens_rejected() {
        let result = Pool::with_address(
            Address::ZERO,
            TokenAmount::new(token(1, "A"), 1),
            TokenAmount::new(token(1, "A"), 1),
            PoolType::ConstantProduct,
            Fee::ZERO,
        );
        assert_eq!(result.unwrap_err(), SwapError::IdenticalTokens);
    }

    #[test]
    fn test_single_hop_output_with_tier_fee() {
        let pool = pool(1000, 1000, PoolType::ConstantProduct, Fee::from_tier(3).unwrap());
        let (output, next) = pool
            .output_for_input(&TokenAmount::new(token(1, "A"), 100))
            .unwrap();

        // floor(1000 * 100 / 1100) = 90, then floor(90 * 97 / 100) = 87
        assert_eq!(output.token(), &token(2, "B"));
        assert_eq!(output.raw(), &BigInt::from(87));
        assert_eq!(next.reserve0().raw(), &BigInt::from(1100));
        assert_eq!(next.reserve1().raw(), &BigInt::from(913));
        assert_eq!(next.address(), pool.address());
        assert_eq!(next.fee(), pool.fee());
    }

    #[test]
    fn test_weighted_curves() {
        let input = TokenAmount::new(token(1, "A"), 100);

        let (out4, _) = pool(1000, 1000, PoolType::Weighted4, Fee::ZERO)
            .output_for_input(&input)
            .unwrap();
        // 1000 * 100 / (4000 + 100)
        assert_eq!(out4.raw(), &BigInt::from(24));

        let (out32, _) = pool(1000, 1000, PoolType::Weighted32, Fee::ZERO)
            .output_for_input(&input)
            .unwrap();
        // 1000 * 100 / (32000 + 100)
        assert_eq!(out32.raw(), &BigInt::from(3));

        let (in4, _) = pool(1000, 1000, PoolType::Weighted4, Fee::ZERO)
            .input_for_output(&TokenAmount::new(token(2, "B"), 24))
            .unwrap();
        // 1000 * 4 * 24 / 976
        assert_eq!(in4.raw(), &BigInt::from(98));
    }

    #[test]
    fn test_zero_reserve_is_insufficient() {
        let empty = pool(0, 1000, PoolType::ConstantProduct, Fee::ZERO);
        assert_eq!(
            empty
                .output_for_input(&TokenAmount::new(token(1, "A"), 100))
                .unwrap_err(),
            SwapError::InsufficientReserves
        );
        assert_eq!(
            empty
                .output_for_input(&TokenAmount::new(token(2, "B"), 100))
                .unwrap_err(),
            SwapError::InsufficientReserves
        );
        assert_eq!(
            empty
                .input_for_output(&TokenAmount::new(token(2, "B"), 1))
                .unwrap_err(),
            SwapError::InsufficientReserves
        );
    }

    #[test]
    fn test_tiny_input_is_insufficient() {
        let pool = pool(1_000_000, 1000, PoolType::ConstantProduct, Fee::ZERO);
        assert_eq!(
            pool.output_for_input(&TokenAmount::new(token(1, "A"), 1))
                .unwrap_err(),
            SwapError::InsufficientInputAmount
        );
        assert_eq!(
            pool.output_for_input(&TokenAmount::new(token(1, "A"), -5))
                .unwrap_err(),
            SwapError::InsufficientInputAmount
        );
    }

    #[test]
    fn test_foreign_token_rejected() {
        let pool = pool(1000, 1000, PoolType::ConstantProduct, Fee::ZERO);
        assert_eq!(
            pool.output_for_input(&TokenAmount::new(token(9, "X"), 10))
                .unwrap_err(),
            SwapError::CurrencyMismatch
        );
    }

    #[test]
    fn test_exact_output() {
        let pool = pool(1000, 1000, PoolType::ConstantProduct, Fee::from_tier(3).unwrap());
        let (input, next) = pool
            .input_for_output(&TokenAmount::new(token(2, "B"), 87))
            .unwrap();

        // floor(1000 * 87 / 913) = 95, then floor(95 * 103 / 100) = 97
        assert_eq!(input.token(), &token(1, "A"));
        assert_eq!(input.raw(), &BigInt::from(97));
        assert_eq!(next.reserve0().raw(), &BigInt::from(1097));
        assert_eq!(next.reserve1().raw(), &BigInt::from(913));
    }

    #[test]
    fn test_exact_output_bounded_by_reserve() {
        let pool = pool(1000, 1000, PoolType::ConstantProduct, Fee::ZERO);
        for requested in [1000, 1001] {
            assert_eq!(
                pool.input_for_output(&TokenAmount::new(token(2, "B"), requested))
                    .unwrap_err(),
                SwapError::InsufficientReserves
            );
        }
    }

    #[test]
    fn test_fee_validation() {
        assert_eq!(Fee::from_tier(5).unwrap().bps(), 500);
        assert_eq!(Fee::from_tier(10).unwrap().bps(), 1000);
        assert_eq!(Fee::from_tier(0).unwrap(), Fee::ZERO);
        assert_eq!(Fee::from_tier(4).unwrap_err(), SwapError::InvalidFee(4));
        assert_eq!(Fee::from_bps(30).unwrap().bps(), 30);
        assert_eq!(Fee::from_bps(10_000).unwrap_err(), SwapError::InvalidFee(10_000));
    }

    #[test]
    fn test_pool_type_codes() {
        for pool_type in [PoolType::ConstantProduct, PoolType::Weighted4, PoolType::Weighted32] {
            assert_eq!(PoolType::try_from(pool_type.code()).unwrap(), pool_type);
        }
        assert_eq!(PoolType::try_from(3).unwrap_err(), SwapError::InvalidPoolType(3));
    }

    #[test]
    fn test_prices() {
        let pool = pool(100, 300, PoolType::ConstantProduct, Fee::ZERO);
        let a = token(1, "A");
        let b = token(2, "B");

        let price0 = pool.price_of(&a).unwrap();
        assert_eq!(price0.base_currency(), &Currency::from(a.clone()));
        assert_eq!(price0.to_significant(3, Default::default()).unwrap(), "3");

        let price1 = pool.price_of(&b).unwrap();
        assert_eq!(price1, pool.token0_price().unwrap().invert().unwrap());
        assert_eq!(
            pool.price_of(&token(9, "X")).unwrap_err(),
            SwapError::CurrencyMismatch
        );
    }

    #[test]
    fn test_default_exponents_carried_through_swaps() {
        let pool = pool(1000, 1000, PoolType::ConstantProduct, Fee::ZERO);
        assert_eq!(pool.exponents(), (DEFAULT_EXPONENT, DEFAULT_EXPONENT));

        let custom = pool.with_exponents(16, 64);
        let (_, next) = custom
            .output_for_input(&TokenAmount::new(token(1, "A"), 10))
            .unwrap();
        assert_eq!(next.exponents(), (16, 64));
    }

    #[test]
    fn test_first_mint() {
        let pool = pool(0, 0, PoolType::ConstantProduct, Fee::ZERO);
        let supply = TokenAmount::new(pool.liquidity_token(), 0);

        let minted = pool
            .minted_liquidity(
                &supply,
                &TokenAmount::new(token(1, "A"), 2000),
                &TokenAmount::new(token(2, "B"), 2000),
            )
            .unwrap();
        assert_eq!(minted.token(), &pool.liquidity_token());
        assert_eq!(minted.raw(), &BigInt::from(1000));

        assert_eq!(
            pool.minted_liquidity(
                &supply,
                &TokenAmount::new(token(1, "A"), 1000),
                &TokenAmount::new(token(2, "B"), 1000),
            )
            .unwrap_err(),
            SwapError::InsufficientInputAmount
        );
    }

    #[test]
    fn test_subsequent_mint_takes_minimum_share() {
        let pool = pool(10_000, 10_000, PoolType::ConstantProduct, Fee::ZERO);
        let supply = TokenAmount::new(pool.liquidity_token(), 10_000);

        let minted = pool
            .minted_liquidity(
                &supply,
                &TokenAmount::new(token(2, "B"), 3000),
                &TokenAmount::new(token(1, "A"), 2000),
            )
            .unwrap();
        assert_eq!(minted.raw(), &BigInt::from(2000));
    }

    #[test]
    fn test_mint_rejects_wrong_tokens() {
        let pool = pool(10_000, 10_000, PoolType::ConstantProduct, Fee::ZERO);
        let wrong_supply = TokenAmount::new(token(1, "A"), 10_000);
        assert_eq!(
            pool.minted_liquidity(
                &wrong_supply,
                &TokenAmount::new(token(1, "A"), 1),
                &TokenAmount::new(token(2, "B"), 1),
            )
            .unwrap_err(),
            SwapError::CurrencyMismatch
        );
    }

    #[test]
    fn test_liquidity_value_without_protocol_fee() {
        let pool = pool(1000, 1000, PoolType::ConstantProduct, Fee::ZERO);
        let lp = pool.liquidity_token();

        let full = pool
            .liquidity_value(
                &token(1, "A"),
                &TokenAmount::new(lp.clone(), 1000),
                &TokenAmount::new(lp.clone(), 1000),
                None,
            )
            .unwrap();
        assert_eq!(full.raw(), &BigInt::from(1000));

        let half = pool
            .liquidity_value(
                &token(2, "B"),
                &TokenAmount::new(lp.clone(), 1000),
                &TokenAmount::new(lp.clone(), 500),
                None,
            )
            .unwrap();
        assert_eq!(half.token(), &token(2, "B"));
        assert_eq!(half.raw(), &BigInt::from(500));

        assert_eq!(
            pool.liquidity_value(
                &token(1, "A"),
                &TokenAmount::new(lp.clone(), 100),
                &TokenAmount::new(lp, 101),
                None,
            )
            .unwrap_err(),
            SwapError::InsufficientReserves
        );
    }

    #[test]
    fn test_liquidity_value_with_protocol_fee() {
        let pool = pool(1000, 1000, PoolType::ConstantProduct, Fee::ZERO);
        let lp = pool.liquidity_token();

        // rootK = 1000, rootKLast = 500: fee liquidity = 500 * 500 / 5500 = 45
        let value = pool
            .liquidity_value(
                &token(1, "A"),
                &TokenAmount::new(lp.clone(), 500),
                &TokenAmount::new(lp, 500),
                Some(&BigInt::from(250_000)),
            )
            .unwrap();
        assert_eq!(value.raw(), &BigInt::from(917));
    }
}
