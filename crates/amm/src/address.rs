//! Deterministic pool addresses and the per-chain deployment table.
//!
//! A pool lives at the CREATE2 address of its factory, salted with the hash of
//! its sorted token addresses (and, for typed factories, its pool type and
//! fee). Derived addresses are memoised; entries are deterministic so racing
//! writers always agree.

use crate::currency::Token;
use crate::error::SwapError;
use crate::pool::{Fee, PoolType};
use crate::types::{Address, ChainId, B256};
use alloy::primitives::keccak256;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::trace;

/// Factory constants for one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Factory contract that deploys pools.
    pub factory: Address,
    /// Hash of the pool contract's creation code.
    pub init_code_hash: B256,
    /// Whether the salt also commits to the pool type and fee.
    pub typed_salts: bool,
}

impl Deployment {
    pub fn new(factory: Address, init_code_hash: B256) -> Self {
        Self {
            factory,
            init_code_hash,
            typed_salts: false,
        }
    }

    pub fn with_typed_salts(mut self, typed: bool) -> Self {
        self.typed_salts = typed;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PoolKey {
    chain_id: ChainId,
    token0: Address,
    token1: Address,
    pool_type: PoolType,
    fee: Fee,
}

/// Deployments by chain plus a cache of derived pool addresses.
#[derive(Debug, Default)]
pub struct AddressBook {
    deployments: HashMap<ChainId, Deployment>,
    cache: RwLock<HashMap<PoolKey, Address>>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the deployment for a chain.
    pub fn with_deployment(mut self, chain_id: ChainId, deployment: Deployment) -> Self {
        self.insert_deployment(chain_id, deployment);
        self
    }

    pub fn insert_deployment(&mut self, chain_id: ChainId, deployment: Deployment) {
        self.deployments.insert(chain_id, deployment);
        // Addresses derived from the old constants are stale.
        self.cache.get_mut().retain(|key, _| key.chain_id != chain_id);
    }

    pub fn deployment(&self, chain_id: ChainId) -> Option<&Deployment> {
        self.deployments.get(&chain_id)
    }

    /// Address of the pool for two tokens, independent of argument order.
    pub fn pool_address(
        &self,
        token_a: &Token,
        token_b: &Token,
        pool_type: PoolType,
        fee: Fee,
    ) -> Result<Address, SwapError> {
        let (token0, token1) = if token_a.sorts_before(token_b)? {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        let key = PoolKey {
            chain_id: token0.chain_id,
            token0: token0.address,
            token1: token1.address,
            pool_type,
            fee,
        };

        if let Some(address) = self.cache.read().get(&key) {
            return Ok(*address);
        }

        let deployment = self
            .deployments
            .get(&key.chain_id)
            .ok_or(SwapError::UnknownChain(key.chain_id))?;
        let address =
            compute_pool_address(deployment, token0.address, token1.address, pool_type, fee);
        trace!(chain_id = key.chain_id, %address, "derived pool address");

        self.cache.write().insert(key, address);
        Ok(address)
    }

    /// Number of memoised addresses.
    pub fn cached_addresses(&self) -> usize {
        self.cache.read().len()
    }
}

/// CREATE2 address of a pool. `token0` must sort before `token1`.
pub fn compute_pool_address(
    deployment: &Deployment,
    token0: Address,
    token1: Address,
    pool_type: PoolType,
    fee: Fee,
) -> Address {
    let mut salt_input = Vec::with_capacity(43);
    salt_input.extend_from_slice(token0.as_slice());
    salt_input.extend_from_slice(token1.as_slice());
    if deployment.typed_salts {
        salt_input.push(pool_type.code());
        salt_input.extend_from_slice(&fee.bps().to_be_bytes());
    }
    let salt = keccak256(&salt_input);
    deployment
        .factory
        .create2(salt.0, deployment.init_code_hash.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256};

    fn mainnet() -> Deployment {
        Deployment::new(
            address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
            b256!("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"),
        )
    }

    fn usdc() -> Token {
        Token::new(
            1,
            address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            6,
            "USDC",
            "USD Coin",
        )
    }

    fn dai() -> Token {
        Token::new(
            1,
            address!("6B175474E89094C44Da98b954EedeAC495271d0F"),
            18,
            "DAI",
            "Dai Stablecoin",
        )
    }

    #[test]
    fn test_untyped_address_matches_factory() {
        let book = AddressBook::new().with_deployment(1, mainnet());
        let address = book
            .pool_address(&usdc(), &dai(), PoolType::ConstantProduct, Fee::ZERO)
            .unwrap();
        assert_eq!(address, address!("AE461cA67B15dc8dc81CE7615e0320dA1A9aB8D5"));
    }

    #[test]
    fn test_address_independent_of_order() {
        let book = AddressBook::new().with_deployment(1, mainnet());
        let ab = book
            .pool_address(&usdc(), &dai(), PoolType::ConstantProduct, Fee::ZERO)
            .unwrap();
        let ba = book
            .pool_address(&dai(), &usdc(), PoolType::ConstantProduct, Fee::ZERO)
            .unwrap();
        assert_eq!(ab, ba);
        assert_eq!(book.cached_addresses(), 1);
    }

    #[test]
    fn test_typed_salts_distinguish_pools() {
        let book = AddressBook::new().with_deployment(1, mainnet().with_typed_salts(true));
        let fee = Fee::from_tier(3).unwrap();

        let standard = book
            .pool_address(&usdc(), &dai(), PoolType::ConstantProduct, fee)
            .unwrap();
        let weighted = book
            .pool_address(&usdc(), &dai(), PoolType::Weighted4, fee)
            .unwrap();
        let other_fee = book
            .pool_address(
                &usdc(),
                &dai(),
                PoolType::ConstantProduct,
                Fee::from_tier(5).unwrap(),
            )
            .unwrap();

        assert_ne!(standard, weighted);
        assert_ne!(standard, other_fee);
        assert_ne!(standard, address!("AE461cA67B15dc8dc81CE7615e0320dA1A9aB8D5"));
    }

    #[test]
    fn test_unknown_chain() {
        let book = AddressBook::new();
        assert_eq!(
            book.pool_address(&usdc(), &dai(), PoolType::ConstantProduct, Fee::ZERO)
                .unwrap_err(),
            SwapError::UnknownChain(1)
        );
    }

    #[test]
    fn test_identical_tokens_rejected() {
        let book = AddressBook::new().with_deployment(1, mainnet());
        assert_eq!(
            book.pool_address(&dai(), &dai(), PoolType::ConstantProduct, Fee::ZERO)
                .unwrap_err(),
            SwapError::IdenticalTokens
        );
    }

    #[test]
    fn test_replacing_deployment_invalidates_cache() {
        let mut book = AddressBook::new().with_deployment(1, mainnet());
        let before = book
            .pool_address(&usdc(), &dai(), PoolType::ConstantProduct, Fee::ZERO)
            .unwrap();

        book.insert_deployment(1, mainnet().with_typed_salts(true));
        assert_eq!(book.cached_addresses(), 0);

        let after = book
            .pool_address(&usdc(), &dai(), PoolType::ConstantProduct, Fee::ZERO)
            .unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_concurrent_population_agrees() {
        let book = AddressBook::new().with_deployment(1, mainnet());
        let results: Vec<Address> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        book.pool_address(&usdc(), &dai(), PoolType::ConstantProduct, Fee::ZERO)
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.iter().all(|a| *a == results[0]));
        assert_eq!(book.cached_addresses(), 1);
    }
}
