//! Route search configuration.

use crate::error::SwapError;
use crate::fraction::Percent;

/// Bounds for the best-trade search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTradeOptions {
    /// How many trades to return at most.
    pub max_num_results: usize,
    /// Maximum number of pools a returned trade may pass through.
    pub max_hops: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_num_results: 3,
            max_hops: 3,
        }
    }
}

impl BestTradeOptions {
    pub fn with_max_num_results(mut self, max_num_results: usize) -> Self {
        self.max_num_results = max_num_results;
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SwapError> {
        if self.max_hops == 0 {
            return Err(SwapError::InvalidSearchOptions("max_hops must be positive"));
        }
        if self.max_num_results == 0 {
            return Err(SwapError::InvalidSearchOptions(
                "max_num_results must be positive",
            ));
        }
        Ok(())
    }
}

/// Configuration for a [`PoolRegistry`](crate::PoolRegistry).
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Search bounds applied to every quote.
    pub trade_options: BestTradeOptions,

    /// Default slippage tolerance in basis points (1 bp = 0.01%).
    /// For example, 50 = 0.50%.
    pub slippage_bps: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            trade_options: BestTradeOptions::default(),
            slippage_bps: 50, // 0.50%
        }
    }
}

impl RouterConfig {
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.trade_options.max_hops = max_hops;
        self
    }

    pub fn with_max_num_results(mut self, max_num_results: usize) -> Self {
        self.trade_options.max_num_results = max_num_results;
        self
    }

    pub fn with_slippage_bps(mut self, slippage_bps: u32) -> Self {
        self.slippage_bps = slippage_bps;
        self
    }

    pub fn slippage_tolerance(&self) -> Percent {
        Percent::from_bps(self.slippage_bps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.trade_options.max_num_results, 3);
        assert_eq!(config.trade_options.max_hops, 3);
        assert_eq!(config.slippage_tolerance(), Percent::from_bps(50));
    }

    #[test]
    fn test_builders() {
        let config = RouterConfig::default()
            .with_max_hops(2)
            .with_max_num_results(5)
            .with_slippage_bps(100);
        assert_eq!(
            config.trade_options,
            BestTradeOptions::default()
                .with_max_hops(2)
                .with_max_num_results(5)
        );
        assert_eq!(config.slippage_tolerance(), Percent::new(1, 100).unwrap());
    }

    #[test]
    fn test_validation() {
        assert!(BestTradeOptions::default().validate().is_ok());
        assert!(BestTradeOptions::default().with_max_hops(0).validate().is_err());
        assert!(BestTradeOptions::default()
            .with_max_num_results(0)
            .validate()
            .is_err());
    }
}
