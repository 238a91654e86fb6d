//! Command-line quoter for AMM pool markets.
//!
//! Loads a market description, searches for the best trades between two
//! currencies and prints them ranked, best first.
//!
//! Run with: `cargo run -p amm-quoter -- crates/quoter/markets/mainnet.json ETH DAI 1.5`

mod market;

use crate::market::Market;
use amm::{ChainId, CurrencyAmount, Percent, RouterConfig, Trade, TradeType};
use clap::Parser;
use eyre::WrapErr;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "amm-quoter")]
#[command(about = "Find the best trades through a set of AMM pools")]
struct Cli {
    /// Market description file (JSON)
    market: PathBuf,

    /// Currency to pay, by symbol or token address
    from: String,

    /// Currency to receive, by symbol or token address
    to: String,

    /// Amount in whole units; the input amount unless --exact-out is set
    amount: String,

    /// Treat the amount as the exact output to receive
    #[arg(long)]
    exact_out: bool,

    /// Chain to resolve symbols on when several chains share one
    #[arg(long)]
    chain: Option<ChainId>,

    /// Maximum number of pools per route
    #[arg(long, default_value_t = 3)]
    max_hops: usize,

    /// Maximum number of trades to print
    #[arg(long, default_value_t = 3)]
    max_results: usize,

    /// Slippage tolerance in basis points
    #[arg(long, default_value_t = 50)]
    slippage_bps: u32,

    /// Print the trades as JSON
    #[arg(long)]
    json: bool,
}

/// One ranked trade as printed to the user.
#[derive(Debug, Serialize)]
struct TradeReport {
    rank: usize,
    route: String,
    pools: Vec<String>,
    input: String,
    output: String,
    execution_price: String,
    price_impact: String,
    /// Minimum output for exact-in trades, maximum input for exact-out trades.
    amount_limit: String,
}

impl TradeReport {
    fn new(rank: usize, trade: &Trade, slippage: &Percent) -> eyre::Result<Self> {
        let amount_limit = match trade.trade_type() {
            TradeType::ExactInput => trade.minimum_amount_out(slippage)?,
            TradeType::ExactOutput => trade.maximum_amount_in(slippage)?,
        };
        Ok(Self {
            rank,
            route: trade.route().to_string(),
            pools: trade
                .route()
                .pools()
                .iter()
                .map(|pool| pool.address().to_string())
                .collect(),
            input: trade.input_amount().to_string(),
            output: trade.output_amount().to_string(),
            execution_price: trade.execution_price().to_string(),
            price_impact: trade.price_impact().to_string(),
            amount_limit: amount_limit.to_string(),
        })
    }
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RouterConfig::default()
        .with_max_hops(cli.max_hops)
        .with_max_num_results(cli.max_results)
        .with_slippage_bps(cli.slippage_bps);
    let slippage = config.slippage_tolerance();

    let market = Market::load(&cli.market, config)
        .wrap_err_with(|| format!("loading market {}", cli.market.display()))?;
    let from = market.resolve(&cli.from, cli.chain)?;
    let to = market.resolve(&cli.to, cli.chain)?;

    let trades = if cli.exact_out {
        let amount_out = CurrencyAmount::from_decimal_str(to, &cli.amount)?;
        info!(%from, %amount_out, "searching exact-out trades");
        market.registry().best_trades_exact_out(&from, &amount_out)?
    } else {
        let amount_in = CurrencyAmount::from_decimal_str(from, &cli.amount)?;
        info!(%amount_in, %to, "searching exact-in trades");
        market.registry().best_trades_exact_in(&amount_in, &to)?
    };

    if trades.is_empty() {
        eyre::bail!("no route from {} to {}", cli.from, cli.to);
    }

    let reports = trades
        .iter()
        .enumerate()
        .map(|(i, trade)| TradeReport::new(i + 1, trade, &slippage))
        .collect::<eyre::Result<Vec<_>>>()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let limit_label = if cli.exact_out { "maximum in:" } else { "minimum out:" };
    for report in &reports {
        println!("#{} {}", report.rank, report.route);
        println!("    pools:           {}", report.pools.join(", "));
        println!("    input:           {}", report.input);
        println!("    output:          {}", report.output);
        println!("    execution price: {}", report.execution_price);
        println!("    price impact:    {}", report.price_impact);
        println!("    {limit_label:<17}{} ({slippage} slippage)", report.amount_limit);
    }

    Ok(())
}
