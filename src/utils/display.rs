//! Run banners and summaries

use std::collections::BTreeMap;
use std::time::Instant;
use tracing::info;
use crate::{config::Config, execution::RunStats, utils::from_base_units, types::APTOS_DECIMALS};

pub fn print_config(config: &Config) {
    info!("📋 Configuration:");
    info!("   RPC: {}", config.rpc);
    info!("   Balance API: {}", config.balance_api);
    info!("   Swaps per account: {}..={}", config.swaps_per_account.min, config.swaps_per_account.max);
    info!("   Swap share: {}%..={}%", config.swap_percent.min, config.swap_percent.max);
    info!("   Slippage: {}%..={}%", config.slippage_percent.min, config.slippage_percent.max);
    info!(
        "   Native floor: {}..={} APT",
        from_base_units(config.native_balance_floor.min, APTOS_DECIMALS),
        from_base_units(config.native_balance_floor.max, APTOS_DECIMALS)
    );
    info!("   Gas amount: {}..={}", config.gas_amount.min, config.gas_amount.max);
    info!("   Gas price: {}..={}", config.gas_price.min, config.gas_price.max);
    info!("   Swap delay: {}s..={}s", config.swap_delay_secs.min, config.swap_delay_secs.max);
    info!("   Register delay: {}s..={}s", config.register_delay_secs.min, config.register_delay_secs.max);
}

/// Logs the shuffled turn order with per-wallet counts.
pub fn print_swap_sequence(sequence: &[String]) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for address in sequence {
        *counts.entry(address.as_str()).or_insert(0) += 1;
    }

    info!("🔀 Swap sequence ({} turns across {} wallets):", sequence.len(), counts.len());
    for (index, address) in sequence.iter().enumerate() {
        info!("   {:>3}. {}", index + 1, address);
    }
    for (address, count) in counts {
        info!("   {} -> {} turns", address, count);
    }
}

pub fn print_final_statistics(start_time: Instant, stats: &RunStats, entries: usize) {
    if stats.interrupted {
        info!("\n🛑 Interrupted, shutting down...");
    } else {
        info!("\n🏁 Sequence finished");
    }
    info!("Final statistics:");
    info!("   Total runtime: {:?}", start_time.elapsed());
    info!("   Turns run: {} of {}", stats.turns_run(), stats.planned);
    info!("   Successful swaps: {}", stats.swaps_succeeded);
    info!("   Failed swaps: {}", stats.swaps_failed);
    info!("   Turn errors: {}", stats.turn_errors);
    info!("   Log entries recorded: {}", entries);
}
