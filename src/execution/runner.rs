//! Drives the swap sequence one wallet turn at a time

use rand::rngs::StdRng;
use tokio::sync::oneshot;
use tracing::{error, info};
use crate::{
    config::Config,
    errors::BotResult,
    network::BalanceSource,
    pools::PoolCatalog,
    swap::{select_swap_amount, select_swap_pair},
    types::{SwapDecision, TxLogEntry},
    wallets::{Wallet, WalletBook},
};
use super::TransactionSequencer;

/// Turn counters reported at shutdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub planned: usize,
    pub swaps_succeeded: usize,
    pub swaps_failed: usize,
    pub turn_errors: usize,
    pub interrupted: bool,
}

impl RunStats {
    pub fn turns_run(&self) -> usize {
        self.swaps_succeeded + self.swaps_failed + self.turn_errors
    }
}

pub struct WarmupRunner<'a> {
    config: &'a Config,
    catalog: &'a PoolCatalog,
    wallets: &'a WalletBook,
    balances: &'a dyn BalanceSource,
    sequencer: TransactionSequencer<'a>,
    rng: StdRng,
    stats: RunStats,
}

impl<'a> WarmupRunner<'a> {
    pub fn new(
        config: &'a Config,
        catalog: &'a PoolCatalog,
        wallets: &'a WalletBook,
        balances: &'a dyn BalanceSource,
        sequencer: TransactionSequencer<'a>,
        rng: StdRng,
    ) -> Self {
        Self {
            config,
            catalog,
            wallets,
            balances,
            sequencer,
            rng,
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// One warm-up turn: choose a pair and an amount, then swap.
    pub async fn random_swap(&mut self, wallet: &Wallet) -> BotResult<TxLogEntry> {
        let address = wallet.address();
        let native_floor = self.config.native_balance_floor.draw(&mut self.rng);

        let holdings = self.balances.wallet_coins(address).await?;
        let pair = select_swap_pair(address, &holdings, native_floor, self.catalog, &mut self.rng)?;

        let holdings = self.balances.wallet_coins(address).await?;
        let amount = select_swap_amount(
            address,
            &holdings,
            &pair.source,
            native_floor,
            self.config.swap_percent,
            &mut self.rng,
        )?;
        info!(wallet = %address, amount, "Selected {} -> {}", pair.source, pair.destination);

        let decision = SwapDecision::from_pair(pair, amount);
        self.sequencer.swap(wallet, &decision, &mut self.rng).await
    }

    /// Runs every turn in order. A shutdown request is honoured between
    /// turns only; a failed turn is logged and skipped.
    pub async fn run(&mut self, sequence: &[String], shutdown: &mut oneshot::Receiver<()>) -> &RunStats {
        let wallets = self.wallets;
        let total = sequence.len();
        self.stats.planned = total;

        for (index, address) in sequence.iter().enumerate() {
            if shutdown.try_recv().is_ok() {
                info!("Shutdown requested, stopping after {} of {} turns", index, total);
                self.stats.interrupted = true;
                break;
            }

            info!("Processing {}th swap out of {} total.", index + 1, total);
            let Some(wallet) = wallets.get(address) else {
                error!(wallet = %address, "No key loaded for wallet");
                self.stats.turn_errors += 1;
                continue;
            };

            match self.random_swap(wallet).await {
                Ok(entry) if entry.is_success() => self.stats.swaps_succeeded += 1,
                Ok(_) => self.stats.swaps_failed += 1,
                Err(e) => {
                    error!(wallet = %address, "Swap turn failed: {}", e);
                    self.stats.turn_errors += 1;
                }
            }
        }

        &self.stats
    }
}
