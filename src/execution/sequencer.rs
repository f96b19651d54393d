//! Two-phase transaction sequencing: simulate, then submit and wait

use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};
use crate::{
    config::Config,
    errors::BotResult,
    network::ChainClient,
    pools::PoolCatalog,
    storage::TxLog,
    swap::{build_swap_payload, register_payload},
    types::{EntryFunctionPayload, GasParams, SwapDecision, TxKind, TxLogEntry},
    wallets::Wallet,
};

pub struct TransactionSequencer<'a> {
    chain: &'a dyn ChainClient,
    catalog: &'a PoolCatalog,
    tx_log: &'a TxLog,
    config: &'a Config,
}

impl<'a> TransactionSequencer<'a> {
    pub fn new(
        chain: &'a dyn ChainClient,
        catalog: &'a PoolCatalog,
        tx_log: &'a TxLog,
        config: &'a Config,
    ) -> Self {
        Self { chain, catalog, tx_log, config }
    }

    fn draw_gas<R: Rng + ?Sized>(&self, rng: &mut R) -> GasParams {
        GasParams {
            max_gas_amount: self.config.gas_amount.draw(rng),
            gas_unit_price: self.config.gas_price.draw(rng),
        }
    }

    /// Registers the destination coin when needed, then swaps.
    pub async fn swap<R: Rng + ?Sized>(
        &self,
        wallet: &Wallet,
        decision: &SwapDecision,
        rng: &mut R,
    ) -> BotResult<TxLogEntry> {
        let address = wallet.address();
        if !self.chain.has_coin_store(address, &decision.destination).await? {
            let registration = self.register(wallet, &decision.destination, rng).await?;
            if !registration.is_success() {
                warn!(wallet = %address, coin = %decision.destination, "Coin registration failed, swapping anyway");
            }
        }

        let slippage = self.config.slippage_percent.draw(rng);
        let payload = build_swap_payload(self.chain, self.catalog, decision, slippage).await?;
        let delay = self.config.swap_delay_secs.draw(rng);
        let gas = self.draw_gas(rng);

        info!(
            wallet = %address,
            amount = decision.amount,
            max_gas = gas.max_gas_amount,
            gas_price = gas.gas_unit_price,
            "Swapping {} -> {}",
            decision.source,
            decision.destination
        );
        self.submit_transaction(wallet, payload, gas, delay).await
    }

    pub async fn register<R: Rng + ?Sized>(
        &self,
        wallet: &Wallet,
        coin: &str,
        rng: &mut R,
    ) -> BotResult<TxLogEntry> {
        info!(wallet = %wallet.address(), coin = %coin, "Registering coin store");
        let delay = self.config.register_delay_secs.draw(rng);
        let gas = self.draw_gas(rng);
        self.submit_transaction(wallet, register_payload(coin), gas, delay).await
    }

    /// Runs one payload through simulation and, if that passes, the chain.
    /// Exactly one entry is appended to the log whatever the outcome.
    pub async fn submit_transaction(
        &self,
        wallet: &Wallet,
        payload: EntryFunctionPayload,
        gas: GasParams,
        delay_secs: u64,
    ) -> BotResult<TxLogEntry> {
        let mut phase = TxKind::Simulation;
        let entry = match self.run_phases(wallet, &payload, gas, &mut phase).await {
            Ok(entry) => entry,
            Err(err) => {
                let entry = TxLogEntry::from_error(wallet.address(), &payload, gas, phase, &err.to_string());
                self.tx_log.append(entry).await;
                return Err(err);
            }
        };

        self.tx_log.append(entry.clone()).await;
        info!(
            wallet = %entry.wallet_address,
            hash = %entry.hash,
            vm_status = %entry.vm_status,
            gas_used = %entry.gas_used,
            "Tx result: {} {}",
            entry.tx_type,
            if entry.is_success() { "success" } else { "failure" }
        );

        if entry.tx_type == TxKind::OnChain {
            info!("Sleeping {}s", delay_secs);
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        }
        Ok(entry)
    }

    async fn run_phases(
        &self,
        wallet: &Wallet,
        payload: &EntryFunctionPayload,
        gas: GasParams,
        phase: &mut TxKind,
    ) -> BotResult<TxLogEntry> {
        let address = wallet.address();
        let request = self.chain.build_transaction(wallet, payload.clone(), gas).await?;

        let simulated = self.chain.simulate(wallet, &request).await?;
        if !simulated.success {
            return Ok(TxLogEntry::from_result(address, &simulated, TxKind::Simulation));
        }

        *phase = TxKind::OnChain;
        let hash = self.chain.submit(wallet, &request).await?;
        info!(wallet = %address, hash = %hash, "Submitted transaction");
        let committed = self.chain.wait_for_transaction(&hash).await?;
        Ok(TxLogEntry::from_result(address, &committed, TxKind::OnChain))
    }
}
