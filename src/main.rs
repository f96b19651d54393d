//! Aptos warm-up bot - entry point

use anyhow::{Context, Result};
use aptos_warmup_bot::*;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "aptos-warmup-bot", version, about = "Randomized Liquidswap warm-up swaps for Aptos wallets")]
struct Cli {
    /// Directory holding `.properties` and the warm-up wallet list
    #[arg(long, env = "WARMUP_CONFIG_DIR", default_value = "resource/config/aptos")]
    config_dir: PathBuf,

    /// Directory for the text log and the CSV report
    #[arg(long, default_value = "resource/log/aptos")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let run_stamp = utils::current_date_time();

    let config = Config::load(&cli.config_dir).context("loading configuration")?;

    utils::setup_output_directories(&cli.log_dir)?;
    let _logging_guard = utils::setup_logging(&cli.log_dir, &run_stamp, config.log_file_per_execution)?;

    info!("🌡️  Aptos warm-up bot v{}", env!("CARGO_PKG_VERSION"));
    utils::print_config(&config);

    let catalog = pools::PoolCatalog::load(config.pools_file.as_deref())?;

    let wallets = wallets::WalletBook::load(&config.sid_phrases_file)?;

    let warm_up = if config.warm_up_wallets_file.exists() {
        scheduler::read_address_list(&config.warm_up_wallets_file)?
    } else {
        warn!("Warm-up list {} not found, using every wallet", config.warm_up_wallets_file.display());
        Vec::new()
    };
    let candidates = scheduler::select_candidates(&warm_up, &wallets);

    let mut rng = StdRng::from_os_rng();
    let sequence = scheduler::build_swap_sequence(&candidates, config.swaps_per_account, &mut rng);
    utils::print_swap_sequence(&sequence);

    let chain = network::AptosRestClient::new(&config.rpc, Duration::from_secs(config.tx_timeout_secs))?;
    let balances = network::ApscanClient::new(&config.balance_api, config.balance_api_accept_invalid_certs)?;
    let tx_log = Arc::new(storage::TxLog::new(
        cli.log_dir.join(utils::execution_file_name("csv", &run_stamp, config.log_file_per_execution)),
    ));

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
    let signal_log = Arc::clone(&tx_log);
    tokio::spawn(async move {
        if utils::relay_interrupts(tokio::signal::ctrl_c, shutdown_tx, signal_log).await {
            std::process::exit(130);
        }
    });

    let start_time = Instant::now();
    let sequencer = execution::TransactionSequencer::new(&chain, &catalog, &tx_log, &config);
    let mut runner = execution::WarmupRunner::new(&config, &catalog, &wallets, &balances, sequencer, rng);

    info!("\n🚀 Starting {} swap turns...\n", sequence.len());
    let stats = runner.run(&sequence, &mut shutdown_rx).await.clone();

    tx_log.flush().await?;
    utils::print_final_statistics(start_time, &stats, tx_log.len().await);

    Ok(())
}
