//! Transaction log sink flushed to CSV once per run

use anyhow::Context;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::info;
use crate::{
    errors::{BotError, BotResult},
    types::TxLogEntry,
};

pub const TX_LOG_COLUMNS: [&str; 11] = [
    "Wallet Address",
    "Tx time",
    "Tx status",
    "Tx type",
    "Vm status",
    "Tx hash",
    "Gas used",
    "Max gas",
    "Gas price",
    "Tx payload args",
    "Error message",
];

pub struct TxLog {
    entries: Mutex<Vec<TxLogEntry>>,
    path: PathBuf,
    flushed: AtomicBool,
}

impl TxLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            path: path.into(),
            flushed: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, entry: TxLogEntry) {
        self.entries.lock().await.push(entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Snapshot in arrival order.
    pub async fn entries(&self) -> Vec<TxLogEntry> {
        self.entries.lock().await.clone()
    }

    /// Writes every entry grouped by wallet address. Only the first call
    /// touches the file; later calls return `Ok(false)`.
    pub async fn flush(&self) -> BotResult<bool> {
        if self.flushed.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }

        let mut entries = self.entries.lock().await.clone();
        // stable: rows of one wallet keep arrival order
        entries.sort_by(|a, b| a.wallet_address.cmp(&b.wallet_address));

        write_csv(&self.path, &entries).map_err(|source| BotError::Storage {
            path: self.path.display().to_string(),
            source,
        })?;

        info!(path = %self.path.display(), rows = entries.len(), "Saved execution report");
        Ok(true)
    }
}

fn write_csv(path: &Path, entries: &[TxLogEntry]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(TX_LOG_COLUMNS)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}
