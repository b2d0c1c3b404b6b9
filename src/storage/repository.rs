use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::domain::{MAX_AMOUNT, Wallet, format_amount, in_range};

/// Repository persisting the full wallet list as a single JSON document.
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load all wallets. Returns `Ok(None)` if the data file does not exist.
    pub fn load(&self) -> Result<Option<Vec<Wallet>>> {
        if !self.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let wallets = read_wallets(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        log::info!("Loaded {} wallet(s) from {}", wallets.len(), self.path.display());
        Ok(Some(wallets))
    }

    /// Replace the data file with the given wallets.
    pub fn save(&self, wallets: &[Wallet]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        write_wallets(BufWriter::new(file), wallets)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        log::info!("Saved {} wallet(s) to {}", wallets.len(), self.path.display());
        Ok(())
    }
}

/// Parse a JSON array of wallets. Field names are matched case-insensitively
/// and a `null` document yields no wallets.
pub fn read_wallets<R: Read>(reader: R) -> Result<Vec<Wallet>> {
    let raw: Value = serde_json::from_reader(reader).context("Invalid JSON")?;
    let wallets: Option<Vec<Wallet>> =
        serde_json::from_value(lowercase_keys(raw)).context("Unexpected wallet layout")?;
    let wallets = wallets.unwrap_or_default();

    for wallet in &wallets {
        let mut amounts = std::iter::once(wallet.initial_balance)
            .chain(wallet.transactions().iter().map(|tx| tx.amount));
        if let Some(amount) = amounts.find(|a| !in_range(*a)) {
            bail!(
                "Amount {} in wallet '{}' exceeds {}",
                amount,
                wallet.name,
                format_amount(MAX_AMOUNT)
            );
        }
    }
    Ok(wallets)
}

/// Write wallets as a pretty-printed JSON array with camelCase field names.
pub fn write_wallets<W: Write>(mut writer: W, wallets: &[Wallet]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, wallets)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
