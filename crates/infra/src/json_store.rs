//! File-backed order store.

use std::path::{Path, PathBuf};

use anyhow::Context;

use daigou_ledger::{OrderStore, StoreError};
use daigou_orders::OrderRecord;

/// [`OrderStore`] over a single JSON file.
///
/// The file holds the same pretty-printed array the backup format uses, so a
/// data file doubles as a hand-readable export. Saving writes a sibling temp
/// file and renames it over the target, so a crash mid-write leaves the
/// previous collection intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional per-user location (see [`default_data_file`]).
    pub fn at_default_location() -> anyhow::Result<Self> {
        Ok(Self::new(default_data_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl OrderStore for JsonFileStore {
    fn load(&self) -> Result<Vec<OrderRecord>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no order file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Load(format!("{}: {}", self.path.display(), e)));
            }
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Load(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, records: &[OrderRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Save(format!("{}: {}", self.path.display(), e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Save(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let temp = self.temp_path();
        std::fs::write(&temp, &json)
            .map_err(|e| StoreError::Save(format!("{}: {}", temp.display(), e)))?;
        std::fs::rename(&temp, &self.path)
            .map_err(|e| StoreError::Save(format!("{}: {}", self.path.display(), e)))?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "orders saved");
        Ok(())
    }
}

/// Conventional data file location: `{os data dir}/daigou/orders.json`.
///
/// Resolution only; nothing is created until the first save.
pub fn default_data_file() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut home| {
                home.push(".local");
                home.push("share");
                home
            })
        })
        .context("failed to resolve OS app data directory")?;

    let mut path = base;
    path.push("daigou");
    path.push("orders.json");
    Ok(path)
}
