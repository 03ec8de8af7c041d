//! Persistence seam for the ledger.
//!
//! The ledger never persists incrementally: after every successful mutation
//! it hands the store the entire collection. Adapters only need to replay
//! the last collection they were given.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use daigou_orders::OrderRecord;

/// Error from a store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to load orders: {0}")]
    Load(String),

    #[error("failed to save orders: {0}")]
    Save(String),
}

/// Whole-collection persistence abstraction.
pub trait OrderStore: Send + Sync {
    /// The last-saved collection, or empty if nothing was ever saved.
    fn load(&self) -> Result<Vec<OrderRecord>, StoreError>;

    /// Persist the entire collection, replacing whatever was saved before.
    fn save(&self, records: &[OrderRecord]) -> Result<(), StoreError>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn load(&self) -> Result<Vec<OrderRecord>, StoreError> {
        (**self).load()
    }

    fn save(&self, records: &[OrderRecord]) -> Result<(), StoreError> {
        (**self).save(records)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Vec<OrderRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-seeded collection.
    pub fn with_records(records: Vec<OrderRecord>) -> Self {
        Self {
            inner: RwLock::new(records),
        }
    }

    /// What was last saved. Test inspection helper.
    pub fn snapshot(&self) -> Vec<OrderRecord> {
        self.inner.read().map(|records| records.clone()).unwrap_or_default()
    }
}

impl OrderStore for InMemoryStore {
    fn load(&self) -> Result<Vec<OrderRecord>, StoreError> {
        let records = self
            .inner
            .read()
            .map_err(|e| StoreError::Load(e.to_string()))?;
        Ok(records.clone())
    }

    fn save(&self, records: &[OrderRecord]) -> Result<(), StoreError> {
        let mut slot = self
            .inner
            .write()
            .map_err(|e| StoreError::Save(e.to_string()))?;
        *slot = records.to_vec();
        Ok(())
    }
}
