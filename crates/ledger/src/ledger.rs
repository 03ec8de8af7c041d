//! The order ledger: the single authority over the record collection.

use chrono::Utc;
use thiserror::Error;

use daigou_core::{DomainError, OrderId};
use daigou_orders::{OrderDraft, OrderRecord, Status, StatusTag};

use crate::stats::Statistics;
use crate::store::{OrderStore, StoreError};

/// Error from a ledger operation.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ordered collection of order records over a persistence seam.
///
/// Records are kept newest-created first. Every successful mutation hands the
/// store the whole collection; reads never touch the store. Operations
/// addressing an id that is not present are absorbed as no-ops (`Ok(false)`),
/// matching how stale references behave after a delete elsewhere.
#[derive(Debug)]
pub struct Ledger<S: OrderStore> {
    records: Vec<OrderRecord>,
    last_id: i64,
    store: S,
}

impl<S: OrderStore> Ledger<S> {
    /// Load the saved collection and seed the id allocator past it.
    pub fn open(store: S) -> Result<Self, LedgerError> {
        let records = store.load()?;
        let last_id = records.iter().map(|r| r.id.as_millis()).max().unwrap_or(0);
        tracing::debug!(count = records.len(), "ledger opened");
        Ok(Self {
            records,
            last_id,
            store,
        })
    }

    /// All records, newest-created first.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Records still in flight: everything whose workflow status is not
    /// `completed`.
    pub fn active(&self) -> impl Iterator<Item = &OrderRecord> {
        self.records
            .iter()
            .filter(|record| !record.workflow_status().is_terminal())
    }

    pub fn get(&self, id: OrderId) -> Option<&OrderRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate the draft and add it as a new record at the front.
    ///
    /// New orders always enter the workflow at `checking`; any status on the
    /// draft is ignored here and only honored by [`Ledger::update`].
    pub fn create(&mut self, draft: &OrderDraft) -> Result<OrderRecord, LedgerError> {
        draft.validate_for_create()?;
        let id = self.next_id();
        let record = OrderRecord::from_draft(id, Utc::now().date_naive(), draft);
        self.records.insert(0, record.clone());
        self.persist()?;
        tracing::info!(%id, client = %record.client_code, "order created");
        Ok(record)
    }

    /// Replace the record's editable fields with the draft's.
    pub fn update(&mut self, id: OrderId, draft: &OrderDraft) -> Result<bool, LedgerError> {
        let changed = self.with_record(id, |record| record.apply_draft(draft))?;
        if changed {
            tracing::info!(%id, "order updated");
        }
        Ok(changed)
    }

    /// Remove the record. Unknown ids are absorbed.
    pub fn delete(&mut self, id: OrderId) -> Result<bool, LedgerError> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            tracing::debug!(%id, "delete for unknown order ignored");
            return Ok(false);
        }
        self.persist()?;
        tracing::info!(%id, "order deleted");
        Ok(true)
    }

    /// Move the record to the given workflow status. Any member of the
    /// vocabulary is accepted; the workflow does not police transitions.
    pub fn set_status(&mut self, id: OrderId, status: Status) -> Result<bool, LedgerError> {
        let changed = self.with_record(id, |record| record.status = StatusTag::from(status))?;
        if changed {
            tracing::info!(%id, status = %status, "order status set");
        }
        Ok(changed)
    }

    pub fn set_paid(&mut self, id: OrderId, paid: bool) -> Result<bool, LedgerError> {
        let changed = self.with_record(id, |record| record.is_paid = paid)?;
        if changed {
            tracing::info!(%id, paid, "order payment flag set");
        }
        Ok(changed)
    }

    pub fn set_shipping_paid(&mut self, id: OrderId, paid: bool) -> Result<bool, LedgerError> {
        let changed = self.with_record(id, |record| record.is_shipping_paid = paid)?;
        if changed {
            tracing::info!(%id, paid, "order shipping flag set");
        }
        Ok(changed)
    }

    /// Discard every record and adopt the given collection verbatim.
    ///
    /// Import decoding has already normalized the records, so nothing is
    /// re-derived or re-validated here. The id allocator is re-seeded so
    /// later creations stay unique.
    pub fn replace_all(&mut self, records: Vec<OrderRecord>) -> Result<(), LedgerError> {
        let imported_max = records.iter().map(|r| r.id.as_millis()).max().unwrap_or(0);
        let count = records.len();
        self.records = records;
        self.last_id = self.last_id.max(imported_max);
        self.persist()?;
        tracing::info!(count, "ledger replaced by import");
        Ok(())
    }

    /// Summary over the full collection.
    pub fn statistics(&self) -> Statistics {
        Statistics::from_records(&self.records)
    }

    fn with_record(
        &mut self,
        id: OrderId,
        apply: impl FnOnce(&mut OrderRecord),
    ) -> Result<bool, LedgerError> {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            tracing::debug!(%id, "mutation for unknown order ignored");
            return Ok(false);
        };
        apply(record);
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), LedgerError> {
        self.store.save(&self.records)?;
        Ok(())
    }

    /// Epoch milliseconds, bumped past the last allocation so creations in
    /// the same millisecond still get distinct, increasing ids.
    fn next_id(&mut self) -> OrderId {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        OrderId::from_millis(self.last_id)
    }
}
