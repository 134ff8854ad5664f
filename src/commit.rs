//! Commit boundary towards the external ledger store.

use std::collections::HashSet;
use std::error::Error as StdError;
use std::future::Future;

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::model::{Entry, EntryId};
use crate::selection::Selection;

/// The persistence collaborator that marks entries as paid.
pub trait LedgerStore {
    type Error: StdError + Send + Sync + 'static;

    /// Mark every id paid with the given realization date.
    fn mark_paid(
        &self,
        ids: &[EntryId],
        realized_on: NaiveDate,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("nothing selected to commit")]
    EmptySelection,
    #[error("ledger store rejected the commit: {0}")]
    Store(#[source] Box<dyn StdError + Send + Sync>),
}

/// Hand the current selection to `store`.
///
/// The store is called exactly once; failures are not retried and the
/// selection is left as it was so the caller can try again.
pub async fn commit<S: LedgerStore>(
    store: &S,
    selection: &Selection,
    realized_on: NaiveDate,
) -> Result<(), CommitError> {
    if selection.is_empty() {
        return Err(CommitError::EmptySelection);
    }

    let ids = selection.selected_ids();
    match store.mark_paid(ids, realized_on).await {
        Ok(()) => {
            info!(
                entries = ids.len(),
                total = %selection.running_total(),
                realized_on = %realized_on,
                "selection committed"
            );
            Ok(())
        }
        Err(e) => {
            warn!(entries = ids.len(), reason = %e, "commit failed");
            Err(CommitError::Store(Box::new(e)))
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryLedgerError {
    #[error("entry {0} not found")]
    UnknownEntry(EntryId),
    #[error("entry {0} is already paid")]
    AlreadyPaid(EntryId),
}

/// In-memory [`LedgerStore`]; all-or-nothing per call.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryLedger {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Copy of every entry, paid or not.
    pub async fn snapshot(&self) -> Vec<Entry> {
        self.entries.read().await.clone()
    }

    pub async fn unpaid(&self) -> Vec<Entry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| !e.paid)
            .cloned()
            .collect()
    }
}

impl LedgerStore for MemoryLedger {
    type Error = MemoryLedgerError;

    async fn mark_paid(&self, ids: &[EntryId], realized_on: NaiveDate) -> Result<(), Self::Error> {
        let mut entries = self.entries.write().await;

        // Validate everything first so a bad id leaves the store untouched
        for id in ids {
            let entry = entries
                .iter()
                .find(|e| &e.id == id)
                .ok_or_else(|| MemoryLedgerError::UnknownEntry(id.clone()))?;
            if entry.paid {
                return Err(MemoryLedgerError::AlreadyPaid(id.clone()));
            }
        }

        let ids: HashSet<&EntryId> = ids.iter().collect();
        for entry in entries.iter_mut().filter(|e| ids.contains(&e.id)) {
            entry.paid = true;
            entry.realized_on = Some(realized_on);
        }
        Ok(())
    }
}
