//! Core domain types for the reconciliation matcher.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Cents;

/// Opaque entry identifier, as handed out by the ledger store.
pub type EntryId = String;

/// Direction of a financial movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Inflow,
    Outflow,
    /// Never matched, whatever kind a search asks for.
    Transfer,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Inflow => "inflow",
            EntryKind::Outflow => "outflow",
            EntryKind::Transfer => "transfer",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "inflow" => Some(EntryKind::Inflow),
            "outflow" => Some(EntryKind::Outflow),
            "transfer" => Some(EntryKind::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unpaid (or paid) financial movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub kind: EntryKind,
    /// Recorded decimal amount; normalized to [`Cents`] before matching.
    pub amount: f64,
    pub expected_date: NaiveDate,
    pub paid: bool,
    /// Set by the ledger store when the entry is marked paid.
    pub realized_on: Option<NaiveDate>,
    pub counterparty: String,
    pub description: String,
}

impl Entry {
    /// An unpaid entry with empty display metadata.
    pub fn new(
        id: impl Into<EntryId>,
        kind: EntryKind,
        amount: f64,
        expected_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
            expected_date,
            paid: false,
            realized_on: None,
            counterparty: String::new(),
            description: String::new(),
        }
    }

    pub fn cents(&self) -> Cents {
        Cents::from_decimal(self.amount)
    }
}

/// An eligible entry with its amount precomputed in cents.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub entry: Entry,
    pub cents: Cents,
}

impl Candidate {
    pub fn new(entry: Entry) -> Self {
        let cents = entry.cents();
        Self { entry, cents }
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }
}

/// A subset of candidates whose sum is within tolerance of the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    /// Discovery order; carries no meaning beyond that.
    pub entries: Vec<Candidate>,
    pub total: Cents,
}

impl Combination {
    pub fn new(entries: Vec<Candidate>) -> Self {
        let total = entries.iter().map(|c| c.cents).sum();
        Self { entries, total }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(Candidate::id)
    }
}
