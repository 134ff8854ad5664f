//! Reconciliation matcher.
//!
//! Given a pool of entries and a target amount, the matcher prepares a capped,
//! sorted candidate list, searches it for subsets whose cent-sum lands within
//! tolerance of the target, and ranks what it finds so the smallest subset
//! comes first. The search is bounded by a wall-clock budget and never fails
//! for algorithmic reasons; only target validation can return an error.

use tracing::{info, warn};

use crate::Cents;
use crate::config::MatchConfig;
use crate::model::{Candidate, Combination, Entry, EntryKind};

mod error;
pub use error::MatchError;

mod prepare;
pub use prepare::prepare_candidates;

mod rank;
pub use rank::rank;

mod search;
pub use search::{SearchStats, search};

/// A validated search: direction, target in cents and the entry pool snapshot.
///
/// Only constructible through [`SearchRequest::new`] or [`SearchRequest::parse`],
/// so a request in hand always has a target in `1..=Cents::MAX`.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    kind: EntryKind,
    target: Cents,
    pool: Vec<Entry>,
}

impl SearchRequest {
    /// Build a request from a decimal target. Fails unless `target` is a
    /// finite number that normalizes to between one cent and [`Cents::MAX`].
    pub fn new(kind: EntryKind, target: f64, pool: Vec<Entry>) -> Result<Self, MatchError> {
        if !target.is_finite() || target <= 0.0 {
            return Err(MatchError::InvalidTarget {
                input: target.to_string(),
            });
        }
        Self::with_cents(kind, Cents::from_decimal(target), target.to_string(), pool)
    }

    /// Build a request from user input such as `"1234.56"`. An empty string
    /// counts as an absent target.
    pub fn parse(kind: EntryKind, target: &str, pool: Vec<Entry>) -> Result<Self, MatchError> {
        let cents = Cents::parse(target).ok_or_else(|| MatchError::InvalidTarget {
            input: target.to_string(),
        })?;
        Self::with_cents(kind, cents, target.to_string(), pool)
    }

    fn with_cents(
        kind: EntryKind,
        target: Cents,
        input: String,
        pool: Vec<Entry>,
    ) -> Result<Self, MatchError> {
        if !target.is_positive() || target > Cents::MAX {
            return Err(MatchError::InvalidTarget { input });
        }
        Ok(Self { kind, target, pool })
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn target(&self) -> Cents {
        self.target
    }

    pub fn pool(&self) -> &[Entry] {
        &self.pool
    }
}

/// Ranked combinations plus the candidate list they were drawn from.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub target: Cents,
    /// Ascending by entry count, at most `max_results` long.
    pub combinations: Vec<Combination>,
    pub candidates: Vec<Candidate>,
    pub stats: SearchStats,
}

impl SearchResult {
    /// The combination a caller should pre-select.
    pub fn best(&self) -> Option<&Combination> {
        self.combinations.first()
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

/// Stateless between searches; each call owns its own traversal state.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a search to completion on the current thread.
    pub fn search(&self, request: &SearchRequest) -> SearchResult {
        let candidates =
            prepare_candidates(&request.pool, request.kind, self.config.max_candidates);

        let (found, stats) = search(
            &candidates,
            request.target,
            self.config.tolerance(),
            self.config.max_results,
            self.config.time_budget(),
        );
        let combinations = rank(found);

        if stats.budget_exhausted {
            warn!(
                target = %request.target,
                budget_ms = self.config.time_budget_ms,
                found = combinations.len(),
                "search budget exhausted, returning partial result"
            );
        }
        info!(
            kind = %request.kind,
            target = %request.target,
            candidates = candidates.len(),
            combinations = combinations.len(),
            nodes = stats.nodes_visited,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search finished"
        );

        SearchResult {
            target: request.target,
            combinations,
            candidates,
            stats,
        }
    }

    /// Yield once to the runtime, then run the search.
    ///
    /// The yield gives the host a chance to render a "searching" state before
    /// the CPU-bound traversal blocks the thread. It is the only suspension
    /// point; the search itself cannot be cancelled except by its budget.
    pub async fn search_deferred(&self, request: &SearchRequest) -> SearchResult {
        info!(kind = %request.kind, target = %request.target, "searching");
        tokio::task::yield_now().await;
        self.search(request)
    }
}
