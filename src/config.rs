use serde::Deserialize;
use std::time::Duration;

use crate::Cents;

/// Matcher limits, fixed for the lifetime of a [`Matcher`](crate::Matcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Largest accepted `|sum - target|`, in cents.
    pub tolerance_cents: i64,
    /// The search stops once this many combinations are recorded.
    pub max_results: usize,
    /// Eligible entries beyond this count are never considered.
    pub max_candidates: usize,
    /// Wall-clock budget for one search.
    pub time_budget_ms: u64,
}

impl MatchConfig {
    pub const DEFAULT_TOLERANCE_CENTS: i64 = 1;
    pub const DEFAULT_MAX_RESULTS: usize = 5;
    pub const DEFAULT_MAX_CANDIDATES: usize = 100;
    pub const DEFAULT_TIME_BUDGET_MS: u64 = 3000;

    pub fn with_tolerance_cents(mut self, tolerance_cents: i64) -> Self {
        self.tolerance_cents = tolerance_cents;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = budget.as_millis() as u64;
        self
    }

    pub fn tolerance(&self) -> Cents {
        Cents::from_cents(self.tolerance_cents.max(0))
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tolerance_cents: Self::DEFAULT_TOLERANCE_CENTS,
            max_results: Self::DEFAULT_MAX_RESULTS,
            max_candidates: Self::DEFAULT_MAX_CANDIDATES,
            time_budget_ms: Self::DEFAULT_TIME_BUDGET_MS,
        }
    }
}
