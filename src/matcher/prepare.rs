use tracing::debug;

use crate::model::{Candidate, Entry, EntryKind};

/// Turn a raw entry pool into the ordered candidate list the search walks.
///
/// Keeps unpaid entries of `kind` (transfers never qualify), truncates to
/// `max_candidates` in pool order, then sorts by amount descending. The sort
/// is stable so equal amounts keep their pool order.
pub fn prepare_candidates(pool: &[Entry], kind: EntryKind, max_candidates: usize) -> Vec<Candidate> {
    let eligible = pool
        .iter()
        .filter(|entry| !entry.paid && entry.kind != EntryKind::Transfer && entry.kind == kind);

    let mut candidates: Vec<Candidate> = eligible
        .take(max_candidates)
        .cloned()
        .map(Candidate::new)
        .collect();

    candidates.sort_by(|a, b| b.cents.cmp(&a.cents));

    debug!(
        pool = pool.len(),
        kind = %kind,
        candidates = candidates.len(),
        max_candidates,
        "candidates prepared"
    );

    candidates
}
