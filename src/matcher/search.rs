//! Depth-first branch-and-bound subset-sum search.
//!
//! The traversal uses an explicit frame stack instead of recursion, so a
//! 100-deep include chain never touches the call stack and the deadline check
//! is a plain loop condition. The deadline is cooperative: it is polled once
//! per node expansion, so a search can overrun its budget by at most one
//! expansion's worth of work.

use std::time::{Duration, Instant};

use crate::Cents;
use crate::model::{Candidate, Combination};

/// Counters describing how a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub nodes_visited: u64,
    /// The wall-clock budget ran out before the tree was exhausted.
    pub budget_exhausted: bool,
    pub elapsed: Duration,
}

/// One pending node: "decide candidate `index` next, with `sum` so far".
///
/// `depth` is the length of the chosen path at the parent; `take` is the
/// candidate this node adds on top of it, if any.
#[derive(Debug, Clone, Copy)]
struct Frame {
    index: usize,
    sum: i64,
    depth: usize,
    take: Option<usize>,
}

/// Find up to `max_results` subsets of `candidates` summing to `target`
/// within `tolerance`, in discovery order.
///
/// Candidates are visited in the order given; including a candidate is always
/// tried before excluding it. A branch stops as soon as it is accepted, once
/// its sum exceeds `target + tolerance`, or when the remaining candidates
/// cannot lift it to `target - tolerance`. Running out of time is not an
/// error: whatever was found so far is returned.
pub fn search(
    candidates: &[Candidate],
    target: Cents,
    tolerance: Cents,
    max_results: usize,
    budget: Duration,
) -> (Vec<Combination>, SearchStats) {
    let start = Instant::now();
    let amounts: Vec<i64> = candidates.iter().map(|c| c.cents.as_cents()).collect();
    let target = target.as_cents();
    let tolerance = tolerance.as_cents().max(0);
    let ceiling = target.saturating_add(tolerance);
    let floor = target.saturating_sub(tolerance);

    // remaining[i] = sum of amounts[i..], saturating so oversized pools never wrap
    let mut remaining = vec![0i64; amounts.len() + 1];
    for i in (0..amounts.len()).rev() {
        remaining[i] = remaining[i + 1].saturating_add(amounts[i]);
    }

    let mut found: Vec<Combination> = Vec::new();
    let mut stats = SearchStats::default();
    let mut chosen: Vec<usize> = Vec::with_capacity(amounts.len());
    let mut stack = vec![Frame {
        index: 0,
        sum: 0,
        depth: 0,
        take: None,
    }];

    while let Some(frame) = stack.pop() {
        if found.len() >= max_results {
            break;
        }
        if start.elapsed() > budget {
            stats.budget_exhausted = true;
            break;
        }
        stats.nodes_visited += 1;

        chosen.truncate(frame.depth);
        if let Some(taken) = frame.take {
            chosen.push(taken);
        }

        let sum = frame.sum;
        if !chosen.is_empty() && sum.abs_diff(target) <= tolerance as u64 {
            found.push(Combination::new(
                chosen.iter().map(|&i| candidates[i].clone()).collect(),
            ));
            continue;
        }

        if sum > ceiling || frame.index >= amounts.len() {
            continue;
        }
        if sum.saturating_add(remaining[frame.index]) < floor {
            continue;
        }

        // LIFO: push exclude first so include is expanded first
        let depth = chosen.len();
        stack.push(Frame {
            index: frame.index + 1,
            sum,
            depth,
            take: None,
        });
        stack.push(Frame {
            index: frame.index + 1,
            sum: sum.saturating_add(amounts[frame.index]),
            depth,
            take: Some(frame.index),
        });
    }

    stats.elapsed = start.elapsed();
    (found, stats)
}
