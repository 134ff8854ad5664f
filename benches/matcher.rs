use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use recon_match::matcher::prepare_candidates;
use recon_match::{Entry, EntryKind, MatchConfig, Matcher, SearchRequest};
use std::time::Duration;

/// Generates a deterministic pool of unpaid entries.
///
/// Amounts come from a small linear congruential generator so runs are
/// comparable without pulling in a random number crate. Every third entry is
/// an outflow and every tenth is already paid.
pub struct EntryGenerator {
    next_id: u32,
    count: u32,
    state: u64,
    date: NaiveDate,
}

impl EntryGenerator {
    pub fn new(count: u32, seed: u64) -> Self {
        Self {
            next_id: 0,
            count,
            state: seed,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }
}

impl Iterator for EntryGenerator {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_id >= self.count {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;

        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        // 1.00 ..= 5000.00
        let cents = 100 + (self.state >> 33) % 499_901;

        let kind = if id % 3 == 2 {
            EntryKind::Outflow
        } else {
            EntryKind::Inflow
        };
        let mut entry = Entry::new(format!("e{id}"), kind, cents as f64 / 100.0, self.date);
        entry.paid = id % 10 == 9;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.next_id) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EntryGenerator {}

/// Target that is guaranteed reachable: the sum of a few inflows.
fn reachable_target(pool: &[Entry], picks: usize) -> f64 {
    pool.iter()
        .filter(|e| e.kind == EntryKind::Inflow && !e.paid)
        .step_by(7)
        .take(picks)
        .map(|e| e.cents().as_cents())
        .sum::<i64>() as f64
        / 100.0
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");

    for count in [100u32, 10_000, 100_000] {
        let pool: Vec<Entry> = EntryGenerator::new(count, 7).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &pool, |b, pool| {
            b.iter(|| black_box(prepare_candidates(pool, EntryKind::Inflow, 100)));
        });
    }

    group.finish();
}

fn bench_reachable(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachable");

    for picks in [1usize, 2, 3, 4] {
        let pool: Vec<Entry> = EntryGenerator::new(150, 42).collect();
        let target = reachable_target(&pool, picks);
        let request = SearchRequest::new(EntryKind::Inflow, target, pool).unwrap();
        let matcher = Matcher::default();

        group.bench_with_input(BenchmarkId::from_parameter(picks), &request, |b, request| {
            b.iter(|| black_box(matcher.search(request)));
        });
    }

    group.finish();
}

fn bench_budget_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("budget_bound");
    group.sample_size(10);

    // even amounts, odd target, zero tolerance: nothing matches, search runs to its budget
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let pool: Vec<Entry> = (0..100)
        .map(|i| Entry::new(format!("e{i}"), EntryKind::Outflow, 2.0, date))
        .collect();
    let request = SearchRequest::new(EntryKind::Outflow, 99.99, pool).unwrap();

    for budget_ms in [10u64, 50] {
        let matcher = Matcher::new(
            MatchConfig::default()
                .with_tolerance_cents(0)
                .with_time_budget(Duration::from_millis(budget_ms)),
        );
        group.bench_with_input(BenchmarkId::from_parameter(budget_ms), &request, |b, request| {
            b.iter(|| black_box(matcher.search(request)));
        });
    }

    group.finish();
}

fn bench_full_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pool");

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let pool: Vec<Entry> = (0..100)
        .map(|i| Entry::new(format!("e{i}"), EntryKind::Inflow, 1.0, date))
        .collect();
    let request = SearchRequest::new(EntryKind::Inflow, 100.0, pool).unwrap();
    let matcher = Matcher::default();

    group.bench_function("100x1.00", |b| {
        b.iter(|| black_box(matcher.search(&request)));
    });

    group.finish();
}

criterion_group!(benches, bench_prepare, bench_reachable, bench_full_pool);

criterion_group!(
    name = budget;
    config = Criterion::default().sample_size(10);
    targets = bench_budget_bound
);

criterion_main!(benches, budget);
