use std::env;
use std::io;
use std::process::ExitCode;

use chrono::NaiveDate;
use recon_match::csv::{read_entries, write_combinations, write_entries};
use recon_match::{
    EntryKind, MatchConfig, Matcher, MemoryLedger, SearchRequest, Selection, commit,
};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: recon-match <entries.csv> <inflow|outflow> <target> [realization-date]";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (path, kind, target) = match args.as_slice() {
        [path, kind, target, ..] => (path, kind, target),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let Some(kind) = EntryKind::parse(kind) else {
        eprintln!("unknown kind '{kind}'\n{USAGE}");
        return ExitCode::from(2);
    };
    let realized_on = match args.get(3).map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d")) {
        None => None,
        Some(Ok(date)) => Some(date),
        Some(Err(e)) => {
            eprintln!("invalid realization date: {e}");
            return ExitCode::from(2);
        }
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let rows = match read_entries(path) {
        Ok(rows) => rows,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut entries = Vec::new();
    for result in rows {
        match result {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("{e}"),
        }
    }

    let request = match SearchRequest::parse(kind, target, entries.clone()) {
        Ok(request) => request,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let matcher = Matcher::new(MatchConfig::default());
    let result = matcher.search_deferred(&request).await;

    let written = match realized_on {
        None => write_combinations(io::stdout().lock(), &result),
        Some(date) => {
            let ledger = MemoryLedger::new(entries);
            let selection = Selection::from_result(&result);
            if let Err(e) = commit(&ledger, &selection, date).await {
                error!("{e}");
                return ExitCode::FAILURE;
            }
            write_entries(io::stdout().lock(), &ledger.snapshot().await)
        }
    };

    if let Err(e) = written {
        error!("failed to write output: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
