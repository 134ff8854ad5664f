use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::Cents;
use crate::matcher::SearchResult;
use crate::model::{Entry, EntryKind};

/// Errors that can occur when reading entry rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open csv file: {0}")]
    Open(csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized entry kind '{kind}'")]
    UnrecognizedKind { line: usize, kind: String },

    #[error("line {line}: invalid amount {amount}")]
    InvalidAmount { line: usize, amount: f64 },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    id: String,
    kind: String,
    amount: f64,
    expected_date: NaiveDate,
    #[serde(default)]
    paid: bool,
    #[serde(default)]
    counterparty: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize)]
struct CombinationRow {
    rank: usize,
    entries: String,
    count: usize,
    total: String,
}

#[derive(Debug, Serialize)]
struct EntryRow<'a> {
    id: &'a str,
    kind: EntryKind,
    amount: String,
    expected_date: NaiveDate,
    paid: bool,
    realized_on: Option<NaiveDate>,
    counterparty: &'a str,
    description: &'a str,
}

/// Read entries from a csv file with an
/// `id,kind,amount,expected_date,paid,counterparty,description` header.
pub fn read_entries(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Entry, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            let kind = EntryKind::parse(&row.kind).ok_or_else(|| CsvError::UnrecognizedKind {
                line,
                kind: row.kind.clone(),
            })?;
            if !row.amount.is_finite()
                || row.amount < 0.0
                || Cents::from_decimal(row.amount) > Cents::MAX
            {
                return Err(CsvError::InvalidAmount {
                    line,
                    amount: row.amount,
                });
            }
            Ok(Entry {
                id: row.id,
                kind,
                amount: row.amount,
                expected_date: row.expected_date,
                paid: row.paid,
                realized_on: None,
                counterparty: row.counterparty,
                description: row.description,
            })
        }))
}

/// Write ranked combinations as csv, one row per combination.
///
/// The header is always written, so an empty result is still a valid table.
pub fn write_combinations(writer: impl io::Write, result: &SearchResult) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(["rank", "entries", "count", "total"])?;

    for (rank, combination) in result.combinations.iter().enumerate() {
        writer.serialize(CombinationRow {
            rank: rank + 1,
            entries: combination.ids().collect::<Vec<_>>().join(" "),
            count: combination.len(),
            total: combination.total.to_string(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write entries as csv, including the realization date of paid ones.
pub fn write_entries<'a>(
    writer: impl io::Write,
    entries: impl IntoIterator<Item = &'a Entry>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for entry in entries {
        writer.serialize(EntryRow {
            id: &entry.id,
            kind: entry.kind,
            amount: entry.cents().to_string(),
            expected_date: entry.expected_date,
            paid: entry.paid,
            realized_on: entry.realized_on,
            counterparty: &entry.counterparty,
            description: &entry.description,
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matcher, SearchRequest};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id,kind,amount,expected_date,paid,counterparty,description\n";

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn read(content: &str) -> Vec<Result<Entry, CsvError>> {
        let file = write_csv(content);
        read_entries(file.path()).unwrap().collect()
    }

    #[test]
    fn read_entry() {
        let results = read(&format!(
            "{HEADER}inv-1,inflow,120.50,2024-03-01,false,ACME,March invoice\n"
        ));
        assert_eq!(results.len(), 1);

        let entry = results.into_iter().next().unwrap().unwrap();
        assert_eq!(entry.id, "inv-1");
        assert_eq!(entry.kind, EntryKind::Inflow);
        assert_eq!(entry.amount, 120.5);
        assert_eq!(entry.expected_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(!entry.paid);
        assert_eq!(entry.counterparty, "ACME");
        assert_eq!(entry.description, "March invoice");
    }

    #[test]
    fn read_with_whitespace_and_empty_metadata() {
        let results = read(&format!("{HEADER}b-7, Outflow , 9.99, 2024-03-02, true, ,\n"));
        let entry = results.into_iter().next().unwrap().unwrap();
        assert_eq!(entry.kind, EntryKind::Outflow);
        assert!(entry.paid);
        assert!(entry.counterparty.is_empty());
    }

    #[test]
    fn read_returns_error_for_unknown_kind() {
        let results = read(&format!("{HEADER}x,refund,1.00,2024-03-01,false,,\n"));
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedKind { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_negative_amount() {
        let results = read(&format!("{HEADER}x,inflow,-1.00,2024-03-01,false,,\n"));
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::InvalidAmount { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_oversized_amount() {
        let results = read(&format!(
            "{HEADER}x,inflow,50000000000000000,2024-03-01,false,,\n\
             y,inflow,10000000000000,2024-03-01,false,,\n"
        ));
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::InvalidAmount { line: 2, .. }));
        // exactly the largest amount is still accepted
        assert!(results[1].is_ok());
    }

    #[test]
    fn read_returns_error_for_bad_date() {
        let results = read(&format!(
            "{HEADER}ok,inflow,1.00,2024-03-01,false,,\nbad,inflow,1.00,03/01/2024,false,,\n"
        ));
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::Parse { line: 3, .. }));
    }

    #[test]
    fn missing_file_fails_to_open() {
        let result = read_entries("/definitely/not/here.csv");
        assert!(matches!(result, Err(CsvError::Open(_))));
    }

    #[test]
    fn write_ranked_combinations() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let pool = [("a", 50.0), ("b", 30.0), ("c", 20.0), ("d", 10.0)]
            .into_iter()
            .map(|(id, amount)| Entry::new(id, EntryKind::Outflow, amount, date))
            .collect();
        let request = SearchRequest::new(EntryKind::Outflow, 80.0, pool).unwrap();
        let result = Matcher::default().search(&request);

        let mut out = Vec::new();
        write_combinations(&mut out, &result).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "rank,entries,count,total\n1,a b,2,80.00\n2,a c d,3,80.00\n"
        );
    }

    #[test]
    fn write_header_even_without_combinations() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let pool = vec![Entry::new("a", EntryKind::Outflow, 50.0, date)];
        let request = SearchRequest::new(EntryKind::Outflow, 80.0, pool).unwrap();
        let result = Matcher::default().search(&request);
        assert!(result.is_empty());

        let mut out = Vec::new();
        write_combinations(&mut out, &result).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "rank,entries,count,total\n");
    }

    #[test]
    fn write_paid_entry() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut entry = Entry::new("a", EntryKind::Inflow, 12.5, date);
        entry.paid = true;
        entry.realized_on = NaiveDate::from_ymd_opt(2024, 3, 5);

        let mut out = Vec::new();
        write_entries(&mut out, [&entry]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,kind,amount,expected_date,paid,realized_on,counterparty,description\n\
             a,inflow,12.50,2024-03-01,true,2024-03-05,,\n"
        );
    }
}
