//! CSV statements with a header row.
//!
//! Expected columns (any order, case-insensitive, extras ignored):
//!   date,amount,description[,category]

use anyhow::{Context, Result};
use csv::StringRecord;
use piggy_core::{Transaction, TxnKind};
use std::path::Path;

use super::parse_amount;

/// Column positions resolved from the header row
#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    amount: Option<usize>,
    description: Option<usize>,
    category: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut cols = Columns::default();
        for (i, h) in headers.iter().enumerate() {
            match h.trim().to_lowercase().as_str() {
                "date" => cols.date = Some(i),
                "amount" => cols.amount = Some(i),
                "description" => cols.description = Some(i),
                "category" => cols.category = Some(i),
                _ => {}
            }
        }
        cols
    }

    fn field<'r>(record: &'r StringRecord, idx: Option<usize>) -> &'r str {
        idx.and_then(|i| record.get(i)).unwrap_or("").trim()
    }
}

/// Parse a CSV file into transactions. Missing fields default to empty
/// strings and a zero amount.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    parse_records(rdr).with_context(|| format!("parsing {}", path.display()))
}

/// Parse CSV text; used by `read_csv` and handy for tests
pub fn parse_csv_str(text: &str) -> Result<Vec<Transaction>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());
    parse_records(rdr)
}

fn parse_records<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Transaction>> {
    let cols = Columns::from_headers(rdr.headers()?);
    if cols.amount.is_none() {
        tracing::warn!("CSV header has no amount column; every amount will be 0");
    }

    let mut txns = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let amount = parse_amount(Columns::field(&record, cols.amount));
        let category = Columns::field(&record, cols.category);

        txns.push(Transaction {
            date: Columns::field(&record, cols.date).to_string(),
            amount,
            description: Columns::field(&record, cols.description).to_string(),
            category: (!category.is_empty()).then(|| category.to_string()),
            kind: TxnKind::from_amount(amount),
        });
    }

    Ok(txns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_basic_rows() {
        let text = "date,amount,description\n\
                    2024-01-05,-100,store purchase\n\
                    2024-02-10,2000,salary payment\n";
        let txns = parse_csv_str(text).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, -100.0);
        assert_eq!(txns[0].kind, TxnKind::Expense);
        assert_eq!(txns[1].description, "salary payment");
        assert_eq!(txns[1].kind, TxnKind::Income);
        assert!(txns[0].category.is_none());
    }

    #[test]
    fn test_header_order_and_case() {
        let text = "Description,Extra,AMOUNT,Date,Category\n\
                    \"Taxi, airport\",x,-35.5,2024-03-01,Transport\n";
        let txns = parse_csv_str(text).unwrap();
        assert_eq!(txns[0].description, "Taxi, airport");
        assert_eq!(txns[0].amount, -35.5);
        assert_eq!(txns[0].date, "2024-03-01");
        assert_eq!(txns[0].category.as_deref(), Some("Transport"));
    }

    #[test]
    fn test_missing_fields_default() {
        let text = "date,amount,description\n\
                    ,,\n\
                    2024-01-01\n";
        let txns = parse_csv_str(text).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].date, "");
        assert_eq!(txns[0].amount, 0.0);
        assert_eq!(txns[1].description, "");
        assert_eq!(txns[1].kind, TxnKind::Income);
    }

    #[test]
    fn test_non_finite_amounts_become_zero() {
        let text = "date,amount,description\n\
                    2024-01-05,NaN,store\n\
                    2024-01-06,inf,store\n";
        let txns = parse_csv_str(text).unwrap();
        assert_eq!(txns[0].amount, 0.0);
        assert_eq!(txns[0].kind, TxnKind::Income);
        assert_eq!(txns[1].amount, 0.0);
    }

    #[test]
    fn test_read_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.csv");
        std::fs::write(&path, "date,amount,description\n2024-01-05,-9.99,music subscription\n").unwrap();
        let txns = read_csv(&path).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, -9.99);
    }
}
