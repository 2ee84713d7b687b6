//! JSON statements: a top-level object with a `transactions` array.
//!
//! {"transactions": [{"date": "2024-01-05", "amount": -100, "description": "..."}]}

use anyhow::{Context, Result};
use piggy_core::{Transaction, TxnKind};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::parse_amount;

#[derive(Debug, Deserialize)]
struct Statement {
    #[serde(default)]
    transactions: Vec<RawRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    #[serde(deserialize_with = "lenient_string")]
    date: String,
    /// Number or numeric string
    amount: Value,
    #[serde(deserialize_with = "lenient_string")]
    description: String,
    #[serde(deserialize_with = "lenient_string")]
    category: String,
}

/// Strings pass through, numbers are stringified, null and anything else
/// become "".
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

impl RawRecord {
    fn amount(&self) -> f64 {
        match &self.amount {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => parse_amount(s),
            _ => 0.0,
        }
    }

    fn into_transaction(self) -> Transaction {
        let amount = self.amount();
        Transaction {
            date: self.date.trim().to_string(),
            amount,
            description: self.description,
            category: (!self.category.trim().is_empty()).then_some(self.category),
            kind: TxnKind::from_amount(amount),
        }
    }
}

/// Parse a JSON statement file into transactions.
pub fn read_json(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_json_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parse JSON statement text
pub fn parse_json_str(text: &str) -> Result<Vec<Transaction>> {
    let statement: Statement = serde_json::from_str(text).context("decoding statement JSON")?;
    Ok(statement
        .transactions
        .into_iter()
        .map(RawRecord::into_transaction)
        .collect())
}
