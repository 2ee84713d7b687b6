//! Transaction records shared by ingest, classification and aggregation

use serde::{Deserialize, Serialize};

/// Category label used when a transaction reaches aggregation unclassified
pub const NO_CATEGORY: &str = "No category";

/// A single money movement read from a statement file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date of the transaction (YYYY-MM-DD); kept raw so bad dates survive ingest
    pub date: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    /// Free-text description from the statement
    pub description: String,
    /// Set by the classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Income/expense label derived from the sign at ingest time
    #[serde(default)]
    pub kind: TxnKind,
}

/// Income/expense label attached by the file readers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TxnKind {
    #[serde(rename = "income")]
    #[default]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TxnKind {
    /// Zero counts as income
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            TxnKind::Income
        } else {
            TxnKind::Expense
        }
    }
}

impl Transaction {
    /// Create an unclassified transaction
    pub fn new(date: impl Into<String>, amount: f64, description: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            amount,
            description: description.into(),
            category: None,
            kind: TxnKind::from_amount(amount),
        }
    }

    /// Builder-style category assignment, handy for fixtures
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Category, or the "No category" sentinel when unclassified
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(NO_CATEGORY)
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (strictly positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_creation() {
        let txn = Transaction::new("2024-01-05", -100.0, "store purchase");
        assert!(txn.is_expense());
        assert!(!txn.is_income());
        assert_eq!(txn.kind, TxnKind::Expense);
        assert_eq!(txn.abs_amount(), 100.0);
        assert_eq!(txn.category_or_default(), NO_CATEGORY);
    }

    #[test]
    fn test_zero_amount_is_neither_income_nor_expense() {
        let txn = Transaction::new("2024-01-05", 0.0, "adjustment");
        assert!(!txn.is_income());
        assert!(!txn.is_expense());
        // the kind label still files it as income
        assert_eq!(txn.kind, TxnKind::Income);
    }

    #[test]
    fn test_serde_skips_missing_category() {
        let txn = Transaction::new("2024-02-10", 2000.0, "salary payment");
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("category"));
        assert!(json.contains("\"kind\":\"income\""));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }
}
