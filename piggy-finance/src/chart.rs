//! Data handed to an external chart renderer: expense magnitude per category.

use crate::aggregate::Tally;
use piggy_core::Transaction;
use serde::Serialize;

/// One bar of the expenses-by-category chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub category: String,
    pub amount: f64,
}

/// Sum of expense magnitudes per category, first-encountered order.
/// Built straight from the transactions rather than from `by_category`.
pub fn expenses_by_category(txns: &[Transaction]) -> Vec<ChartBar> {
    let mut expenses: Tally<f64> = Tally::new();
    for t in txns.iter().filter(|t| t.is_expense()) {
        *expenses.entry(t.category_or_default()) += t.abs_amount();
    }

    expenses
        .into_entries()
        .into_iter()
        .map(|(category, amount)| ChartBar { category, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::by_category;

    #[test]
    fn test_income_is_left_out() {
        let txns = vec![
            Transaction::new("2024-01-01", 500.0, "").with_category("Salary"),
            Transaction::new("2024-01-02", -20.0, "").with_category("Transport"),
            Transaction::new("2024-01-03", -5.0, "").with_category("Transport"),
        ];
        let bars = expenses_by_category(&txns);
        assert_eq!(
            bars,
            vec![ChartBar {
                category: "Transport".to_string(),
                amount: 25.0
            }]
        );
    }

    #[test]
    fn test_consistent_with_by_category() {
        let txns = vec![
            Transaction::new("2024-01-01", -12.5, "").with_category("Products"),
            Transaction::new("bad", -7.5, "").with_category("Products"),
            Transaction::new("2024-01-02", -3.0, "").with_category("Health"),
        ];
        let stats = by_category(&txns);
        for bar in expenses_by_category(&txns) {
            let cat = stats.iter().find(|s| s.category == bar.category).unwrap();
            assert_eq!(bar.amount, -cat.sum);
        }
    }

    #[test]
    fn test_empty() {
        assert!(expenses_by_category(&[]).is_empty());
    }
}
