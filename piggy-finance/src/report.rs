//! Full pipeline: classify, aggregate, derive a budget and compare it.

use crate::aggregate::{
    BasicStats, CategoryStats, HistoricalSpending, TimeBucket, basic_stats, by_category,
    by_month, by_quarter, historical_spending,
};
use crate::budget::{Budget, BudgetComparison, BudgetPolicy, build_template, compare_to_actual};
use crate::chart::{ChartBar, expenses_by_category};
use crate::classifier::classify_all;
use piggy_core::{CategoryRules, Transaction};
use serde::Serialize;

/// Everything the presentation layer needs, computed in one pass
#[derive(Debug, Clone, Serialize)]
pub struct FinanceReport {
    pub transactions: Vec<Transaction>,
    pub basic: BasicStats,
    pub categories: Vec<CategoryStats>,
    pub monthly: Vec<TimeBucket>,
    pub quarterly: Vec<TimeBucket>,
    pub history: HistoricalSpending,
    pub budget: Budget,
    pub comparison: Vec<BudgetComparison>,
    pub chart: Vec<ChartBar>,
}

impl FinanceReport {
    /// Classify `txns` with `rules` and run every aggregation pass.
    /// Savings in the budget are based on the set's total income.
    pub fn build(mut txns: Vec<Transaction>, rules: &CategoryRules, policy: &BudgetPolicy) -> Self {
        classify_all(&mut txns, rules);

        let basic = basic_stats(&txns);
        let categories = by_category(&txns);
        let monthly = by_month(&txns);
        let quarterly = by_quarter(&txns);
        let history = historical_spending(&txns);
        tracing::debug!(
            categories = categories.len(),
            months = monthly.len(),
            quarters = quarterly.len(),
            "aggregated transactions"
        );

        let budget = build_template(&history, Some(basic.total_income), policy);
        let comparison = compare_to_actual(&budget, &txns);
        let chart = expenses_by_category(&txns);
        tracing::debug!(lines = budget.lines.len(), "built budget");

        Self {
            transactions: txns,
            basic,
            categories,
            monthly,
            quarterly,
            history,
            budget,
            comparison,
            chart,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = FinanceReport::build(Vec::new(), &CategoryRules::builtin(), &BudgetPolicy::default());
        assert!(report.is_empty());
        assert_eq!(report.basic.balance, 0.0);
        assert!(report.categories.is_empty());
        assert!(report.monthly.is_empty());
        // Savings line is always present
        assert_eq!(report.budget.lines.len(), 1);
    }

    #[test]
    fn test_report_serializes() {
        let txns = vec![Transaction::new("2024-03-01", -12.0, "Pizza for lunch")];
        let report = FinanceReport::build(txns, &CategoryRules::builtin(), &BudgetPolicy::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["transactions"][0]["category"], "Cafes & Restaurants");
        assert_eq!(json["comparison"][0]["status"], "within");
    }
}
