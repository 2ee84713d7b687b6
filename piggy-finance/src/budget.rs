//! Budget template derived from historical spending, and a comparison of that
//! template against actual spend.

use crate::aggregate::{HistoricalSpending, Tally, round2};
use piggy_core::Transaction;
use serde::{Deserialize, Serialize};

/// Name of the synthetic savings line
pub const SAVINGS: &str = "Savings";

/// Rates used when deriving a budget template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetPolicy {
    /// Extra room on top of the historical average (0.05 = 5%)
    pub headroom: f64,
    /// Share of known income set aside as savings
    pub income_savings_rate: f64,
    /// Share of total average spend set aside when income is unknown
    pub fallback_savings_rate: f64,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            headroom: 0.05,
            income_savings_rate: 0.15,
            fallback_savings_rate: 0.10,
        }
    }
}

/// One budget line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub limit: f64,
    pub recommended: f64,
}

/// Budget template, in historical-average order with Savings last
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub lines: Vec<BudgetLine>,
}

impl Budget {
    pub fn line(&self, category: &str) -> Option<&BudgetLine> {
        self.lines.iter().find(|l| l.category == category)
    }

    /// Insert a line, replacing any existing line for the same category in place
    fn upsert(&mut self, line: BudgetLine) {
        match self.lines.iter_mut().find(|l| l.category == line.category) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    #[serde(rename = "within")]
    Within,
    #[serde(rename = "exceeded")]
    Exceeded,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Within => "within budget",
            BudgetStatus::Exceeded => "exceeded",
        }
    }
}

/// Budget vs. actual for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: String,
    pub limit: f64,
    pub actual: f64,
    pub difference: f64,
    pub status: BudgetStatus,
}

/// Build a budget template from historical averages.
///
/// Savings come from income when it is known and positive; otherwise from
/// total average spend.
pub fn build_template(
    history: &HistoricalSpending,
    total_income: Option<f64>,
    policy: &BudgetPolicy,
) -> Budget {
    let mut budget = Budget::default();

    for (category, avg) in &history.average_spending {
        budget.upsert(BudgetLine {
            category: category.clone(),
            limit: round2(avg * (1.0 + policy.headroom)),
            recommended: *avg,
        });
    }

    let savings = match total_income {
        Some(income) if income > 0.0 => income * policy.income_savings_rate,
        _ => {
            let total_avg: f64 = history.average_spending.iter().map(|(_, v)| v).sum();
            total_avg * policy.fallback_savings_rate
        }
    };
    let savings = round2(savings);
    budget.upsert(BudgetLine {
        category: SAVINGS.to_string(),
        limit: savings,
        recommended: savings,
    });

    budget
}

/// Compare every budget line with the actual expense in that category.
/// Spend in categories without a budget line is not reported.
pub fn compare_to_actual(budget: &Budget, txns: &[Transaction]) -> Vec<BudgetComparison> {
    let mut actual: Tally<f64> = Tally::new();
    for t in txns.iter().filter(|t| t.is_expense()) {
        *actual.entry(t.category_or_default()) += t.abs_amount();
    }

    budget
        .lines
        .iter()
        .map(|line| {
            let spent = actual.get(&line.category).copied().unwrap_or(0.0);
            let difference = line.limit - spent;
            BudgetComparison {
                category: line.category.clone(),
                limit: line.limit,
                actual: spent,
                difference,
                status: if difference >= 0.0 {
                    BudgetStatus::Within
                } else {
                    BudgetStatus::Exceeded
                },
            }
        })
        .collect()
}
