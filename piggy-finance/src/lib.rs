//! piggy-finance: keyword classifier, aggregation passes, budget engine and chart data

pub mod aggregate;
pub mod budget;
pub mod chart;
pub mod classifier;
pub mod report;

pub use aggregate::{
    BasicStats, CategoryStats, HistoricalSpending, TimeBucket, basic_stats, by_category,
    by_month, by_quarter, historical_spending,
};
pub use budget::{Budget, BudgetComparison, BudgetPolicy, BudgetStatus, build_template, compare_to_actual};
pub use chart::{ChartBar, expenses_by_category};
pub use classifier::{classify, classify_all};
pub use report::FinanceReport;
