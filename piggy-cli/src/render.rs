//! Plain-text rendering of a finance report.

use piggy_core::CategoryRules;
use piggy_finance::{FinanceReport, TimeBucket};

pub fn report_text(report: &FinanceReport) -> String {
    let mut out = String::new();
    let b = &report.basic;
    out.push_str("=== Financial report ===\n");
    out.push_str(&format!("Income:   {:.2}\n", b.total_income));
    out.push_str(&format!("Expenses: {:.2}\n", b.total_expense.abs()));
    out.push_str(&format!("Balance:  {:.2}\n", b.balance));
    out.push_str(&format!(
        "Transactions: {} (income {}, expense {})\n",
        b.transaction_count, b.income_transactions, b.expense_transactions
    ));

    out.push_str("\n## By category\n");
    for c in &report.categories {
        out.push_str(&format!(
            "  {}: {:.2} ({:.1}%) count={}\n",
            c.category,
            c.sum.abs(),
            c.percent,
            c.count
        ));
    }

    out.push_str("\n## Monthly\n");
    for m in &report.monthly {
        out.push_str(&bucket_line(m));
    }

    out.push_str("\n## Quarterly\n");
    for q in &report.quarterly {
        out.push_str(&bucket_line(q));
    }

    out.push_str("\n## Highest average monthly spend\n");
    for (cat, avg) in &report.history.top_categories {
        out.push_str(&format!("  {}: {:.2} per month\n", cat, avg));
    }

    out.push_str("\n## Budget vs actual\n");
    for c in &report.comparison {
        out.push_str(&format!(
            "  {}: spent {:.2} / limit {:.2} -> {}\n",
            c.category,
            c.actual,
            c.limit,
            c.status.label()
        ));
    }

    out
}

fn bucket_line(bucket: &TimeBucket) -> String {
    format!(
        "  {}: income {:.2} | expenses {:.2} -> top: {}\n",
        bucket.key,
        bucket.income,
        bucket.expenses.abs(),
        top_list(&bucket.top_categories)
    )
}

fn top_list(top: &[(String, usize)]) -> String {
    top.iter()
        .map(|(cat, n)| format!("{cat} ({n})"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn rules_text(rules: &CategoryRules) -> String {
    let mut out = String::new();
    for (i, cat) in rules.priority().iter().enumerate() {
        out.push_str(&format!("{:>2}. {}: {}\n", i + 1, cat, rules.keywords_for(cat).join(", ")));
    }
    let unreachable = rules.unreachable();
    if !unreachable.is_empty() {
        out.push_str(&format!("\nNot in priority list (never matched): {}\n", unreachable.join(", ")));
    }
    out
}
