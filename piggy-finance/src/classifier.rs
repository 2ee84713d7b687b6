//! Deterministic keyword classifier.
//!
//! Priority order decides ties: the first category in the priority list with
//! any keyword contained in the description wins. No match -> "Other".

use piggy_core::{CategoryRules, OTHER, Transaction};

/// Classify a single description against a rule table.
pub fn classify(description: &str, rules: &CategoryRules) -> String {
    let desc = description.to_lowercase();

    rules
        .priority()
        .iter()
        .find(|cat| {
            rules
                .keywords_for(cat)
                .iter()
                .any(|kw| desc.contains(kw.as_str()))
        })
        .cloned()
        .unwrap_or_else(|| OTHER.to_string())
}

/// Classify every transaction in place. Depends only on the description, so
/// running it twice gives the same categories.
pub fn classify_all(txns: &mut [Transaction], rules: &CategoryRules) {
    for txn in txns.iter_mut() {
        txn.category = Some(classify(&txn.description, rules));
    }
    tracing::debug!(count = txns.len(), "classified transactions");
}
