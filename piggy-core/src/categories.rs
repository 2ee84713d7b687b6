//! Keyword rule table used to classify transaction descriptions.
//!
//! The table is plain data: a category -> keywords mapping plus an explicit
//! priority order. Callers pass it to the classifier, so tests and user
//! config can swap in their own table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category assigned when no keyword matches
pub const OTHER: &str = "Other";

pub const PRODUCTS: &str = "Products";
pub const CAFES_AND_RESTAURANTS: &str = "Cafes & Restaurants";
pub const TRANSPORT: &str = "Transport";
pub const INTERNET_AND_COMMUNICATION: &str = "Internet & Communication";
pub const HOBBIES_AND_ENTERTAINMENT: &str = "Hobbies & Entertainment";
pub const CLOTHES: &str = "Clothes";
pub const HEALTH: &str = "Health";
pub const SPORTS: &str = "Sports";
pub const EDUCATION: &str = "Education";
pub const UTILITIES: &str = "Utilities";
pub const DEPOSITS_AND_INVESTMENTS: &str = "Deposits & Investments";
pub const SALARY_AND_INCOME: &str = "Salary & Income";
pub const LOAN_REPAYMENT: &str = "Loan Repayment";
pub const GIFTS: &str = "Gifts";
pub const TAXES: &str = "Taxes";
pub const SUBSCRIPTIONS: &str = "Subscriptions";
pub const MARKETPLACES: &str = "Marketplaces";
pub const SERVICES: &str = "Services";

/// Category keywords plus the order in which categories are tried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RulesFile")]
pub struct CategoryRules {
    keywords: BTreeMap<String, Vec<String>>,
    priority: Vec<String>,
}

/// On-disk shape of a rules file (TOML or JSON)
#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    keywords: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    priority: Vec<String>,
}

impl From<RulesFile> for CategoryRules {
    fn from(file: RulesFile) -> Self {
        CategoryRules::new(file.keywords, file.priority)
    }
}

impl CategoryRules {
    /// Build a rule table. Keywords are lower-cased so matching against a
    /// lower-cased description stays case-insensitive.
    pub fn new<K, P>(keywords: K, priority: P) -> Self
    where
        K: IntoIterator<Item = (String, Vec<String>)>,
        P: IntoIterator<Item = String>,
    {
        let keywords = keywords
            .into_iter()
            .map(|(cat, words)| {
                let words = words.into_iter().map(|w| w.to_lowercase()).collect();
                (cat, words)
            })
            .collect();

        Self {
            keywords,
            priority: priority.into_iter().collect(),
        }
    }

    /// Convenience constructor from string slices, mostly for fixtures
    pub fn from_slices(keywords: &[(&str, &[&str])], priority: &[&str]) -> Self {
        Self::new(
            keywords.iter().map(|(cat, words)| {
                (
                    cat.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            }),
            priority.iter().map(|p| p.to_string()),
        )
    }

    /// Category -> keyword substrings
    pub fn keywords(&self) -> &BTreeMap<String, Vec<String>> {
        &self.keywords
    }

    /// Categories in the order the classifier tries them
    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Keywords for one category (empty if the category is unknown)
    pub fn keywords_for(&self, category: &str) -> &[String] {
        self.keywords
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Categories that have keywords but never appear in the priority list.
    /// The classifier can never pick these.
    pub fn unreachable(&self) -> Vec<&str> {
        self.keywords
            .keys()
            .filter(|cat| !self.priority.iter().any(|p| p == *cat))
            .map(String::as_str)
            .collect()
    }

    /// Log a warning for every unreachable category
    pub fn warn_unreachable(&self) {
        for cat in self.unreachable() {
            tracing::warn!(category = cat, "category has keywords but no priority slot; it will never match");
        }
    }

    /// The built-in rule table
    pub fn builtin() -> Self {
        Self::from_slices(BUILTIN_KEYWORDS, BUILTIN_PRIORITY)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        PRODUCTS,
        &[
            "products", "store", "grocery", "pyaterochka", "yarche", "mariya", "magnit",
            "self-service", "food", "stall",
        ],
    ),
    (
        CAFES_AND_RESTAURANTS,
        &[
            "restaurant", "cafe", "lunch", "fast food", "dinner", "breakfast", "pizza",
            "canteen", "delivery", "kitchen",
        ],
    ),
    (TRANSPORT, &["taxi", "bus", "metro", "transport", "airplane"]),
    (
        INTERNET_AND_COMMUNICATION,
        &[
            "mobile", "internet", "mts", "service", "networks", "phone", "beeline", "megafon",
            "tele2", "services",
        ],
    ),
    (
        HOBBIES_AND_ENTERTAINMENT,
        &[
            "cinema", "theater", "concert", "games", "cinema hall", "movie", "quest", "musical",
            "standup", "poster", "kassir", "read", "book", "leonardo", "hobby", "creativity",
        ],
    ),
    (
        CLOTHES,
        &[
            "clothes", "shoes", "clothing store", "wardrobe", "shoe store", "accessories",
            "showroom",
        ],
    ),
    (
        HEALTH,
        &[
            "pharmacy", "medicine", "medical", "doctor", "appointment", "clinic", "pills", "med",
            "physician",
        ],
    ),
    (
        SPORTS,
        &[
            "sports", "gym", "fitness", "sports hall", "athletic", "hall", "pool", "training",
            "coach",
        ],
    ),
    (
        EDUCATION,
        &[
            "course", "studying", "school", "university", "tutor", "lesson", "education",
        ],
    ),
    (
        UTILITIES,
        &[
            "utility", "light", "housing", "water", "electricity", "gas", "trash", "heating",
        ],
    ),
    (
        DEPOSITS_AND_INVESTMENTS,
        &["clients", "deposit", "investments", "dividend", "share", "interest"],
    ),
    (
        SALARY_AND_INCOME,
        &[
            "salary", "income", "accrual", "stipend", "bonus", "crediting", "profit",
        ],
    ),
    (
        LOAN_REPAYMENT,
        &["loan", "mortgage", "repayment", "interest"],
    ),
    (
        GIFTS,
        &[
            "gift", "congratulation", "holiday", "wrapping", "balloons", "gifts",
        ],
    ),
    (TAXES, &["tax", "fiscal", "taxes", "ndfl", "vat", "duty"]),
    (
        SUBSCRIPTIONS,
        &[
            "subscription", "subscriptions", "plus", "ivi", "okko", "start", "music", "vk",
        ],
    ),
    (
        MARKETPLACES,
        &["marketplace", "market", "wildberries", "ozon"],
    ),
    (
        SERVICES,
        &[
            "services", "beauty", "hairdresser", "salon", "repair", "master", "cleaning",
        ],
    ),
];

const BUILTIN_PRIORITY: &[&str] = &[
    SALARY_AND_INCOME,
    PRODUCTS,
    LOAN_REPAYMENT,
    DEPOSITS_AND_INVESTMENTS,
    CAFES_AND_RESTAURANTS,
    TRANSPORT,
    TAXES,
    INTERNET_AND_COMMUNICATION,
    UTILITIES,
    HEALTH,
    CLOTHES,
    HOBBIES_AND_ENTERTAINMENT,
    EDUCATION,
    SPORTS,
    SERVICES,
    MARKETPLACES,
    SUBSCRIPTIONS,
    GIFTS,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_priority_covers_every_category() {
        let rules = CategoryRules::builtin();
        assert_eq!(rules.keywords().len(), 18);
        assert_eq!(rules.priority().len(), 18);
        assert!(rules.unreachable().is_empty());
        assert_eq!(rules.priority()[0], SALARY_AND_INCOME);
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let rules = CategoryRules::from_slices(&[("Shops", &["STORE", "Mall"])], &["Shops"]);
        assert_eq!(rules.keywords_for("Shops"), &["store".to_string(), "mall".to_string()]);
        assert!(rules.keywords_for("Missing").is_empty());
    }

    #[test]
    fn test_unreachable_categories() {
        let rules = CategoryRules::from_slices(
            &[("Salary", &["salary"]), ("Products", &["store"]), ("Gifts", &["gift"])],
            &["Salary", "Products"],
        );
        assert_eq!(rules.unreachable(), vec!["Gifts"]);
    }

    #[test]
    fn test_rules_from_toml() {
        let src = r#"
priority = ["Salary", "Products"]

[keywords]
Salary = ["Salary", "payroll"]
Products = ["store"]
"#;
        let rules: CategoryRules = toml::from_str(src).unwrap();
        assert_eq!(rules.priority(), &["Salary".to_string(), "Products".to_string()]);
        assert_eq!(rules.keywords_for("Salary")[0], "salary");
    }
}
