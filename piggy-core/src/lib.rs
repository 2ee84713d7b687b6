//! piggy-core: transaction records, the category rule table and date bucketing

pub mod categories;
pub mod time;
pub mod transaction;

pub use categories::{CategoryRules, OTHER};
pub use time::{Bucket, parse_date};
pub use transaction::{NO_CATEGORY, Transaction, TxnKind};
