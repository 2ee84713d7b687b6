//! piggy-ingest: read statement files (CSV / JSON) into transactions.

pub mod parsers;

pub use parsers::csv_file::read_csv;
pub use parsers::json_file::read_json;
pub use parsers::{SourceFormat, import_file};
