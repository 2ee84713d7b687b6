pub mod csv_file;
pub mod json_file;

use anyhow::{Result, bail};
use piggy_core::Transaction;
use std::path::Path;

/// Supported statement file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Guess the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Read any supported file, dispatching on its extension.
pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let txns = match SourceFormat::from_path(path) {
        Some(SourceFormat::Csv) => csv_file::read_csv(path)?,
        Some(SourceFormat::Json) => json_file::read_json(path)?,
        None => bail!("unsupported file type: {} (expected .csv or .json)", path.display()),
    };
    tracing::info!(count = txns.len(), path = %path.display(), "imported transactions");
    Ok(txns)
}

/// Lenient amount parsing: blanks, junk and non-finite values become 0
pub(crate) fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .replace(' ', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SourceFormat::from_path(Path::new("a/b.CSV")), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_path(Path::new("data.json")), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("no_ext")), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" -12.50 "), -12.5);
        assert_eq!(parse_amount("1 200"), 1200.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("-Infinity"), 0.0);
    }

    #[test]
    fn test_import_dispatch() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(f, "date,amount,description").unwrap();
        writeln!(f, "2024-01-05,-100,store purchase").unwrap();
        let txns = import_file(f.path()).unwrap();
        assert_eq!(txns.len(), 1);

        let other = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(import_file(other.path()).is_err());
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(import_file("/definitely/not/here.csv").is_err());
    }
}
