use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use piggy_core::Transaction;
use piggy_finance::{FinanceReport, classify, classify_all, expenses_by_category};
use piggy_ingest::SourceFormat;
use std::fs;
use std::path::PathBuf;

mod config;
mod logging;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(name = "piggy", version, about = "Categorize transactions and summarize spending")]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Rule table (.toml or .json) to use instead of the configured one
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import statements, categorize them and print the full report
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the category for a single description
    Categorize {
        description: String,
    },

    /// Show the active rule table in priority order
    Rules {
        /// Exit with an error if any category is missing from the priority list
        #[arg(long)]
        check: bool,
    },

    /// Write expenses-by-category data for an external chart renderer
    Chart {
        #[command(flatten)]
        input: InputArgs,

        /// Write JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a default ~/.piggy/config.toml
    InitConfig,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Statement files; format picked from the extension (.csv / .json)
    files: Vec<PathBuf>,

    /// CSV statement (header: date,amount,description); repeatable
    #[arg(long)]
    csv: Vec<PathBuf>,

    /// JSON statement ({"transactions": [...]}); repeatable
    #[arg(long)]
    json: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    let cfg = config::load_config()?;

    match cli.command {
        Command::Report { input, format } => {
            let rules = config::resolve_rules(cli.rules.as_deref(), &cfg)?;
            let txns = load_transactions(&input)?;
            let report = FinanceReport::build(txns, &rules, &cfg.budget);

            match format {
                Format::Text => print!("{}", render::report_text(&report)),
                Format::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }

        Command::Categorize { description } => {
            let rules = config::resolve_rules(cli.rules.as_deref(), &cfg)?;
            println!("{}", classify(&description, &rules));
        }

        Command::Rules { check } => {
            let rules = config::resolve_rules(cli.rules.as_deref(), &cfg)?;
            print!("{}", render::rules_text(&rules));
            if check && !rules.unreachable().is_empty() {
                bail!("{} categories can never match", rules.unreachable().len());
            }
        }

        Command::Chart { input, out } => {
            let rules = config::resolve_rules(cli.rules.as_deref(), &cfg)?;
            let mut txns = load_transactions(&input)?;
            classify_all(&mut txns, &rules);

            let bars = expenses_by_category(&txns);
            let json = serde_json::to_string_pretty(&bars)?;
            match out {
                Some(path) => {
                    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
                    println!("Wrote {} bars to {}", bars.len(), path.display());
                }
                None => println!("{json}"),
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

/// Import every input file. A file that fails to read is logged and skipped
/// so one bad statement does not sink the whole run.
fn load_transactions(input: &InputArgs) -> Result<Vec<Transaction>> {
    if input.files.is_empty() && input.csv.is_empty() && input.json.is_empty() {
        bail!("no input files (pass <file>, --csv <file> and/or --json <file>)");
    }

    let csv = input.csv.iter().map(|p| (p, SourceFormat::Csv));
    let json = input.json.iter().map(|p| (p, SourceFormat::Json));

    let mut txns = Vec::new();
    for path in &input.files {
        match piggy_ingest::import_file(path) {
            Ok(mut batch) => txns.append(&mut batch),
            Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
        }
    }
    for (path, format) in csv.chain(json) {
        let result = match format {
            SourceFormat::Csv => piggy_ingest::read_csv(path),
            SourceFormat::Json => piggy_ingest::read_json(path),
        };
        match result {
            Ok(mut batch) => {
                tracing::info!(count = batch.len(), path = %path.display(), "imported transactions");
                txns.append(&mut batch);
            }
            Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
        }
    }

    if txns.is_empty() {
        bail!("no transactions to analyze");
    }
    Ok(txns)
}
