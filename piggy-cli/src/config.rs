use anyhow::{Context, Result, bail};
use piggy_core::CategoryRules;
use piggy_finance::BudgetPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_piggy_home, piggy_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub budget: BudgetPolicy,
    #[serde(default)]
    pub rules: RulesSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesSection {
    /// Rule table (TOML or JSON) replacing the built-in one
    pub file: Option<PathBuf>,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(piggy_home()?.join("config.toml"))
}

/// Load `config.toml`, falling back to defaults when it does not exist
pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_piggy_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let p = save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Pick the rule table: explicit path, then config, then the built-in table.
pub fn resolve_rules(explicit: Option<&Path>, cfg: &Config) -> Result<CategoryRules> {
    let path = explicit.or(cfg.rules.file.as_deref());
    let rules = match path {
        Some(p) => load_rules(p)?,
        None => CategoryRules::builtin(),
    };
    rules.warn_unreachable();
    Ok(rules)
}

pub fn load_rules(path: &Path) -> Result<CategoryRules> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let rules: CategoryRules = match ext.as_deref() {
        Some("toml") => toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?,
        Some("json") => {
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
        }
        _ => bail!("rules file must be .toml or .json: {}", path.display()),
    };
    tracing::info!(path = %path.display(), "loaded rule table");
    Ok(rules)
}
