use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$PIGGY_HOME`, or `~/.piggy`
pub fn piggy_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PIGGY_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".piggy"))
}

pub fn ensure_piggy_home() -> Result<PathBuf> {
    let dir = piggy_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
