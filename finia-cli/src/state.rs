use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// App home: `$FINIA_HOME` if set, else `~/.finia`.
pub fn finia_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FINIA_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".finia"))
}

pub fn ensure_finia_home() -> Result<PathBuf> {
    let dir = finia_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Where the dashboard writes log lines while it owns the terminal.
pub fn log_path() -> Result<PathBuf> {
    Ok(ensure_finia_home()?.join("finia.log"))
}
