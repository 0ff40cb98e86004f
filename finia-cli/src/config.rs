use anyhow::{Context, Result};
use finia_finance::{DEFAULT_ANALYSIS_FILE, DEFAULT_TEMPLATE_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::DEFAULT_CHART_FILE;
use crate::state::{ensure_finia_home, finia_home};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory exports land in when no explicit path is given
    pub output_dir: PathBuf,
    pub analysis_file: String,
    pub template_file: String,
    pub chart_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// tracing-subscriber filter used when neither RUST_LOG nor --verbose is set
    pub filter: String,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            analysis_file: DEFAULT_ANALYSIS_FILE.to_string(),
            template_file: DEFAULT_TEMPLATE_FILE.to_string(),
            chart_file: DEFAULT_CHART_FILE.to_string(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl ExportSection {
    pub fn analysis_path(&self) -> PathBuf {
        self.output_dir.join(&self.analysis_file)
    }

    pub fn template_path(&self) -> PathBuf {
        self.output_dir.join(&self.template_file)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_file)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(finia_home()?.join("config.toml"))
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_finia_home()?.join("config.toml");
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
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}

pub fn show_config(cfg: &Config) -> Result<()> {
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.export.analysis_path(), PathBuf::from("./analisis_finIA.csv"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[export]\noutput_dir = \"/tmp/finia\"\n").unwrap();
        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.export.output_dir, PathBuf::from("/tmp/finia"));
        assert_eq!(cfg.export.template_file, "ejemplo_transacciones.csv");
        assert_eq!(cfg.log.filter, "warn");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[export\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }

    #[test]
    fn test_round_trip() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }
}
