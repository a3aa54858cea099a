//! Configuration discovery and effective settings resolution.
//!
//! The CLI reads `fedramp.toml|yaml|yml` from the working root (or closest
//! ancestor) and merges it with command-line flags into an `Effective`
//! config. Defaults:
//! - `baseline`: `moderate`
//! - `output`: `human`
//! - `registry`: built-in tables
//! - `unsupported_documents`: `pass`
//! - `patterns`: none (paths must come from the command line); patterns
//!   from the config file are resolved against the root
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::models::Baseline;
use crate::registry::BaselineRegistry;
use crate::validator::{UnsupportedPolicy, Validator, ValidatorOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Config file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["fedramp.toml", "fedramp.yaml", "fedramp.yml"];

pub const OUTPUT_MODES: [&str; 2] = ["human", "json"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `fedramp.toml|yaml`.
pub struct FileConfig {
    pub baseline: Option<Baseline>,
    pub output: Option<String>,
    /// Registry override file, relative to the config root.
    pub registry: Option<String>,
    pub unsupported_documents: Option<UnsupportedPolicy>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub baseline: Baseline,
    pub output: String,
    pub registry_path: Option<PathBuf>,
    pub unsupported_documents: UnsupportedPolicy,
    pub patterns: Vec<String>,
    pub config_found: bool,
}

impl Effective {
    /// Note shown on stderr in human mode when no config file was found.
    pub fn defaults_note(&self) -> Option<&'static str> {
        if self.config_found || self.output == "json" {
            None
        } else {
            Some("No fedramp.toml found; using defaults.")
        }
    }

    /// Build the validator described by this configuration.
    pub fn validator(&self) -> Result<Validator, ConfigError> {
        let registry = match &self.registry_path {
            Some(path) => {
                debug!(path = %path.display(), "loading baseline registry override");
                BaselineRegistry::load(path)?
            }
            None => BaselineRegistry::builtin(),
        };
        Ok(Validator::new(Arc::new(registry)).with_options(ValidatorOptions {
            unsupported_documents: self.unsupported_documents,
        }))
    }
}

/// Walk upward from `start` to find the configuration root.
///
/// Stops when a config file or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|name| cur.join(name).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `FileConfig` from the first config file present under `root`.
pub fn load_config(root: &Path) -> Result<Option<FileConfig>, ConfigError> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let cfg: FileConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| ConfigError::Toml { path, source })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml { path, source })?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_baseline: Option<Baseline>,
    cli_output: Option<&str>,
    cli_registry: Option<&str>,
    cli_patterns: &[String],
) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let loaded = load_config(&root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let baseline = cli_baseline.or(cfg.baseline).unwrap_or(Baseline::Moderate);

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if !OUTPUT_MODES.contains(&output.as_str()) {
        return Err(ConfigError::InvalidValue {
            key: "output",
            message: format!("'{output}' (expected human or json)"),
        });
    }

    // CLI registry paths are taken as given; config paths are root-relative.
    let registry_path = match cli_registry {
        Some(p) => Some(PathBuf::from(p)),
        None => cfg.registry.map(|p| root.join(p)),
    };

    // Likewise for patterns: CLI ones stay relative to the working directory.
    let patterns = if cli_patterns.is_empty() {
        cfg.patterns
            .iter()
            .map(|p| root.join(p).to_string_lossy().to_string())
            .collect()
    } else {
        cli_patterns.to_vec()
    };

    Ok(Effective {
        root,
        baseline,
        output,
        registry_path,
        unsupported_documents: cfg.unsupported_documents.unwrap_or_default(),
        patterns,
        config_found,
    })
}
