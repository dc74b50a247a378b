//! Generation configuration for llmsgen.
//!
//! Config lives at `<site_dir>/llmsgen.toml` unless a path is given
//! explicitly. CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LlmsGenError, Result};

/// Default configuration file name, looked up in the site directory.
pub const CONFIG_FILE_NAME: &str = "llmsgen.toml";

// ---------------------------------------------------------------------------
// Config struct (matching llmsgen.toml schema)
// ---------------------------------------------------------------------------

/// Process-scoped generation settings, supplied once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// File name of the index export.
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,

    /// File name of the full-text export.
    #[serde(default = "default_output_file_name_full")]
    pub output_file_name_full: String,

    /// Ordered exclusion patterns applied to site-relative paths.
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Emit diagnostic logging for every visited path and route.
    #[serde(default)]
    pub debug: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_file_name: default_output_file_name(),
            output_file_name_full: default_output_file_name_full(),
            exclude_patterns: default_exclude_patterns(),
            debug: false,
        }
    }
}

fn default_output_file_name() -> String {
    "llms.txt".into()
}
fn default_output_file_name_full() -> String {
    "llms-full.txt".into()
}
fn default_exclude_patterns() -> Vec<String> {
    vec!["**/CLAUDE.md".into(), "**/node_modules/**".into()]
}

impl GenerationConfig {
    /// Reject settings that would make the run write somewhere unexpected.
    pub fn validate(&self) -> Result<()> {
        for (key, name) in [
            ("output_file_name", &self.output_file_name),
            ("output_file_name_full", &self.output_file_name_full),
        ] {
            if name.trim().is_empty() {
                return Err(LlmsGenError::config(format!("{key} must not be empty")));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(LlmsGenError::config(format!(
                    "{key} must be a bare file name, got '{name}'"
                )));
            }
        }

        if self.output_file_name == self.output_file_name_full {
            return Err(LlmsGenError::config(format!(
                "output_file_name and output_file_name_full are both '{}'",
                self.output_file_name
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file for a site (`<site_dir>/llmsgen.toml`).
pub fn config_file_path(site_dir: &Path) -> PathBuf {
    site_dir.join(CONFIG_FILE_NAME)
}

/// Resolve the config for a site.
///
/// An explicit path must exist. Otherwise `<site_dir>/llmsgen.toml` is used
/// when present, and defaults when it is not.
pub fn load_config(site_dir: &Path, explicit: Option<&Path>) -> Result<GenerationConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let path = config_file_path(site_dir);
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(GenerationConfig::default());
    }

    load_config_from(&path)
}

/// Load and validate the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<GenerationConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LlmsGenError::io(path, e))?;

    let config: GenerationConfig = toml::from_str(&content).map_err(|e| {
        LlmsGenError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;

    Ok(config)
}

/// Write a default config file into the site directory.
/// Returns the path to the created file.
pub fn init_config(site_dir: &Path) -> Result<PathBuf> {
    let path = config_file_path(site_dir);
    if path.exists() {
        return Err(LlmsGenError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&GenerationConfig::default())
        .map_err(|e| LlmsGenError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LlmsGenError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
