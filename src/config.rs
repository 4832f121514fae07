//! Generator configuration (YAML)
//!
//! ```yaml
//! csv:
//!   file_path: data/airdrop.csv
//! output:
//!   dir: out
//!   leaves_file_limit: 1000
//!   write_proofs: true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::airdrop::output::DEFAULT_LEAVES_FILE_LIMIT;
use crate::airdrop::OutputOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub csv: CsvConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// CSV file settings for the allocation list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvConfig {
    #[serde(default)]
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_leaves_file_limit")]
    pub leaves_file_limit: usize,
    #[serde(default = "default_write_proofs")]
    pub write_proofs: bool,
}

fn default_leaves_file_limit() -> usize {
    DEFAULT_LEAVES_FILE_LIMIT
}

fn default_write_proofs() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            leaves_file_limit: default_leaves_file_limit(),
            write_proofs: default_write_proofs(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&data).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.csv.file_path.as_os_str().is_empty() {
            bail!("csv.file_path is required");
        }
        Ok(())
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            dir: self.output.dir.clone(),
            leaves_file_limit: self.output.leaves_file_limit,
            write_proofs: self.output.write_proofs,
        }
    }
}
