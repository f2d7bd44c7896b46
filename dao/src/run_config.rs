use anyhow::{bail, Context};
use pdist::Variant;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What a timing run measures. Missing keys take the defaults: 1000 points in
/// 3 dimensions from seed 42, 7 timed runs of every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub num_points: usize,
    pub dim: usize,
    pub seed: u64,
    pub runs: usize,
    pub variants: Vec<Variant>,
    /// Load points from this CSV instead of generating them.
    pub input: Option<PathBuf>,
    /// Load points from a directory holding `meta_data.txt` and its data file.
    pub data_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_points: 1000,
            dim: 3,
            seed: 42,
            runs: 7,
            variants: Variant::ALL.to_vec(),
            input: None,
            data_dir: None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.runs == 0 {
            bail!("runs must be at least 1");
        }
        if self.input.is_some() && self.data_dir.is_some() {
            bail!("input and data_dir are mutually exclusive");
        }
        if self.input.is_none() && self.data_dir.is_none() && self.dim == 0 {
            bail!("dim must be at least 1");
        }
        if self.variants.is_empty() {
            bail!("no variants selected");
        }
        Ok(())
    }
}

pub fn run_config_from_str(contents: &str) -> anyhow::Result<RunConfig> {
    let config: RunConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

pub fn run_config_from_file(path: impl AsRef<Path>) -> anyhow::Result<RunConfig> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    run_config_from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}
