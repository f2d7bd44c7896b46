//! Loading point sets and run descriptions from disk.

mod csv_point_loader;
mod run_config;

pub use csv_point_loader::{csv_point_set, csv_point_set_with_dim};
pub use run_config::{run_config_from_file, run_config_from_str, RunConfig};

use anyhow::{bail, Context, Result};
use pdist::PointSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of `meta_data.txt` in a data directory.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DataMetaData {
    pub name: String,
    pub description: String, // e.g. "1000 uniform points in the unit cube"
    pub data_disk_format: String, // only "csv_f64" is understood
    pub path_to_data: String, // relative to the directory
    pub num_records: usize,
    pub dim: usize,
}

pub fn metadata_from_dir(dir_name: impl AsRef<Path>) -> Result<DataMetaData> {
    let path = dir_name.as_ref().join("meta_data.txt");
    let contents =
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

/// Loads the point set a data directory describes and checks it against the metadata.
pub fn point_set_from_dir(dir_name: impl AsRef<Path>) -> Result<(DataMetaData, PointSet)> {
    let dir_name = dir_name.as_ref();
    let meta = metadata_from_dir(dir_name)?;

    let points = match meta.data_disk_format.as_str() {
        "csv_f64" => csv_point_set_with_dim(dir_name.join(&meta.path_to_data), meta.dim)?,
        other => bail!("unsupported data format '{other}' in {}", dir_name.display()),
    };

    if points.len() != meta.num_records || points.dim() != meta.dim {
        bail!(
            "{}: metadata says {} x {}, file holds {} x {}",
            meta.name,
            meta.num_records,
            meta.dim,
            points.len(),
            points.dim()
        );
    }

    Ok((meta, points))
}
