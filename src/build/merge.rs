//! Merge run: config + layer PNGs -> RGB565 header

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::info;

use crate::build::ParallelComposite;
use crate::config::{load_config, DataEntry, PipelineConfig};
use crate::error::{PipelineError, Result};
use crate::export::{Exporter, HeaderExporter, ManifestExporter};
use crate::output::is_header_path;

/// Inputs of a merge run.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub config_path: PathBuf,
    pub asset_dir: PathBuf,
    pub output_path: PathBuf,
    /// Also write a JSON manifest here.
    pub manifest_path: Option<PathBuf>,
    /// Worker threads; `None` uses available parallelism.
    pub jobs: Option<usize>,
}

/// Summary of a finished merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub images: usize,
    pub parts: usize,
    pub output_path: PathBuf,
}

/// Check the paths given on the command line before any work starts.
pub fn check_paths(options: &MergeOptions) -> Result<()> {
    if !options.config_path.is_file() {
        return Err(PipelineError::ConfigNotFound(options.config_path.clone()));
    }
    if !options.asset_dir.is_dir() {
        return Err(PipelineError::AssetDirNotFound(options.asset_dir.clone()));
    }
    if !is_header_path(&options.output_path) {
        return Err(PipelineError::InvalidOutputPath(options.output_path.clone()));
    }
    Ok(())
}

/// Fail if any layer named by any data entry is missing from `asset_dir`.
///
/// Only files referenced by `data` entries are checked.
pub fn check_assets(config: &PipelineConfig, asset_dir: &Path) -> Result<()> {
    for entry in &config.data {
        for layer in &entry.layers {
            let path = asset_dir.join(&layer.filename);
            if !path.is_file() {
                return Err(PipelineError::MissingAsset(path));
            }
        }
    }
    Ok(())
}

/// Number entries that share a `parts` value 0, 1, 2... in file order.
pub fn assign_instance_indices(entries: &mut [DataEntry]) {
    let mut counters: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        let counter = counters.entry(entry.parts.clone()).or_insert(0);
        entry.pidx = *counter;
        *counter += 1;
    }
}

/// Run a full merge. Nothing is written to `output_path` unless every step
/// before it succeeds.
pub fn run_merge(options: &MergeOptions) -> Result<MergeReport> {
    check_paths(options)?;

    let mut config = load_config(&options.config_path)?;
    check_assets(&config, &options.asset_dir)?;
    assign_instance_indices(&mut config.data);

    let mut compositor = ParallelComposite::new(&config, &options.asset_dir);
    if let Some(jobs) = options.jobs {
        compositor = compositor.with_jobs(jobs);
    }
    let images = compositor.run()?;

    HeaderExporter::new(config.prefix.as_str()).export(&images, &options.output_path)?;
    info!("Saved: {}", options.output_path.display());

    if let Some(manifest_path) = &options.manifest_path {
        ManifestExporter::new().export(&images, manifest_path)?;
        info!("Saved: {}", manifest_path.display());
    }

    let mut parts: Vec<&str> = images.iter().map(|i| i.parts.as_str()).collect();
    parts.sort_unstable();
    parts.dedup();

    Ok(MergeReport { images: images.len(), parts: parts.len(), output_path: options.output_path.clone() })
}
