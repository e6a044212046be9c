//! Parallel compositing of data entries.
//!
//! Entries are independent, so each one is composited and encoded on a rayon
//! worker. Results are collected in entry order; the header built from them is
//! identical to a sequential run.
//!
//! # Example
//!
//! ```ignore
//! use progmem_assets::build::ParallelComposite;
//!
//! let images = ParallelComposite::new(&config, asset_dir)
//!     .with_jobs(4)
//!     .run()?;
//! ```

use std::path::Path;

use log::debug;
use rayon::prelude::*;

use crate::composition::composite;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::models::EncodedImage;

/// Default number of parallel jobs (uses available parallelism).
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Composites every data entry of a config.
pub struct ParallelComposite<'a> {
    config: &'a PipelineConfig,
    asset_dir: &'a Path,
    jobs: usize,
}

impl<'a> ParallelComposite<'a> {
    pub fn new(config: &'a PipelineConfig, asset_dir: &'a Path) -> Self {
        Self { config, asset_dir, jobs: default_jobs() }
    }

    /// Set the number of parallel jobs.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Composite all entries, stopping at the first failure.
    pub fn run(&self) -> Result<Vec<EncodedImage>> {
        debug!("Compositing {} entries on {} workers", self.config.data.len(), self.jobs);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build()?;
        pool.install(|| {
            self.config
                .data
                .par_iter()
                .map(|entry| composite(self.config, entry, self.asset_dir).map_err(PipelineError::from))
                .collect::<Result<Vec<_>>>()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_jobs_clamps_to_one() {
        let config = crate::config::PipelineConfig::from_tree(
            &crate::config::parse("[resize]\nfrom = 1\nto = 1\n[offset]\na = 0, 0, 1, 1\n").unwrap(),
        )
        .unwrap();
        let dir = Path::new(".");
        assert_eq!(ParallelComposite::new(&config, dir).with_jobs(0).jobs(), 1);
        assert_eq!(ParallelComposite::new(&config, dir).with_jobs(3).jobs(), 3);
    }

    #[test]
    fn test_no_entries_yields_no_images() {
        let config = crate::config::PipelineConfig::from_tree(
            &crate::config::parse("[resize]\nfrom = 1\nto = 1\n[offset]\na = 0, 0, 1, 1\n").unwrap(),
        )
        .unwrap();
        let images = ParallelComposite::new(&config, Path::new(".")).with_jobs(2).run().unwrap();
        assert!(images.is_empty());
    }
}
