//! Configuration loading from disk

use std::fs;
use std::path::Path;

use super::schema::PipelineConfig;
use super::tree::parse;
use super::ConfigError;

/// Load and check the merge configuration at `path`.
///
/// # Example
/// ```ignore
/// let config = load_config(Path::new("avatar.ini"))?;
/// println!("{} entries", config.data.len());
/// ```
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let tree = parse(&contents)?;
    PipelineConfig::from_tree(&tree)
}
