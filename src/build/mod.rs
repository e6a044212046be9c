//! Tool runs for progmem-assets
//!
//! Each run takes paths from the command line and produces one header:
//! - **merge**: config + layer PNGs, composited per data entry
//! - **split**: one wide PNG cut into vertical strips
//! - **file2h**: any file as a raw byte array
//!
//! # Example
//!
//! ```ignore
//! use progmem_assets::build::{run_merge, MergeOptions};
//!
//! let report = run_merge(&MergeOptions {
//!     config_path: "avatar.ini".into(),
//!     asset_dir: "png".into(),
//!     output_path: "avatar.h".into(),
//!     manifest_path: None,
//!     jobs: None,
//! })?;
//! println!("Wrote {} images", report.images);
//! ```

pub mod file2h;
pub mod merge;
pub mod parallel;
pub mod split;

pub use file2h::run_file2h;
pub use merge::{assign_instance_indices, check_assets, check_paths, run_merge, MergeOptions, MergeReport};
pub use parallel::ParallelComposite;
pub use split::{encode_strips, run_split, split_strips, SplitOptions, SPLIT_PREFIX};
