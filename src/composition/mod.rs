//! Layer compositing - stacking layer PNGs onto a part canvas

mod blend;
mod error;
mod render;

// Re-export public API
pub use blend::{blend_over, blit_layer};
pub use error::CompositionError;
pub use render::{
    compose_entry, composite, encode_part, mirror_x, preview_path, scale_coord, scale_dimension,
    ComposedPart,
};

/// Result type alias for composition operations.
pub type Result<T> = std::result::Result<T, CompositionError>;
