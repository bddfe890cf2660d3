//! phenopix-viz: Pseudocolor rendering for intensity images.
//!
//! This crate maps grayscale intensity values through a colormap and
//! composes the result into a figure raster with an optional tick frame
//! and colorbar. Saving figures to disk lives in `phenopix-io`.
//!
#![warn(missing_docs)]

mod colormap;
mod figure;
mod pseudocolor;

pub use colormap::Colormap;
pub use figure::{colorbar, Figure};
pub use pseudocolor::{pseudocolor, Background, PseudocolorOptions};

// Re-export the core error types used throughout rendering
pub use phenopix_core::{Error, Result};
