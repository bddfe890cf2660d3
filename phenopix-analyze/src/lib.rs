//! phenopix-analyze: Analysis algorithms over masks and landmarks.
//!
//! This crate provides:
//! - **distribution** - X/Y spatial distribution of labeled mask objects
//! - **homology** - Ward-linkage grouping of pseudo-landmarks across frames
//!
#![warn(missing_docs)]

pub mod distribution;
pub mod homology;

pub use distribution::{analyze_distribution, DistributionOptions};
pub use homology::{constella, cut_tree, linkage, Landmark, LinkageMethod, MergeStep};

// Re-export core error types
pub use phenopix_core::{Error, Result};
