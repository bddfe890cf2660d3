//! phenopix-core: Core types for plant phenotyping image analysis.
//!
//! This crate provides the foundational abstractions for intensity images,
//! binary and labeled masks, regions of interest, toolkit settings, and the
//! measurement (observation) store.
//!

pub mod error;
pub mod geometry;
pub mod image;
pub mod mask;
pub mod observations;
pub mod params;

pub use error::{Error, Result};
pub use geometry::{Bounds, Region};
pub use image::IntensityImage;
pub use mask::{BinaryMask, LabeledMask};
pub use observations::{Observation, ObservationValue, Observations};
pub use params::{DebugMode, Params};
