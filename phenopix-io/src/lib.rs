//! phenopix-io: File I/O for images, figures, and analysis results.
//!
//! Reads grayscale images and masks into core types, writes rendered
//! figures out as PNG or TIFF, exports the observation store as JSON, and
//! provides the debug-image sink used by analysis steps.
//!
#![warn(missing_docs)]

mod debug;
mod error;
mod reader;
mod writer;

pub use debug::DebugSink;
pub use error::{Error, Result};
pub use reader::{read_gray, read_labeled, read_mask};
pub use writer::{save_results, write_figure, write_rgba};
