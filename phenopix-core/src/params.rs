//! Toolkit-wide settings.
//!
//! `Params` replaces the mutable module-global settings object found in
//! many phenotyping toolkits with an explicit value threaded through calls
//! that need it. The device counter gives intermediate debug images unique,
//! ordered filenames.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do with intermediate visuals produced during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DebugMode {
    /// Discard intermediates.
    #[default]
    Off,
    /// Save intermediates under the debug output directory.
    Save,
}

/// Toolkit-wide settings shared across analysis steps.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Params {
    /// Debug behavior for intermediate visuals.
    pub debug: DebugMode,

    /// Directory where debug images are written.
    pub debug_outdir: PathBuf,

    /// Counter prefixed to debug image filenames, bumped per image.
    pub device: u32,

    /// Default sample label used when an analysis is not given one.
    pub sample_label: String,

    /// Default output upscaling factor for rendered figures.
    pub scale: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            debug: DebugMode::Off,
            debug_outdir: PathBuf::from("."),
            device: 0,
            sample_label: "default".to_string(),
            scale: 1,
        }
    }
}

impl Params {
    /// Bump the device counter and return the value to use for the next
    /// debug image.
    pub fn next_device(&mut self) -> u32 {
        self.device += 1;
        self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_counter_increments() {
        let mut params = Params::default();
        assert_eq!(params.next_device(), 1);
        assert_eq!(params.next_device(), 2);
        assert_eq!(params.device, 2);
    }

    #[test]
    fn test_defaults() {
        let params = Params::default();
        assert_eq!(params.debug, DebugMode::Off);
        assert_eq!(params.sample_label, "default");
        assert_eq!(params.scale, 1);
    }
}
