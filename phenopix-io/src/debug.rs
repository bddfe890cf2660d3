//! Debug-image sink for intermediate visuals.
//!
//! Analysis steps hand intermediate figures to [`DebugSink::handle`]; the
//! sink saves them under the debug output directory when debug saving is
//! enabled and otherwise just logs that they were produced.

use std::path::PathBuf;

use phenopix_core::{DebugMode, Params};
use phenopix_viz::Figure;

use crate::error::Result;
use crate::writer::write_figure;

/// Sink for intermediate debug figures.
#[derive(Debug, Default)]
pub struct DebugSink;

impl DebugSink {
    /// Handle an intermediate figure per the debug settings.
    ///
    /// In [`DebugMode::Save`] the figure is written to
    /// `debug_outdir/<device>_<suffix>.png` and the device counter is
    /// bumped. Returns the path written, if any.
    ///
    /// # Errors
    /// Fails when saving is enabled and the write fails.
    pub fn handle(
        &self,
        params: &mut Params,
        figure: &Figure,
        suffix: &str,
    ) -> Result<Option<PathBuf>> {
        match params.debug {
            DebugMode::Off => {
                log::debug!("debug figure '{suffix}' discarded (debug off)");
                Ok(None)
            }
            DebugMode::Save => {
                let device = params.next_device();
                let path = params.debug_outdir.join(format!("{device}_{suffix}.png"));
                write_figure(figure, &path)?;
                log::info!("debug figure written to {}", path.display());
                Ok(Some(path))
            }
        }
    }
}
