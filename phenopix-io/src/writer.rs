//! Writers for figures and analysis results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbaImage;
use serde_json::{json, Map, Value};

use phenopix_core::Observations;
use phenopix_viz::Figure;

use crate::error::Result;

/// Save a composed figure. The format follows the file extension
/// (PNG, TIFF, BMP, ...).
///
/// The figure title is metadata and is not rasterized.
///
/// # Errors
/// Fails when the encoder rejects the path or the file cannot be written.
pub fn write_figure<P: AsRef<Path>>(figure: &Figure, path: P) -> Result<()> {
    if let Some(title) = figure.title() {
        log::debug!(
            "saving figure '{}' to {}",
            title,
            path.as_ref().display()
        );
    }
    figure.raster().save(path)?;
    Ok(())
}

/// Save a raw RGBA raster. The format follows the file extension.
///
/// # Errors
/// Fails when the encoder rejects the path or the file cannot be written.
pub fn write_rgba<P: AsRef<Path>>(raster: &RgbaImage, path: P) -> Result<()> {
    raster.save(path)?;
    Ok(())
}

/// Export the observation store as JSON.
///
/// Layout: `{"observations": {sample: {variable: {trait, method, scale,
/// value, label}}}}`. Undefined (NaN) values serialize as `null`.
///
/// # Errors
/// Fails on serialization or file write errors.
pub fn save_results<P: AsRef<Path>>(observations: &Observations, path: P) -> Result<()> {
    let mut samples = Map::new();
    for sample in observations.samples() {
        let mut variables = Map::new();
        for (variable, obs) in observations.sample_observations(sample) {
            variables.insert(variable.clone(), serde_json::to_value(obs)?);
        }
        samples.insert(sample.to_string(), Value::Object(variables));
    }
    let document = json!({ "observations": samples });

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenopix_core::{Observation, ObservationValue};
    use tempfile::tempdir;

    #[test]
    fn test_write_rgba_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let raster = RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
        write_rgba(&raster, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (4, 3));
        assert_eq!(reloaded.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_save_results_layout() {
        let mut observations = Observations::new();
        observations.add_observation(
            "plant",
            "area",
            Observation {
                trait_name: "area".into(),
                method: "phenopix.test".into(),
                scale: "pixels".into(),
                value: ObservationValue::Float(12.5),
                label: ObservationValue::Text("pixel".into()),
            },
        );

        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");
        save_results(&observations, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed["observations"]["plant"]["area"]["value"],
            json!(12.5)
        );
        assert_eq!(
            parsed["observations"]["plant"]["area"]["scale"],
            json!("pixels")
        );
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let mut observations = Observations::new();
        observations.add_observation(
            "plant",
            "mean",
            Observation {
                trait_name: "mean".into(),
                method: "phenopix.test".into(),
                scale: "pixel".into(),
                value: ObservationValue::Float(f64::NAN),
                label: ObservationValue::Text("pixel".into()),
            },
        );

        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");
        save_results(&observations, &path).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed["observations"]["plant"]["mean"]["value"].is_null());
    }
}
