//! Pseudocolor rendering of intensity images.
//!
//! `pseudocolor` maps grayscale values onto a colormap, optionally masked
//! to a foreground and cropped to a region of interest, and composes the
//! result into a [`Figure`].

use image::RgbaImage;
use rayon::prelude::*;

use phenopix_core::{BinaryMask, Error, IntensityImage, Region, Result};

use crate::colormap::Colormap;
use crate::figure::{compose, Figure};

/// Fill behavior for pixels outside the mask foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// Keep the original grayscale intensity as background.
    #[default]
    Image,
    /// Paint background pixels white.
    White,
    /// Paint background pixels black.
    Black,
}

impl std::fmt::Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Background::Image => write!(f, "image"),
            Background::White => write!(f, "white"),
            Background::Black => write!(f, "black"),
        }
    }
}

impl std::str::FromStr for Background {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(Background::Image),
            "white" => Ok(Background::White),
            "black" => Ok(Background::Black),
            other => Err(Error::ConfigError(format!(
                "background must be 'image', 'white', or 'black', got '{other}'"
            ))),
        }
    }
}

/// Rendering options for [`pseudocolor`].
#[derive(Debug, Clone)]
pub struct PseudocolorOptions {
    /// Colormap applied to foreground values.
    pub colormap: Colormap,
    /// Fill behavior for masked-out pixels.
    pub background: Background,
    /// Lower clip bound. Defaults to the observed minimum.
    pub min_value: Option<f32>,
    /// Upper clip bound. Defaults to the observed maximum.
    pub max_value: Option<f32>,
    /// Render a vertical colorbar beside the image.
    pub colorbar: bool,
    /// Render a tick-marked frame around the image area.
    pub axes: bool,
    /// Figure title, carried as metadata on the output.
    pub title: Option<String>,
    /// Integer nearest-neighbor upscaling factor for the output raster.
    pub scale: u32,
}

impl Default for PseudocolorOptions {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            background: Background::default(),
            min_value: None,
            max_value: None,
            colorbar: true,
            axes: false,
            title: None,
            scale: 1,
        }
    }
}

impl PseudocolorOptions {
    fn validate(&self, mask: Option<&BinaryMask>) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(Error::InvalidRange { min, max });
            }
        }
        if self.background != Background::Image && mask.is_none() {
            return Err(Error::MaskRequired(self.background.to_string()));
        }
        if self.scale == 0 {
            return Err(Error::ConfigError("scale must be at least 1".into()));
        }
        Ok(())
    }
}

/// Render a grayscale intensity image through a colormap.
///
/// When a `mask` is given, only foreground pixels are colorized; the rest
/// are filled per [`Background`]. When a `region` is given, the image (and
/// mask) are cropped to its bounding extent first. Values are clipped to
/// `[min_value, max_value]` before normalization; unset bounds default to
/// the observed range (foreground-only when a mask is present).
///
/// # Errors
/// Fails on mask/image dimension mismatch, `min > max`, a non-image
/// background without a mask, an empty crop, or an image with no finite
/// values to derive a range from.
pub fn pseudocolor(
    img: &IntensityImage,
    mask: Option<&BinaryMask>,
    region: Option<&Region>,
    opts: &PseudocolorOptions,
) -> Result<Figure> {
    opts.validate(mask)?;
    if let Some(mask) = mask {
        mask.check_matches(img)?;
    }

    // Crop to the region bounding extent before any value work.
    let (work_img, work_mask) = match region {
        Some(region) => {
            let bounds = region.bounds();
            let cropped = img.crop(bounds)?;
            let cropped_mask = mask.map(|m| m.crop(bounds)).transpose()?;
            (cropped, cropped_mask)
        }
        None => (img.clone(), mask.cloned()),
    };

    let (range_min, range_max) = value_range(&work_img, work_mask.as_ref(), opts)?;
    let clipped = work_img.clipped(range_min, range_max)?;
    let span = range_max - range_min;

    let width = clipped.width();
    let height = clipped.height();
    let values = clipped.as_slice();
    let mask_bytes = work_mask.as_ref().map(BinaryMask::as_slice);

    let mut pixels = vec![0u8; width * height * 4];
    pixels
        .par_chunks_exact_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let idx = y * width + x;
                let normalized = if span > 0.0 {
                    (values[idx] - range_min) / span
                } else {
                    0.0
                };
                let foreground = mask_bytes.is_none_or(|m| m[idx] != 0);
                let rgba = if foreground {
                    opts.colormap.apply(normalized)
                } else {
                    match opts.background {
                        Background::Image => Colormap::Gray.apply(normalized),
                        Background::White => [255, 255, 255, 255],
                        Background::Black => [0, 0, 0, 255],
                    }
                };
                row[x * 4..x * 4 + 4].copy_from_slice(&rgba);
            }
        });

    #[allow(clippy::cast_possible_truncation)]
    let raster = RgbaImage::from_vec(width as u32, height as u32, pixels).ok_or_else(|| {
        Error::EmptyRegion(format!("rendered raster {width}x{height} is empty"))
    })?;

    Ok(compose(raster, (range_min, range_max), opts))
}

/// Resolve the clip range from options and observed data.
fn value_range(
    img: &IntensityImage,
    mask: Option<&BinaryMask>,
    opts: &PseudocolorOptions,
) -> Result<(f32, f32)> {
    let observed = match mask {
        Some(mask) => img.min_max_masked(mask.as_slice()),
        None => img.min_max(),
    };
    let (obs_min, obs_max) = observed.ok_or_else(|| {
        Error::EmptyRegion("image has no finite values to derive a range from".into())
    })?;
    let min = opts.min_value.unwrap_or(obs_min);
    let max = opts.max_value.unwrap_or(obs_max);
    if min > max {
        return Err(Error::InvalidRange { min, max });
    }
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenopix_core::Bounds;

    fn ramp_image() -> IntensityImage {
        // 4x2 ramp, values 0..8
        IntensityImage::from_vec(4, 2, (0..8).map(|v| v as f32).collect()).unwrap()
    }

    fn bare_opts() -> PseudocolorOptions {
        PseudocolorOptions {
            colorbar: false,
            axes: false,
            ..PseudocolorOptions::default()
        }
    }

    #[test]
    fn test_background_requires_mask() {
        let img = ramp_image();
        let opts = PseudocolorOptions {
            background: Background::White,
            ..bare_opts()
        };
        let err = pseudocolor(&img, None, None, &opts).unwrap_err();
        assert!(matches!(err, Error::MaskRequired(_)));
    }

    #[test]
    fn test_min_above_max_rejected() {
        let img = ramp_image();
        let opts = PseudocolorOptions {
            min_value: Some(5.0),
            max_value: Some(1.0),
            ..bare_opts()
        };
        assert!(matches!(
            pseudocolor(&img, None, None, &opts).unwrap_err(),
            Error::InvalidRange { .. }
        ));
    }

    #[test]
    fn test_mask_dimension_mismatch_rejected() {
        let img = ramp_image();
        let mask = BinaryMask::zeros(3, 3);
        let err = pseudocolor(&img, Some(&mask), None, &bare_opts()).unwrap_err();
        assert!(matches!(err, Error::MaskDimensionMismatch { .. }));
    }

    #[test]
    fn test_unmasked_render_spans_colormap() {
        let img = ramp_image();
        let opts = PseudocolorOptions {
            colormap: Colormap::Gray,
            ..bare_opts()
        };
        let figure = pseudocolor(&img, None, None, &opts).unwrap();
        let raster = figure.raster();
        assert_eq!(raster.dimensions(), (4, 2));
        assert_eq!(raster.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(raster.get_pixel(3, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_white_background_fills_masked_out_pixels() {
        let img = ramp_image();
        let mut mask = BinaryMask::zeros(4, 2);
        mask.set(3, 1, true);
        let opts = PseudocolorOptions {
            colormap: Colormap::Gray,
            background: Background::White,
            ..bare_opts()
        };
        let figure = pseudocolor(&img, Some(&mask), None, &opts).unwrap();
        let raster = figure.raster();
        assert_eq!(raster.get_pixel(0, 0).0, [255, 255, 255, 255]);
        // single foreground pixel normalizes to 0 over a flat range
        assert_eq!(raster.get_pixel(3, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_masked_range_uses_foreground_only() {
        // foreground values 2 and 6; explicit range not set
        let img = ramp_image();
        let mut mask = BinaryMask::zeros(4, 2);
        mask.set(2, 0, true); // value 2
        mask.set(2, 1, true); // value 6
        let opts = PseudocolorOptions {
            colormap: Colormap::Gray,
            background: Background::Black,
            ..bare_opts()
        };
        let figure = pseudocolor(&img, Some(&mask), None, &opts).unwrap();
        assert_eq!(figure.value_range(), (2.0, 6.0));
        let raster = figure.raster();
        assert_eq!(raster.get_pixel(2, 0).0, [0, 0, 0, 255]);
        assert_eq!(raster.get_pixel(2, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_region_crop() {
        let img = ramp_image();
        let region = Region::from_bounds(Bounds::new(1, 0, 2, 2));
        let figure = pseudocolor(&img, None, Some(&region), &bare_opts()).unwrap();
        assert_eq!(figure.raster().dimensions(), (2, 2));
    }

    #[test]
    fn test_region_outside_image_is_error() {
        let img = ramp_image();
        let region = Region::from_bounds(Bounds::new(100, 100, 5, 5));
        assert!(matches!(
            pseudocolor(&img, None, Some(&region), &bare_opts()).unwrap_err(),
            Error::EmptyRegion(_)
        ));
    }

    #[test]
    fn test_flat_range_renders_low_end() {
        let img = IntensityImage::from_vec(2, 1, vec![3.0, 3.0]).unwrap();
        let figure = pseudocolor(&img, None, None, &bare_opts()).unwrap();
        assert_eq!(figure.value_range(), (3.0, 3.0));
        let low = Colormap::Viridis.apply(0.0);
        assert_eq!(figure.raster().get_pixel(0, 0).0, low);
    }

    #[test]
    fn test_scale_zero_rejected() {
        let img = ramp_image();
        let opts = PseudocolorOptions {
            scale: 0,
            ..bare_opts()
        };
        assert!(matches!(
            pseudocolor(&img, None, None, &opts).unwrap_err(),
            Error::ConfigError(_)
        ));
    }

    #[test]
    fn test_scale_upsamples_output() {
        let img = ramp_image();
        let opts = PseudocolorOptions {
            scale: 3,
            ..bare_opts()
        };
        let figure = pseudocolor(&img, None, None, &opts).unwrap();
        assert_eq!(figure.raster().dimensions(), (12, 6));
    }
}
