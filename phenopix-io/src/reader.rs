//! Readers for grayscale images and masks.

use std::path::Path;

use image::{ColorType, DynamicImage};
use phenopix_core::{BinaryMask, IntensityImage, LabeledMask};

use crate::error::Result;

fn is_sixteen_bit(img: &DynamicImage) -> bool {
    matches!(
        img.color(),
        ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16
    )
}

/// Read a grayscale intensity image.
///
/// 16-bit sources keep their full value range; color sources are converted
/// to luma.
///
/// # Errors
/// Fails when the file cannot be opened or decoded.
pub fn read_gray<P: AsRef<Path>>(path: P) -> Result<IntensityImage> {
    let img = image::open(path)?;
    let intensity = if is_sixteen_bit(&img) {
        let luma = img.to_luma16();
        let (width, height) = luma.dimensions();
        IntensityImage::from_u16(width as usize, height as usize, luma.as_raw())?
    } else {
        let luma = img.to_luma8();
        let (width, height) = luma.dimensions();
        IntensityImage::from_u8(width as usize, height as usize, luma.as_raw())?
    };
    Ok(intensity)
}

/// Read a binary mask. Any nonzero luma byte counts as foreground.
///
/// # Errors
/// Fails when the file cannot be opened or decoded.
pub fn read_mask<P: AsRef<Path>>(path: P) -> Result<BinaryMask> {
    let luma = image::open(path)?.to_luma8();
    let (width, height) = luma.dimensions();
    let data = luma
        .as_raw()
        .iter()
        .map(|&v| if v != 0 { 255 } else { 0 })
        .collect();
    Ok(BinaryMask::from_vec(width as usize, height as usize, data)?)
}

/// Read a labeled mask. Luma values become object labels verbatim, so
/// 16-bit sources support up to 65535 objects.
///
/// # Errors
/// Fails when the file cannot be opened or decoded.
pub fn read_labeled<P: AsRef<Path>>(path: P) -> Result<LabeledMask> {
    let img = image::open(path)?;
    let labeled = if is_sixteen_bit(&img) {
        let luma = img.to_luma16();
        let (width, height) = luma.dimensions();
        let data = luma.as_raw().iter().map(|&v| u32::from(v)).collect();
        LabeledMask::from_vec(width as usize, height as usize, data)?
    } else {
        let luma = img.to_luma8();
        let (width, height) = luma.dimensions();
        let data = luma.as_raw().iter().map(|&v| u32::from(v)).collect();
        LabeledMask::from_vec(width as usize, height as usize, data)?
    };
    Ok(labeled)
}
