//! Grayscale intensity image storage.
//!
//! `IntensityImage` stores pixel values as `f32` in a flat row-major buffer,
//! indexed as `data[y * width + x]`. Values carry whatever physical scale the
//! source data had (8-bit counts, 16-bit counts, reflectance indices); the
//! visualization layer normalizes them at render time.

use crate::error::{Error, Result};
use crate::geometry::Bounds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D grayscale intensity image with `f32` pixel values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntensityImage {
    /// Flattened row-major pixel data.
    data: Vec<f32>,

    /// Width in pixels.
    width: usize,

    /// Height in pixels.
    height: usize,
}

impl IntensityImage {
    /// Create a zero-filled image with the given dimensions.
    #[must_use]
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Create an image from a row-major buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create an image from 8-bit grayscale samples.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimensions`] if `samples.len() != width * height`.
    pub fn from_u8(width: usize, height: usize, samples: &[u8]) -> Result<Self> {
        if samples.len() != width * height {
            return Err(Error::InvalidDimensions {
                width,
                height,
                len: samples.len(),
            });
        }
        let data = samples.iter().map(|&v| f32::from(v)).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create an image from 16-bit grayscale samples.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimensions`] if `samples.len() != width * height`.
    pub fn from_u16(width: usize, height: usize, samples: &[u16]) -> Result<Self> {
        if samples.len() != width * height {
            return Err(Error::InvalidDimensions {
                width,
                height,
                len: samples.len(),
            });
        }
        let data = samples.iter().map(|&v| f32::from(v)).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[must_use]
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the image has no pixels.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the raw row-major pixel buffer.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get the value at a pixel, if in bounds.
    #[must_use]
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Set the value at a pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Minimum and maximum finite pixel values.
    ///
    /// Returns `None` for an empty image or one with no finite values.
    #[must_use]
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.data {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Minimum and maximum finite pixel values over foreground pixels only.
    ///
    /// `foreground` is a row-major byte mask of matching length; pixels with
    /// a zero mask byte are skipped. Returns `None` when nothing qualifies.
    #[must_use]
    pub fn min_max_masked(&self, foreground: &[u8]) -> Option<(f32, f32)> {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for (&v, &m) in self.data.iter().zip(foreground) {
            if m != 0 && v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Return a copy with every value clamped into `[min, max]`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] when `min > max`.
    pub fn clipped(&self, min: f32, max: f32) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidRange { min, max });
        }
        let data = self.data.iter().map(|v| v.clamp(min, max)).collect();
        Ok(Self {
            data,
            width: self.width,
            height: self.height,
        })
    }

    /// Extract the sub-image covered by `bounds`.
    ///
    /// Bounds are clamped to the image extent first.
    ///
    /// # Errors
    /// Returns [`Error::EmptyRegion`] when the clamped bounds cover no pixels.
    pub fn crop(&self, bounds: Bounds) -> Result<Self> {
        let clamped = bounds.clamped_to(self.width, self.height);
        if clamped.width == 0 || clamped.height == 0 {
            return Err(Error::EmptyRegion(format!(
                "crop bounds {bounds:?} fall outside {}x{} image",
                self.width, self.height
            )));
        }
        let mut data = Vec::with_capacity(clamped.width * clamped.height);
        for y in clamped.y..clamped.y + clamped.height {
            let start = y * self.width + clamped.x;
            data.extend_from_slice(&self.data[start..start + clamped.width]);
        }
        Ok(Self {
            data,
            width: clamped.width,
            height: clamped.height,
        })
    }
}
