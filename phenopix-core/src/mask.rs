//! Binary and labeled masks.
//!
//! A `BinaryMask` marks foreground pixels (nonzero bytes); a `LabeledMask`
//! assigns each pixel an object label (`0` = background). Both use the same
//! row-major layout as [`IntensityImage`](crate::IntensityImage).

use crate::error::{Error, Result};
use crate::geometry::Bounds;
use crate::image::IntensityImage;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary foreground mask. Nonzero bytes are foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryMask {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl BinaryMask {
    /// Create an all-background mask.
    #[must_use]
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: vec![0; width * height],
            width,
            height,
        }
    }

    /// Create a mask from a row-major byte buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
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

    /// Borrow the raw byte buffer.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Whether the pixel at `(x, y)` is foreground. Out of bounds is background.
    #[must_use]
    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x] != 0
    }

    /// Mark a pixel as foreground (255) or background (0).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, foreground: bool) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = if foreground { 255 } else { 0 };
        }
    }

    /// Number of foreground pixels.
    #[must_use]
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Check that the mask matches an image extent.
    ///
    /// # Errors
    /// Returns [`Error::MaskDimensionMismatch`] on mismatch.
    pub fn check_matches(&self, image: &IntensityImage) -> Result<()> {
        if self.width != image.width() || self.height != image.height() {
            return Err(Error::MaskDimensionMismatch {
                width: image.width(),
                height: image.height(),
                mask_width: self.width,
                mask_height: self.height,
            });
        }
        Ok(())
    }

    /// Extract the sub-mask covered by `bounds` (clamped to the extent).
    ///
    /// # Errors
    /// Returns [`Error::EmptyRegion`] when the clamped bounds cover no pixels.
    pub fn crop(&self, bounds: Bounds) -> Result<Self> {
        let clamped = bounds.clamped_to(self.width, self.height);
        if clamped.width == 0 || clamped.height == 0 {
            return Err(Error::EmptyRegion(format!(
                "crop bounds {bounds:?} fall outside {}x{} mask",
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

/// A mask assigning a `u32` object label to each pixel. Label `0` is background.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabeledMask {
    data: Vec<u32>,
    width: usize,
    height: usize,
}

impl LabeledMask {
    /// Create a mask from a row-major label buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<u32>) -> Result<Self> {
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

    /// Borrow the raw label buffer.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Highest label present.
    #[must_use]
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Binary mask selecting exactly the pixels carrying `label`.
    #[must_use]
    pub fn binary_for_label(&self, label: u32) -> BinaryMask {
        let data = self
            .data
            .iter()
            .map(|&v| if v == label && label != 0 { 255 } else { 0 })
            .collect();
        BinaryMask {
            data,
            width: self.width,
            height: self.height,
        }
    }

    /// Binary mask with every labeled pixel as foreground.
    #[must_use]
    pub fn combined(&self) -> BinaryMask {
        let data = self
            .data
            .iter()
            .map(|&v| if v != 0 { 255 } else { 0 })
            .collect();
        BinaryMask {
            data,
            width: self.width,
            height: self.height,
        }
    }
}
