//! Bounding boxes and regions of interest.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned integer bounding rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Left edge.
    pub x: usize,
    /// Top edge.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Bounds {
    /// Create a bounding rectangle.
    #[must_use]
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered.
    #[must_use]
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Clamp the rectangle to an image extent, shrinking it as needed.
    ///
    /// A rectangle entirely outside the extent collapses to zero size.
    #[must_use]
    pub fn clamped_to(&self, image_width: usize, image_height: usize) -> Self {
        let x = self.x.min(image_width);
        let y = self.y.min(image_height);
        let width = self.width.min(image_width - x);
        let height = self.height.min(image_height - y);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether a pixel falls inside the rectangle.
    #[must_use]
    #[inline]
    pub fn contains(&self, px: usize, py: usize) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// A region of interest described by a contour of pixel points.
///
/// Rendering only uses the axis-aligned bounding extent of the contour, so
/// the point order is irrelevant. An optional padding grows the extent
/// symmetrically (clamped at zero on the low side).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    points: Vec<(usize, usize)>,
    padding: usize,
}

impl Region {
    /// Create a region from contour points.
    ///
    /// # Errors
    /// Returns [`Error::EmptyRegion`] when `points` is empty.
    pub fn from_points(points: Vec<(usize, usize)>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyRegion("contour has no points".into()));
        }
        Ok(Self { points, padding: 0 })
    }

    /// Create a rectangular region directly from bounds.
    #[must_use]
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self {
            points: vec![
                (bounds.x, bounds.y),
                (
                    bounds.x + bounds.width.saturating_sub(1),
                    bounds.y + bounds.height.saturating_sub(1),
                ),
            ],
            padding: 0,
        }
    }

    /// Set symmetric padding applied to the bounding extent.
    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Contour points.
    #[must_use]
    pub fn points(&self) -> &[(usize, usize)] {
        &self.points
    }

    /// Axis-aligned bounding extent of the contour, padding applied.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;
        for &(x, y) in &self.points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let x = min_x.saturating_sub(self.padding);
        let y = min_y.saturating_sub(self.padding);
        Bounds {
            x,
            y,
            width: max_x + self.padding + 1 - x,
            height: max_y + self.padding + 1 - y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clamp() {
        let b = Bounds::new(2, 2, 10, 10).clamped_to(8, 6);
        assert_eq!(b, Bounds::new(2, 2, 6, 4));

        let outside = Bounds::new(10, 10, 3, 3).clamped_to(8, 6);
        assert_eq!(outside.area(), 0);
    }

    #[test]
    fn test_bounds_contains() {
        let b = Bounds::new(1, 1, 2, 2);
        assert!(b.contains(1, 1));
        assert!(b.contains(2, 2));
        assert!(!b.contains(3, 2));
        assert!(!b.contains(0, 1));
    }

    #[test]
    fn test_region_bounds() {
        let region = Region::from_points(vec![(3, 7), (10, 2), (5, 5)]).unwrap();
        assert_eq!(region.bounds(), Bounds::new(3, 2, 8, 6));
    }

    #[test]
    fn test_region_padding_saturates_at_origin() {
        let region = Region::from_points(vec![(1, 1), (4, 4)])
            .unwrap()
            .with_padding(3);
        let b = region.bounds();
        assert_eq!((b.x, b.y), (0, 0));
        assert_eq!((b.width, b.height), (8, 8));
    }

    #[test]
    fn test_empty_region_rejected() {
        assert!(matches!(
            Region::from_points(Vec::new()),
            Err(Error::EmptyRegion(_))
        ));
    }

    #[test]
    fn test_region_from_bounds_round_trips() {
        let b = Bounds::new(4, 2, 5, 3);
        assert_eq!(Region::from_bounds(b).bounds(), b);
    }
}
