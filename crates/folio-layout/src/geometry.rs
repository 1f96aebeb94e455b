#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixel space.

use serde::Serialize;

/// A rectangle in CSS pixels, origin at the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Convert a viewport x coordinate into a container-local one.
    #[inline]
    #[must_use]
    pub fn local_x(&self, client_x: f64) -> f64 {
        client_x - self.x
    }

    /// Split into two side-by-side columns. The left column gets
    /// `left_fraction` of the width, the right column the remainder, so the
    /// two widths always add up to the full width.
    #[must_use]
    pub fn split_columns(&self, left_fraction: f64) -> (PixelRect, PixelRect) {
        let fraction = if left_fraction.is_finite() {
            left_fraction.clamp(0.0, 1.0)
        } else {
            0.5
        };
        let width = self.width.max(0.0);
        let left_width = width * fraction;
        let left = PixelRect::new(self.x, self.y, left_width, self.height);
        let right = PixelRect::new(
            self.x + left_width,
            self.y,
            width - left_width,
            self.height,
        );
        (left, right)
    }
}
