#![forbid(unsafe_code)]

//! Normalized split progress and snapping rules.
//!
//! Progress is the horizontal split point between the two panels: `0.0`
//! collapses the left panel, `1.0` collapses the right one.
//!
//! # Invariants
//!
//! 1. A [`Progress`] value is always finite and inside `[0.0, 1.0]`.
//! 2. Raw pointer input outside the container clamps to the nearest edge.
//! 3. A degenerate container (zero, negative, or non-finite width) yields
//!    the neutral value `0.5` instead of dividing by zero.

/// Default edge snap zone: raw progress within this distance of an edge
/// snaps onto the edge.
pub const DEFAULT_SNAP_ZONE: f64 = 0.04;

/// Progress below this value settles to [`SnapTarget::Start`].
pub const SNAP_LOWER_BOUND: f64 = 0.35;

/// Progress above this value settles to [`SnapTarget::End`].
pub const SNAP_UPPER_BOUND: f64 = 0.65;

/// Clamp `value` into `[0.0, 1.0]`. `NaN` maps to `0.5`.
#[inline]
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return Progress::NEUTRAL.get();
    }
    value.clamp(0.0, 1.0)
}

/// Snap progress onto an edge when it falls within `snap_zone` of it.
#[inline]
#[must_use]
pub fn snap_to_edges(progress: f64, snap_zone: f64) -> f64 {
    if progress <= snap_zone {
        0.0
    } else if progress >= 1.0 - snap_zone {
        1.0
    } else {
        progress
    }
}

/// Raw (unsnapped) progress for a container-local x coordinate.
#[inline]
#[must_use]
pub fn raw_progress(local_x: f64, container_width: f64) -> f64 {
    if !container_width.is_finite() || container_width <= 0.0 || !local_x.is_finite() {
        return Progress::NEUTRAL.get();
    }
    clamp01(local_x / container_width)
}

/// A split position guaranteed to lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    /// Even split.
    pub const NEUTRAL: Self = Self(0.5);

    /// Create progress from any value, clamping into range.
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(clamp01(value))
    }

    /// Progress for a pointer at `local_x` inside a container of
    /// `container_width`, with edge snapping applied.
    #[must_use]
    pub fn from_pointer(local_x: f64, container_width: f64, snap_zone: f64) -> Self {
        if !container_width.is_finite() || container_width <= 0.0 {
            return Self::NEUTRAL;
        }
        Self(snap_to_edges(raw_progress(local_x, container_width), snap_zone))
    }

    /// Underlying scalar.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<SnapTarget> for Progress {
    fn from(target: SnapTarget) -> Self {
        Self(target.value())
    }
}

/// Resting positions chosen when pointer interaction ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapTarget {
    /// `0.0`: left panel fills the container.
    Start,
    /// `0.5`: even split.
    Center,
    /// `1.0`: right panel fills the container.
    End,
}

impl SnapTarget {
    /// All targets in ascending order.
    pub const ALL: [Self; 3] = [Self::Start, Self::Center, Self::End];

    /// Select the target for the third of `[0, 1]` that `progress` falls in.
    #[must_use]
    pub fn nearest(progress: f64) -> Self {
        if progress < SNAP_LOWER_BOUND {
            Self::Start
        } else if progress > SNAP_UPPER_BOUND {
            Self::End
        } else {
            Self::Center
        }
    }

    /// Progress value of this target.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}
