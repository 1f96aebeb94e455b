#![forbid(unsafe_code)]

//! Derived per-panel visual parameters.
//!
//! Every visual property of the two panels is a pure function of an
//! immutable [`SplitSnapshot`] and a [`Side`]. Nothing here is cached:
//! callers recompute on every progress or hover change.
//!
//! # Formulas
//!
//! With `p` = progress and `active` = hovering and `p` outside the central
//! deadzone `(0.5 - threshold, 0.5 + threshold)`:
//!
//! | Property | Left                               | Right                               |
//! |----------|------------------------------------|-------------------------------------|
//! | width    | `1 - p`                            | `p`                                 |
//! | opacity  | `1 - 0.55p` if active, else `1`    | `0.45 + 0.55p` if active, else `1`  |
//! | blur     | `4p` if active, else `0`           | `4(1 - p)` if active, else `0`      |
//! | offset   | `-raw + (1 - p)·48`                | `-raw - p·48`                       |
//! | scale    | `1 + 0.04(1 - p)`                  | `1 + 0.04p`                         |
//!
//! where `raw = (p - 0.5)·15` while hovering and `0` otherwise.
//!
//! # Invariants
//!
//! 1. `left.width_fraction + right.width_fraction == 1`.
//! 2. Opacity is in `[0, 1]`, blur is `>= 0`, scale is `>= 1`.

use crate::progress::Progress;

/// Presentation tuning values. The defaults are the shipped design values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualConfig {
    /// Half-width of the central band where hover effects are suppressed.
    pub deadzone_threshold: f64,
    /// How much opacity the receding panel loses at the far edge.
    pub opacity_falloff: f64,
    /// Blur radius of the receding panel at the far edge.
    pub max_blur: f64,
    /// Horizontal parallax applied while hovering.
    pub parallax_strength: f64,
    /// Content shift that keeps text anchored as a panel grows.
    pub fill_shift: f64,
    /// Extra scale of the dominant panel's content.
    pub scale_gain: f64,
}

impl VisualConfig {
    pub const DEFAULT: Self = Self {
        deadzone_threshold: 0.2,
        opacity_falloff: 0.55,
        max_blur: 4.0,
        parallax_strength: 15.0,
        fill_shift: 48.0,
        scale_gain: 0.04,
    };
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Immutable input to the visual formulas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplitSnapshot {
    pub progress: Progress,
    pub hover: bool,
}

impl SplitSnapshot {
    #[must_use]
    pub fn new(progress: f64, hover: bool) -> Self {
        Self {
            progress: Progress::new(progress),
            hover,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Visual parameters of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualParams {
    /// Fraction of the container width owned by the panel.
    pub width_fraction: f64,
    pub opacity: f64,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Horizontal content offset in pixels.
    pub offset_x: f64,
    pub scale: f64,
}

impl VisualParams {
    /// Full opacity, no blur, no offset, unit scale, half width.
    pub const NEUTRAL: Self = Self {
        width_fraction: 0.5,
        opacity: 1.0,
        blur: 0.0,
        offset_x: 0.0,
        scale: 1.0,
    };
}

impl Default for VisualParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Visual parameters of both panels for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitVisuals {
    pub left: VisualParams,
    pub right: VisualParams,
}

impl SplitVisuals {
    #[must_use]
    pub const fn side(&self, side: Side) -> &VisualParams {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Share of the container owned by `side` at `progress`.
#[inline]
#[must_use]
pub fn dominance(progress: Progress, side: Side) -> f64 {
    match side {
        Side::Left => 1.0 - progress.get(),
        Side::Right => progress.get(),
    }
}

/// Whether opacity and blur effects apply to this snapshot.
#[inline]
#[must_use]
pub fn effects_active(snapshot: SplitSnapshot, config: &VisualConfig) -> bool {
    let p = snapshot.progress.get();
    snapshot.hover
        && (p < 0.5 - config.deadzone_threshold || p > 0.5 + config.deadzone_threshold)
}

/// Visual parameters of `side` for `snapshot`.
#[must_use]
pub fn visual_params(snapshot: SplitSnapshot, side: Side, config: &VisualConfig) -> VisualParams {
    let p = snapshot.progress.get();
    let active = effects_active(snapshot, config);
    let raw_offset = if snapshot.hover {
        (p - 0.5) * config.parallax_strength
    } else {
        0.0
    };
    let dom = dominance(snapshot.progress, side);

    match side {
        Side::Left => VisualParams {
            width_fraction: dom,
            opacity: if active {
                1.0 - config.opacity_falloff * p
            } else {
                1.0
            },
            blur: if active { config.max_blur * p } else { 0.0 },
            offset_x: -raw_offset + dom * config.fill_shift,
            scale: 1.0 + config.scale_gain * dom,
        },
        Side::Right => VisualParams {
            width_fraction: dom,
            opacity: if active {
                (1.0 - config.opacity_falloff) + config.opacity_falloff * p
            } else {
                1.0
            },
            blur: if active {
                config.max_blur * (1.0 - p)
            } else {
                0.0
            },
            offset_x: -raw_offset - dom * config.fill_shift,
            scale: 1.0 + config.scale_gain * dom,
        },
    }
}

/// Visual parameters of both panels for `snapshot`.
#[must_use]
pub fn split_visuals(snapshot: SplitSnapshot, config: &VisualConfig) -> SplitVisuals {
    SplitVisuals {
        left: visual_params(snapshot, Side::Left, config),
        right: visual_params(snapshot, Side::Right, config),
    }
}
