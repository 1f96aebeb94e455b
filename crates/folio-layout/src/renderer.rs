#![forbid(unsafe_code)]

//! Panel rendering for the interactive split screen.
//!
//! [`PanelRenderer`] is the presentation end of the pipeline: it takes the
//! derived [`SplitVisuals`] and produces a [`SplitFrame`] describing two
//! adjacent panels, the style of each panel's content, and the thin
//! indicator line. Hosts apply the frame directly (e.g. as inline CSS).
//!
//! # Invariants
//!
//! 1. In interactive frames panel widths are complementary:
//!    `left.rect.width + right.rect.width` equals the container width and
//!    the width fractions sum to 1. Stacked frames instead give each panel
//!    the full width (`width_fraction` 1) and half the height.
//! 2. Malformed visual parameters (NaN, infinities) never reach the frame;
//!    they fall back to neutral values (opacity 1, blur 0, offset 0,
//!    scale 1). In-range clamping keeps opacity in `[0, 1]`, blur `>= 0`,
//!    and scale `>= 1`.
//! 3. The indicator sits at `progress × 100%` of the container, with
//!    opacity 0.22 while hovering and 0.12 otherwise.

use folio_core::visual::{
    Side, SplitSnapshot, SplitVisuals, VisualConfig, VisualParams, split_visuals,
};
use serde::{Serialize, Serializer};

use crate::geometry::PixelRect;

/// Indicator opacity while the pointer is over the container.
pub const INDICATOR_OPACITY_HOVER: f64 = 0.22;

/// Indicator opacity at rest.
pub const INDICATOR_OPACITY_IDLE: f64 = 0.12;

/// Style applied to the content of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentStyle {
    pub opacity: f64,
    /// Blur radius in pixels, applied to the panel background.
    pub blur_px: f64,
    pub translate_x_px: f64,
    pub scale: f64,
}

impl ContentStyle {
    pub const NEUTRAL: Self = Self {
        opacity: 1.0,
        blur_px: 0.0,
        translate_x_px: 0.0,
        scale: 1.0,
    };

    fn from_params(params: &VisualParams) -> Self {
        Self {
            opacity: finite_or(params.opacity, 1.0).clamp(0.0, 1.0),
            blur_px: finite_or(params.blur, 0.0).max(0.0),
            translate_x_px: finite_or(params.offset_x, 0.0),
            scale: finite_or(params.scale, 1.0).max(1.0),
        }
    }

    /// Inline CSS declarations for the panel content.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "opacity: {}; filter: blur({}px); transform: translateX({}px) scale({});",
            css_number(self.opacity),
            css_number(self.blur_px),
            css_number(self.translate_x_px),
            css_number(self.scale),
        )
    }
}

impl Default for ContentStyle {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// One laid-out panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelFrame {
    #[serde(serialize_with = "serialize_side")]
    pub side: Side,
    pub rect: PixelRect,
    /// Share of the container width, in `[0, 1]`.
    pub width_fraction: f64,
    pub content: ContentStyle,
}

impl PanelFrame {
    /// CSS width as a percentage of the container.
    #[must_use]
    pub fn width_css(&self) -> String {
        format!("{}%", css_number(self.width_fraction * 100.0))
    }
}

/// The thin vertical movement cue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicator {
    /// Absolute x position in pixels.
    pub x: f64,
    /// Position as a percentage of the container width.
    pub left_percent: f64,
    pub opacity: f64,
}

impl Indicator {
    /// Inline CSS declarations for the indicator line.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "left: {}%; opacity: {};",
            css_number(self.left_percent),
            css_number(self.opacity)
        )
    }
}

/// A fully resolved split-screen frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitFrame {
    pub container: PixelRect,
    pub progress: f64,
    pub hover: bool,
    pub left: PanelFrame,
    pub right: PanelFrame,
    /// Absent in the stacked layout.
    pub indicator: Option<Indicator>,
}

/// Lays out the two panels of a split container.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelRenderer {
    config: VisualConfig,
}

impl PanelRenderer {
    #[must_use]
    pub const fn new(config: VisualConfig) -> Self {
        Self { config }
    }

    /// Derive visuals for `snapshot` and lay them out in `container`.
    #[must_use]
    pub fn render(&self, container: PixelRect, snapshot: SplitSnapshot) -> SplitFrame {
        let visuals = split_visuals(snapshot, &self.config);
        self.render_visuals(container, snapshot, &visuals)
    }

    /// Lay out precomputed visuals in `container`.
    #[must_use]
    pub fn render_visuals(
        &self,
        container: PixelRect,
        snapshot: SplitSnapshot,
        visuals: &SplitVisuals,
    ) -> SplitFrame {
        let left_fraction = left_width_fraction(visuals);
        let (left_rect, right_rect) = container.split_columns(left_fraction);
        let progress = snapshot.progress.get();
        let width = container.width.max(0.0);
        let panel = |side: Side, rect: PixelRect, width_fraction: f64| PanelFrame {
            side,
            rect,
            width_fraction,
            content: ContentStyle::from_params(visuals.side(side)),
        };

        SplitFrame {
            container,
            progress,
            hover: snapshot.hover,
            left: panel(Side::Left, left_rect, left_fraction),
            right: panel(Side::Right, right_rect, 1.0 - left_fraction),
            indicator: Some(Indicator {
                x: container.x + width * progress,
                left_percent: progress * 100.0,
                opacity: if snapshot.hover {
                    INDICATOR_OPACITY_HOVER
                } else {
                    INDICATOR_OPACITY_IDLE
                },
            }),
        }
    }

    /// Stacked fallback for narrow containers: the left panel above the
    /// right one, each full width, neutral styling, no indicator.
    #[must_use]
    pub fn render_stacked(&self, container: PixelRect) -> SplitFrame {
        let width = container.width.max(0.0);
        let half = container.height.max(0.0) / 2.0;
        let top = PixelRect::new(container.x, container.y, width, half);
        let bottom = PixelRect::new(container.x, container.y + half, width, half);

        SplitFrame {
            container,
            progress: 0.5,
            hover: false,
            left: PanelFrame {
                side: Side::Left,
                rect: top,
                width_fraction: 1.0,
                content: ContentStyle::NEUTRAL,
            },
            right: PanelFrame {
                side: Side::Right,
                rect: bottom,
                width_fraction: 1.0,
                content: ContentStyle::NEUTRAL,
            },
            indicator: None,
        }
    }
}

fn left_width_fraction(visuals: &SplitVisuals) -> f64 {
    let left = visuals.left.width_fraction;
    let right = visuals.right.width_fraction;
    if left.is_finite() {
        left.clamp(0.0, 1.0)
    } else if right.is_finite() {
        1.0 - right.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

#[inline]
fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Format a number for CSS: at most three decimals, no trailing zeros.
fn css_number(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn serialize_side<S: Serializer>(side: &Side, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(side.as_str())
}
