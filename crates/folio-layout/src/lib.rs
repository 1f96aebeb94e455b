#![forbid(unsafe_code)]

//! Layout primitives for the interactive split screen.
//!
//! - [`PixelRect`]: container and panel bounds in CSS pixels.
//! - [`PanelRenderer`]: turns derived visuals into a [`SplitFrame`] with two
//!   complementary panels and the moving indicator line.
//! - [`Breakpoint`] / [`Responsive`]: width tiers that decide whether the
//!   interactive split or the stacked fallback is shown.

pub mod geometry;
pub mod renderer;
pub mod responsive;

pub use geometry::PixelRect;
pub use renderer::{
    ContentStyle, INDICATOR_OPACITY_HOVER, INDICATOR_OPACITY_IDLE, Indicator, PanelFrame,
    PanelRenderer, SplitFrame,
};
pub use responsive::{Breakpoint, Breakpoints, Responsive, SplitMode};
