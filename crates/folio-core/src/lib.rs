#![forbid(unsafe_code)]

//! Core: split progress, spring settling, and derived panel visuals.
//!
//! # Role in folio
//! `folio-core` is the model layer of the interactive split screen. It turns
//! pointer positions into a normalized [`Progress`](progress::Progress),
//! settles that progress onto a snap target when the pointer leaves, and maps
//! every `(progress, hover)` snapshot to per-panel visual parameters.
//!
//! # Primary responsibilities
//! - **progress**: clamping, edge snapping, and snap-target selection.
//! - **animation**: the damped spring that drives idle settling.
//! - **tracker**: [`PointerTracker`](tracker::PointerTracker), owner of
//!   progress, hover state, and the cancellable settle handle.
//! - **visual**: pure `(snapshot, side) -> VisualParams` formulas.
//!
//! # How it fits in the system
//! `folio-layout` turns [`SplitVisuals`](visual::SplitVisuals) into panel
//! rectangles and styles, and `folio-web` feeds host pointer events and
//! animation frames into the tracker. Nothing here performs I/O.

pub mod animation;
pub mod progress;
pub mod tracker;
pub mod visual;

pub use progress::{Progress, SnapTarget};
pub use tracker::{PointerTracker, SettleHandle, TickOutcome, TrackerConfig};
pub use visual::{Side, SplitSnapshot, SplitVisuals, VisualConfig, VisualParams};
