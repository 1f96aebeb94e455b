#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Animations are advanced explicitly by the host with a frame delta, so the
//! same sequence of ticks always produces the same values.

pub mod spring;

pub use spring::{Spring, SpringConfig};

use web_time::Duration;

/// A value that evolves over explicit time steps.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has finished and will not change on further ticks.
    fn is_complete(&self) -> bool;

    /// Current value, normalized to `[0.0, 1.0]`.
    fn value(&self) -> f64;
}
