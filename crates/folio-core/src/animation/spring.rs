#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Drives the split progress back to a snap target after the pointer leaves
//! the container. Based on the classical damped spring equation with unit
//! mass:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force strength. The settle motion uses 380.
//! - **damping** (c): velocity drag. The settle motion uses 32, slightly below
//!   critical damping (2√380 ≈ 39), which gives a short soft overshoot.
//! - Convergence: the spring comes to rest once the position is within
//!   0.001 of the target and the speed is below 0.01.
//!
//! # Invariants
//!
//! 1. `value()` returns the position clamped to [0.0, 1.0].
//! 2. A spring at rest does not move until `impulse()` is called.
//! 3. Stiffness is clamped to a small positive minimum; damping to ≥ 0.
//!
//! # Failure Modes
//!
//! - Very large dt: subdivided into 4ms steps, so a stalled frame cannot
//!   blow up the integration.
//! - Zero damping: oscillates forever; `is_complete()` may never be true.

use web_time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring is at rest.
const REST_THRESHOLD: f64 = 0.001;

/// Speed below which the spring is at rest, combined with the position delta.
const VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// Stiffness/damping pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringConfig {
    /// Idle settle motion of the split screen.
    pub const SETTLE: Self = Self {
        stiffness: 380.0,
        damping: 32.0,
    };
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::SETTLE
    }
}

/// A damped harmonic oscillator producing physically-based motion.
///
/// ```
/// use folio_core::animation::{Animation, Spring, SpringConfig};
/// use std::time::Duration;
///
/// let mut spring = Spring::new(0.8, 1.0).with_config(SpringConfig::SETTLE);
/// for _ in 0..120 {
///     spring.tick(Duration::from_millis(16));
/// }
/// assert!(spring.is_complete());
/// assert_eq!(spring.value(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`, using
    /// the settle parameters.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            stiffness: SpringConfig::SETTLE.stiffness,
            damping: SpringConfig::SETTLE.damping,
            at_rest: false,
        }
    }

    /// Apply a stiffness/damping pair (builder pattern).
    #[must_use]
    pub fn with_config(self, config: SpringConfig) -> Self {
        self.with_stiffness(config.stiffness)
            .with_damping(config.damping)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Apply an impulse (add to velocity). Wakes the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        self.velocity += velocity_delta;
        self.at_rest = false;
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler: velocity first, then position from the new velocity.
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < REST_THRESHOLD && self.velocity.abs() < VELOCITY_THRESHOLD {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(MS_16);
        }
    }

    #[test]
    fn settle_spring_reaches_each_snap_target() {
        for (from, to) in [(0.3, 0.0), (0.45, 0.5), (0.8, 1.0), (1.0, 0.5)] {
            let mut spring = Spring::new(from, to);
            simulate(&mut spring, 120);
            assert!(spring.is_complete(), "{from} -> {to} did not settle");
            assert_eq!(spring.value(), to);
        }
    }

    #[test]
    fn settle_config_is_underdamped() {
        let config = SpringConfig::SETTLE;
        assert!(config.damping < 2.0 * config.stiffness.sqrt());
    }

    #[test]
    fn settle_overshoot_is_small() {
        let mut spring = Spring::new(0.0, 1.0);
        let mut max_pos = 0.0_f64;
        for _ in 0..200 {
            spring.tick(MS_16);
            max_pos = max_pos.max(spring.position);
        }
        assert!(max_pos > 1.0, "expected a soft overshoot, max was {max_pos}");
        assert!(max_pos < 1.05, "overshoot too large: {max_pos}");
    }

    #[test]
    fn resting_spring_ignores_ticks() {
        let mut spring = Spring::new(0.0, 1.0);
        simulate(&mut spring, 200);
        assert!(spring.is_complete());

        spring.tick(Duration::from_secs(1));
        assert_eq!(spring.position, 1.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn zero_dt_noop() {
        let mut spring = Spring::new(0.0, 1.0);
        spring.tick(Duration::ZERO);
        assert_eq!(spring.position, 0.0);
        assert!(!spring.is_complete());
    }

    #[test]
    fn large_dt_subdivided() {
        let mut spring = Spring::new(0.0, 1.0);
        spring.tick(Duration::from_secs(5));
        assert!(spring.is_complete(), "position: {}", spring.position);
    }

    #[test]
    fn stiffness_and_damping_clamped() {
        let spring = Spring::new(0.0, 1.0).with_config(SpringConfig {
            stiffness: -4.0,
            damping: -5.0,
        });
        assert_eq!(spring.stiffness, MIN_STIFFNESS);
        assert_eq!(spring.damping, 0.0);
    }

    #[test]
    fn value_clamps_overshoot() {
        let mut spring = Spring::new(0.0, 1.0);
        for _ in 0..200 {
            spring.tick(MS_16);
            let v = spring.value();
            assert!((0.0..=1.0).contains(&v), "value out of range: {v}");
        }
    }

    #[test]
    fn impulse_wakes_resting_spring() {
        let mut spring = Spring::new(0.5, 0.5);
        spring.tick(MS_16);
        assert!(spring.is_complete());

        spring.impulse(-3.0);
        assert!(!spring.is_complete());
        spring.tick(MS_16);
        assert!(spring.value() < 0.5);
    }

    #[test]
    fn deterministic_across_runs() {
        let run = || {
            let mut spring = Spring::new(0.2, 0.0);
            (0..50)
                .map(|_| {
                    spring.tick(MS_16);
                    spring.position
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
