#![forbid(unsafe_code)]

//! `folio-web` is the host-facing side of folio.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page (JS) pushes pointer lifecycle
//!   signals, container sizes, and animation-frame callbacks.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The crate does not bind to `wasm-bindgen`; a thin JS shim forwards DOM
//! events to [`split_pointer::SplitPointerAdapter`] and applies the returned
//! frames and frame commands.

pub mod contact;
pub mod split_pointer;

use web_time::Duration;

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Time never moves backwards.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    #[must_use]
    pub fn since(&self, earlier: Duration) -> Duration {
        self.now.saturating_sub(earlier)
    }
}
