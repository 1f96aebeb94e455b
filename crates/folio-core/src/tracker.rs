#![forbid(unsafe_code)]

//! Pointer tracking for the interactive split screen.
//!
//! [`PointerTracker`] owns the split [`Progress`] and hover state of one
//! container. Pointer moves write progress directly; a pointer leave starts
//! a spring that settles progress onto the nearest [`SnapTarget`].
//!
//! # Invariants
//!
//! 1. Progress stays inside `[0.0, 1.0]`, including while the spring
//!    overshoots its target.
//! 2. At most one settle animation exists per tracker. It is represented by
//!    a [`SettleHandle`] stored next to progress: enter and move cancel it,
//!    and a new leave replaces it rather than stacking a second writer.
//! 3. Ticks addressed to a stale handle never touch progress.
//! 4. `on_pointer_move` is O(1) and allocation-free.

use web_time::Duration;

use crate::animation::{Animation, Spring, SpringConfig};
use crate::progress::{DEFAULT_SNAP_ZONE, Progress, SnapTarget};
use crate::visual::SplitSnapshot;

/// Tuning values for a [`PointerTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Distance from either edge inside which pointer progress snaps to the edge.
    pub snap_zone: f64,
    /// Spring used to settle progress after the pointer leaves.
    pub spring: SpringConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            snap_zone: DEFAULT_SNAP_ZONE,
            spring: SpringConfig::SETTLE,
        }
    }
}

/// Identity of one settle animation.
///
/// Hosts keep the handle they were given when scheduling animation frames and
/// pass it back on every tick; once the settle is cancelled or replaced the
/// handle goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleHandle(u64);

impl SettleHandle {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct SettleTask {
    handle: SettleHandle,
    target: SnapTarget,
    spring: Spring,
}

/// Result of advancing the settle animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No settle animation is running.
    Idle,
    /// The tick was addressed to a handle that is no longer current.
    Stale,
    /// The spring moved; progress is still converging.
    Settling { progress: Progress },
    /// The spring came to rest; progress now equals the target.
    Settled { target: SnapTarget },
}

impl TickOutcome {
    /// Whether the host should schedule another frame.
    #[must_use]
    pub const fn needs_frame(self) -> bool {
        matches!(self, Self::Settling { .. })
    }
}

/// Progress and hover owner for a single split container.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    config: TrackerConfig,
    progress: Progress,
    hovering: bool,
    settle: Option<SettleTask>,
    next_handle: u64,
}

impl PointerTracker {
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            progress: Progress::NEUTRAL,
            hovering: false,
            settle: None,
            next_handle: 1,
        }
    }

    #[must_use]
    pub const fn config(&self) -> TrackerConfig {
        self.config
    }

    #[inline]
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    #[inline]
    #[must_use]
    pub const fn is_hovering(&self) -> bool {
        self.hovering
    }

    #[must_use]
    pub const fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Handle of the running settle animation, if any.
    #[must_use]
    pub fn settle_handle(&self) -> Option<SettleHandle> {
        self.settle.as_ref().map(|task| task.handle)
    }

    /// Target of the running settle animation, if any.
    #[must_use]
    pub fn settle_target(&self) -> Option<SnapTarget> {
        self.settle.as_ref().map(|task| task.target)
    }

    /// Immutable `(progress, hover)` snapshot for visual derivation.
    #[inline]
    #[must_use]
    pub const fn snapshot(&self) -> SplitSnapshot {
        SplitSnapshot {
            progress: self.progress,
            hover: self.hovering,
        }
    }

    /// Pointer entered the container. Interrupts any settle in flight.
    ///
    /// Returns the handle that was cancelled, if one was running.
    pub fn on_pointer_enter(&mut self) -> Option<SettleHandle> {
        self.hovering = true;
        self.cancel_settle()
    }

    /// Pointer moved to `local_x` inside a container `container_width` wide.
    ///
    /// Progress is updated immediately with edge snapping applied. Any settle
    /// in flight is cancelled.
    #[inline]
    pub fn on_pointer_move(&mut self, local_x: f64, container_width: f64) -> Progress {
        self.cancel_settle();
        self.progress = Progress::from_pointer(local_x, container_width, self.config.snap_zone);
        self.progress
    }

    /// Pointer left the container: clear hover and start settling toward the
    /// snap target nearest to the current progress.
    ///
    /// A leave that arrives while a previous settle is still running replaces
    /// it; the new spring starts from the current progress and inherits the
    /// old spring's velocity so the motion stays continuous.
    pub fn on_pointer_leave(&mut self) -> SettleHandle {
        self.hovering = false;
        let target = SnapTarget::nearest(self.progress.get());
        let carried_velocity = self
            .settle
            .take()
            .map_or(0.0, |previous| previous.spring.velocity());

        let mut spring =
            Spring::new(self.progress.get(), target.value()).with_config(self.config.spring);
        if carried_velocity != 0.0 {
            spring.impulse(carried_velocity);
        }

        let handle = SettleHandle(self.next_handle);
        self.next_handle = self.next_handle.saturating_add(1);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            handle = handle.id(),
            from = self.progress.get(),
            target = ?target,
            "split settle started"
        );

        self.settle = Some(SettleTask {
            handle,
            target,
            spring,
        });
        handle
    }

    /// Cancel the running settle animation, leaving progress where it is.
    pub fn cancel_settle(&mut self) -> Option<SettleHandle> {
        let cancelled = self.settle.take().map(|task| task.handle);

        #[cfg(feature = "tracing")]
        if let Some(handle) = cancelled {
            tracing::debug!(handle = handle.id(), "split settle interrupted");
        }

        cancelled
    }

    /// Advance the current settle animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        let Some(task) = self.settle.as_mut() else {
            return TickOutcome::Idle;
        };

        task.spring.tick(dt);
        if task.spring.is_complete() {
            let target = task.target;
            self.progress = Progress::from(target);
            self.settle = None;

            #[cfg(feature = "tracing")]
            tracing::debug!(target = ?target, "split settle finished");

            return TickOutcome::Settled { target };
        }

        self.progress = Progress::new(task.spring.value());
        TickOutcome::Settling {
            progress: self.progress,
        }
    }

    /// Advance the settle animation only if `handle` is still current.
    pub fn tick_handle(&mut self, handle: SettleHandle, dt: Duration) -> TickOutcome {
        if self.settle_handle() == Some(handle) {
            self.tick(dt)
        } else {
            TickOutcome::Stale
        }
    }

    /// Return to neutral: even split, not hovering, nothing settling.
    pub fn reset(&mut self) {
        self.progress = Progress::NEUTRAL;
        self.hovering = false;
        self.settle = None;
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
