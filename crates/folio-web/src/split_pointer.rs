#![forbid(unsafe_code)]

//! Deterministic web adapter for the interactive split screen.
//!
//! This module bridges browser pointer lifecycle signals and
//! `requestAnimationFrame` callbacks into a [`PointerTracker`] while
//! enforcing:
//! - pointer input is ignored while the layout is stacked,
//! - at most one settle animation loop is live, addressed by handle, and
//! - interruption paths (blur/visibility/pointercancel) settle like a leave.
//!
//! Every call returns a [`SplitDispatch`] carrying the resolved
//! [`SplitFrame`], an optional [`FrameCommand`] for the host's animation
//! loop, and a structured log record.

use folio_core::{PointerTracker, SettleHandle, SnapTarget, TickOutcome, TrackerConfig, VisualConfig};
use folio_layout::{Breakpoints, PanelRenderer, PixelRect, SplitFrame, SplitMode};
use serde::{Serialize, Serializer};
use web_time::Duration;

use crate::DeterministicClock;

/// Largest time step fed to the spring for a single animation frame.
///
/// Background tabs can deliver frames seconds apart; larger gaps are
/// clamped so the settle resumes smoothly instead of jumping.
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(64);

/// Adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPointerConfig {
    pub tracker: TrackerConfig,
    pub visuals: VisualConfig,
    pub breakpoints: Breakpoints,
    /// Upper bound on `dt` between consecutive animation frames.
    pub max_frame_delta: Duration,
}

impl Default for SplitPointerConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            visuals: VisualConfig::DEFAULT,
            breakpoints: Breakpoints::DEFAULT,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }
}

/// Host command for the `requestAnimationFrame` loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameCommand {
    /// Schedule one frame and report it back with this handle.
    Request { handle: u64 },
    /// Drop any pending frame for this handle.
    Cancel { handle: u64 },
}

/// Lifecycle phase recorded for one adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitLifecyclePhase {
    PointerEnter,
    PointerMove,
    PointerLeave,
    PointerCancel,
    Blur,
    VisibilityHidden,
    Resize,
    AnimationFrame,
}

/// Deterministic reason why an incoming signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitIgnoredReason {
    StackedLayout,
    NotHovering,
    StaleFrame,
}

/// Outcome category for one dispatch.
///
/// Snap targets serialize as their progress value (0, 0.5, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitLogOutcome {
    Applied,
    SettleStarted {
        #[serde(serialize_with = "serialize_target")]
        target: SnapTarget,
    },
    SettleFinished {
        #[serde(serialize_with = "serialize_target")]
        target: SnapTarget,
    },
    Ignored(SplitIgnoredReason),
}

/// Structured log record for one dispatch. Hosts forward it as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitLogEntry {
    pub phase: SplitLifecyclePhase,
    /// Monotonic sequence; `None` for ignored signals.
    pub sequence: Option<u64>,
    pub progress: f64,
    pub hover: bool,
    pub frame_command: Option<FrameCommand>,
    pub outcome: SplitLogOutcome,
}

/// Result of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitDispatch {
    pub frame: SplitFrame,
    pub frame_command: Option<FrameCommand>,
    pub log: SplitLogEntry,
}

/// Deterministic split-screen adapter for web hosts.
///
/// The host forwards `pointerenter` / `pointermove` / `pointerleave`,
/// `pointercancel`, window `blur`, `visibilitychange`, container resizes,
/// and animation-frame timestamps. The adapter never reads a wall clock.
#[derive(Debug, Clone)]
pub struct SplitPointerAdapter {
    config: SplitPointerConfig,
    tracker: PointerTracker,
    renderer: PanelRenderer,
    container: PixelRect,
    mode: SplitMode,
    clock: DeterministicClock,
    last_frame_at: Option<Duration>,
    next_sequence: u64,
}

impl SplitPointerAdapter {
    /// Create an adapter for a container at `container`.
    #[must_use]
    pub fn new(config: SplitPointerConfig, container: PixelRect) -> Self {
        Self {
            config,
            tracker: PointerTracker::new(config.tracker),
            renderer: PanelRenderer::new(config.visuals),
            container,
            mode: mode_for(&config.breakpoints, container.width),
            clock: DeterministicClock::new(),
            last_frame_at: None,
            next_sequence: 1,
        }
    }

    #[must_use]
    pub const fn config(&self) -> SplitPointerConfig {
        self.config
    }

    #[must_use]
    pub const fn mode(&self) -> SplitMode {
        self.mode
    }

    #[must_use]
    pub const fn container(&self) -> PixelRect {
        self.container
    }

    #[must_use]
    pub const fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn clock(&self) -> DeterministicClock {
        self.clock
    }

    /// Handle of the live settle loop, if any.
    #[must_use]
    pub fn active_frame_handle(&self) -> Option<u64> {
        self.tracker.settle_handle().map(SettleHandle::id)
    }

    /// Current frame without dispatching anything.
    #[must_use]
    pub fn frame(&self) -> SplitFrame {
        match self.mode {
            SplitMode::Stacked => self.renderer.render_stacked(self.container),
            SplitMode::Interactive => self.renderer.render(self.container, self.tracker.snapshot()),
        }
    }

    /// Pointer entered the container.
    pub fn pointer_enter(&mut self) -> SplitDispatch {
        let phase = SplitLifecyclePhase::PointerEnter;
        if self.mode == SplitMode::Stacked {
            return self.ignored(phase, SplitIgnoredReason::StackedLayout);
        }
        let cancelled = self.tracker.on_pointer_enter();
        self.last_frame_at = None;
        self.applied(phase, cancelled.map(cancel_command), SplitLogOutcome::Applied)
    }

    /// Pointer moved to viewport coordinate `client_x`.
    ///
    /// O(1) and allocation-free.
    pub fn pointer_move(&mut self, client_x: f64) -> SplitDispatch {
        let phase = SplitLifecyclePhase::PointerMove;
        if self.mode == SplitMode::Stacked {
            return self.ignored(phase, SplitIgnoredReason::StackedLayout);
        }
        let cancelled = self.tracker.settle_handle();
        let local_x = self.container.local_x(client_x);
        self.tracker.on_pointer_move(local_x, self.container.width);
        if cancelled.is_some() {
            self.last_frame_at = None;
        }
        self.applied(phase, cancelled.map(cancel_command), SplitLogOutcome::Applied)
    }

    /// Pointer left the container: start settling toward the nearest snap
    /// point and ask the host for a frame.
    pub fn pointer_leave(&mut self) -> SplitDispatch {
        let phase = SplitLifecyclePhase::PointerLeave;
        if self.mode == SplitMode::Stacked {
            return self.ignored(phase, SplitIgnoredReason::StackedLayout);
        }
        self.start_settle(phase)
    }

    /// `pointercancel` from the browser. Settles like a leave.
    pub fn pointer_cancel(&mut self) -> SplitDispatch {
        self.interrupt(SplitLifecyclePhase::PointerCancel)
    }

    /// Window lost focus while hovering. Settles like a leave.
    pub fn blur(&mut self) -> SplitDispatch {
        self.interrupt(SplitLifecyclePhase::Blur)
    }

    /// Document became hidden while hovering. Settles like a leave.
    pub fn visibility_hidden(&mut self) -> SplitDispatch {
        self.interrupt(SplitLifecyclePhase::VisibilityHidden)
    }

    /// Container geometry changed. Crossing into the stacked layout resets
    /// the split to neutral and stops any settle loop.
    pub fn resize(&mut self, container: PixelRect) -> SplitDispatch {
        self.container = container;
        let mode = mode_for(&self.config.breakpoints, container.width);
        let mut command = None;
        if mode != self.mode {
            command = self.tracker.settle_handle().map(cancel_command);
            self.tracker.reset();
            self.last_frame_at = None;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                ?mode,
                breakpoint = %self.config.breakpoints.classify(container.width),
                width = container.width,
                "split layout mode changed"
            );
            self.mode = mode;
        }
        self.applied(SplitLifecyclePhase::Resize, command, SplitLogOutcome::Applied)
    }

    /// Animation frame for `handle` delivered at host time `now`.
    pub fn animation_frame(&mut self, handle: u64, now: Duration) -> SplitDispatch {
        let phase = SplitLifecyclePhase::AnimationFrame;
        self.clock.set(now);
        if self.mode == SplitMode::Stacked {
            return self.ignored(phase, SplitIgnoredReason::StackedLayout);
        }

        // The first frame of a loop only establishes the time base.
        let dt = self
            .last_frame_at
            .map_or(Duration::ZERO, |last| self.clock.since(last))
            .min(self.config.max_frame_delta);

        let outcome = match self.tracker.settle_handle() {
            Some(current) if current.id() == handle => self.tracker.tick_handle(current, dt),
            _ => TickOutcome::Stale,
        };

        match outcome {
            TickOutcome::Settling { .. } => {
                self.last_frame_at = Some(self.clock.now());
                self.applied(
                    phase,
                    Some(FrameCommand::Request { handle }),
                    SplitLogOutcome::Applied,
                )
            }
            TickOutcome::Settled { target } => {
                self.last_frame_at = None;
                self.applied(phase, None, SplitLogOutcome::SettleFinished { target })
            }
            TickOutcome::Idle | TickOutcome::Stale => {
                self.ignored(phase, SplitIgnoredReason::StaleFrame)
            }
        }
    }

    fn interrupt(&mut self, phase: SplitLifecyclePhase) -> SplitDispatch {
        if self.mode == SplitMode::Stacked {
            return self.ignored(phase, SplitIgnoredReason::StackedLayout);
        }
        if !self.tracker.is_hovering() {
            return self.ignored(phase, SplitIgnoredReason::NotHovering);
        }
        self.start_settle(phase)
    }

    fn start_settle(&mut self, phase: SplitLifecyclePhase) -> SplitDispatch {
        let handle = self.tracker.on_pointer_leave();
        self.last_frame_at = None;
        let target = self
            .tracker
            .settle_target()
            .unwrap_or_else(|| SnapTarget::nearest(self.tracker.progress().get()));
        self.applied(
            phase,
            Some(FrameCommand::Request {
                handle: handle.id(),
            }),
            SplitLogOutcome::SettleStarted { target },
        )
    }

    fn applied(
        &mut self,
        phase: SplitLifecyclePhase,
        frame_command: Option<FrameCommand>,
        outcome: SplitLogOutcome,
    ) -> SplitDispatch {
        let sequence = self.next_sequence();
        self.dispatch(phase, Some(sequence), frame_command, outcome)
    }

    fn ignored(&mut self, phase: SplitLifecyclePhase, reason: SplitIgnoredReason) -> SplitDispatch {
        #[cfg(feature = "tracing")]
        tracing::trace!(?phase, ?reason, "split signal ignored");
        self.dispatch(phase, None, None, SplitLogOutcome::Ignored(reason))
    }

    fn dispatch(
        &self,
        phase: SplitLifecyclePhase,
        sequence: Option<u64>,
        frame_command: Option<FrameCommand>,
        outcome: SplitLogOutcome,
    ) -> SplitDispatch {
        let frame = self.frame();
        SplitDispatch {
            frame,
            frame_command,
            log: SplitLogEntry {
                phase,
                sequence,
                progress: frame.progress,
                hover: frame.hover,
                frame_command,
                outcome,
            },
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

impl Default for SplitPointerAdapter {
    fn default() -> Self {
        Self::new(SplitPointerConfig::default(), PixelRect::default())
    }
}

fn mode_for(breakpoints: &Breakpoints, width: f64) -> SplitMode {
    *SplitMode::responsive().resolve(breakpoints.classify(width))
}

fn cancel_command(handle: SettleHandle) -> FrameCommand {
    FrameCommand::Cancel {
        handle: handle.id(),
    }
}

fn serialize_target<S: Serializer>(target: &SnapTarget, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(target.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    const FRAME: Duration = Duration::from_millis(16);

    fn adapter() -> SplitPointerAdapter {
        SplitPointerAdapter::new(
            SplitPointerConfig::default(),
            PixelRect::new(100.0, 0.0, 1200.0, 800.0),
        )
    }

    fn requested_handle(dispatch: &SplitDispatch) -> u64 {
        match dispatch.frame_command {
            Some(FrameCommand::Request { handle }) => handle,
            other => panic!("expected frame request, got {other:?}"),
        }
    }

    /// Drive frames until the loop stops requesting; returns the last dispatch.
    fn run_frames(adapter: &mut SplitPointerAdapter, mut handle: u64, start: Duration) -> SplitDispatch {
        let mut now = start;
        for _ in 0..600 {
            let dispatch = adapter.animation_frame(handle, now);
            match dispatch.frame_command {
                Some(FrameCommand::Request { handle: next }) => handle = next,
                _ => return dispatch,
            }
            now += FRAME;
        }
        panic!("settle loop never finished");
    }

    #[test]
    fn pointer_move_maps_client_x_into_container() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        let dispatch = adapter.pointer_move(100.0 + 900.0);

        assert!((dispatch.frame.progress - 0.75).abs() < 1e-12);
        assert!(dispatch.frame.hover);
        assert_eq!(dispatch.frame_command, None);
        assert_eq!(dispatch.log.outcome, SplitLogOutcome::Applied);
        assert_eq!(dispatch.log.phase, SplitLifecyclePhase::PointerMove);
    }

    #[test]
    fn pointer_move_snaps_near_edges() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        assert_eq!(adapter.pointer_move(100.0 + 12.0).frame.progress, 0.0);
        assert_eq!(adapter.pointer_move(100.0 + 1190.0).frame.progress, 1.0);
    }

    #[test]
    fn leave_requests_frames_until_settled() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 960.0);

        let leave = adapter.pointer_leave();
        assert!(!leave.frame.hover);
        assert_eq!(
            leave.log.outcome,
            SplitLogOutcome::SettleStarted {
                target: SnapTarget::End
            }
        );
        let handle = requested_handle(&leave);

        let last = run_frames(&mut adapter, handle, Duration::from_secs(1));
        assert_eq!(
            last.log.outcome,
            SplitLogOutcome::SettleFinished {
                target: SnapTarget::End
            }
        );
        assert_eq!(last.frame.progress, 1.0);
        assert_eq!(adapter.active_frame_handle(), None);
    }

    #[test]
    fn middle_third_settles_to_center() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 660.0);
        let handle = requested_handle(&adapter.pointer_leave());

        let last = run_frames(&mut adapter, handle, Duration::ZERO);
        assert_eq!(last.frame.progress, 0.5);
    }

    #[test]
    fn enter_cancels_running_settle() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 200.0);
        let handle = requested_handle(&adapter.pointer_leave());
        adapter.animation_frame(handle, Duration::ZERO);
        adapter.animation_frame(handle, FRAME);

        let enter = adapter.pointer_enter();
        assert_eq!(enter.frame_command, Some(FrameCommand::Cancel { handle }));
        assert!(enter.frame.hover);

        let frozen = enter.frame.progress;
        let stale = adapter.animation_frame(handle, FRAME * 2);
        assert_eq!(
            stale.log.outcome,
            SplitLogOutcome::Ignored(SplitIgnoredReason::StaleFrame)
        );
        assert_eq!(stale.log.sequence, None);
        assert_eq!(stale.frame.progress, frozen);
    }

    #[test]
    fn move_cancels_running_settle() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 1000.0);
        let handle = requested_handle(&adapter.pointer_leave());

        let dispatch = adapter.pointer_move(100.0 + 600.0);
        assert_eq!(dispatch.frame_command, Some(FrameCommand::Cancel { handle }));
        assert!((dispatch.frame.progress - 0.5).abs() < 1e-12);
    }

    #[test]
    fn second_leave_replaces_first_loop() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 1000.0);
        let first = requested_handle(&adapter.pointer_leave());
        adapter.animation_frame(first, Duration::ZERO);

        let second = requested_handle(&adapter.pointer_leave());
        assert_ne!(first, second);

        let stale = adapter.animation_frame(first, FRAME);
        assert_eq!(
            stale.log.outcome,
            SplitLogOutcome::Ignored(SplitIgnoredReason::StaleFrame)
        );
        let last = run_frames(&mut adapter, second, FRAME);
        assert_eq!(last.frame.progress, 1.0);
    }

    #[test]
    fn blur_while_hovering_settles_like_leave() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 300.0);

        let blur = adapter.blur();
        assert_eq!(blur.log.phase, SplitLifecyclePhase::Blur);
        assert_eq!(
            blur.log.outcome,
            SplitLogOutcome::SettleStarted {
                target: SnapTarget::Start
            }
        );
        assert!(matches!(blur.frame_command, Some(FrameCommand::Request { .. })));
    }

    #[test]
    fn interruptions_without_hover_are_ignored() {
        let mut adapter = adapter();
        for dispatch in [
            adapter.blur(),
            adapter.visibility_hidden(),
            adapter.pointer_cancel(),
        ] {
            assert_eq!(
                dispatch.log.outcome,
                SplitLogOutcome::Ignored(SplitIgnoredReason::NotHovering)
            );
            assert_eq!(dispatch.frame_command, None);
        }
    }

    #[test]
    fn stacked_layout_ignores_pointer_input() {
        let mut adapter = SplitPointerAdapter::new(
            SplitPointerConfig::default(),
            PixelRect::from_size(600.0, 900.0),
        );
        assert_eq!(adapter.mode(), SplitMode::Stacked);

        for dispatch in [
            adapter.pointer_enter(),
            adapter.pointer_move(590.0),
            adapter.pointer_leave(),
        ] {
            assert_eq!(
                dispatch.log.outcome,
                SplitLogOutcome::Ignored(SplitIgnoredReason::StackedLayout)
            );
            assert_eq!(dispatch.frame.indicator, None);
            assert_eq!(dispatch.frame.progress, 0.5);
        }
    }

    #[test]
    fn resize_into_stacked_resets_and_cancels() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 1100.0);
        let handle = requested_handle(&adapter.pointer_leave());

        let dispatch = adapter.resize(PixelRect::from_size(700.0, 900.0));
        assert_eq!(adapter.mode(), SplitMode::Stacked);
        assert_eq!(dispatch.frame_command, Some(FrameCommand::Cancel { handle }));
        assert_eq!(dispatch.frame.progress, 0.5);
        assert!(!adapter.tracker().is_hovering());

        adapter.resize(PixelRect::from_size(1280.0, 900.0));
        assert_eq!(adapter.mode(), SplitMode::Interactive);
        assert_eq!(adapter.frame().progress, 0.5);
    }

    #[test]
    fn long_frame_gap_is_clamped() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 1000.0);
        let handle = requested_handle(&adapter.pointer_leave());
        adapter.animation_frame(handle, Duration::ZERO);

        let after_gap = adapter.animation_frame(handle, Duration::from_secs(5));
        assert_eq!(after_gap.frame_command, Some(FrameCommand::Request { handle }));
        assert!(after_gap.frame.progress < 1.0);
        assert_eq!(adapter.clock().now(), Duration::from_secs(5));
    }

    #[test]
    fn sequences_increase_for_applied_dispatches() {
        let mut adapter = adapter();
        let a = adapter.pointer_enter().log.sequence;
        let ignored = adapter.animation_frame(99, Duration::ZERO).log.sequence;
        let b = adapter.pointer_move(500.0).log.sequence;
        assert_eq!(a, Some(1));
        assert_eq!(ignored, None);
        assert_eq!(b, Some(2));
    }

    #[test]
    fn log_entries_serialize_for_host() {
        let mut adapter = adapter();
        adapter.pointer_enter();
        adapter.pointer_move(100.0 + 1100.0);
        let leave = adapter.pointer_leave();

        let value = serde_json::to_value(leave.log).expect("log serializes");
        assert_eq!(value["phase"], "pointer_leave");
        assert_eq!(value["sequence"], 3);
        assert_eq!(value["hover"], false);
        assert_eq!(
            value["frame_command"],
            serde_json::json!({ "request": { "handle": 1 } })
        );
        assert_eq!(
            value["outcome"],
            serde_json::json!({ "settle_started": { "target": 1.0 } })
        );

        let ignored = adapter.animation_frame(99, Duration::ZERO);
        let value = serde_json::to_value(ignored.log).expect("log serializes");
        assert_eq!(value["sequence"], serde_json::Value::Null);
        assert_eq!(value["frame_command"], serde_json::Value::Null);
        assert_eq!(value["outcome"], serde_json::json!({ "ignored": "stale_frame" }));
    }
}
