//! Property-based invariant tests for split progress and derived visuals.
//!
//! 1. Clamping is the identity inside [0, 1] and saturates outside
//! 2. Panel widths always sum to 1
//! 3. Pointer progress is always in range, whatever the input
//! 4. Snap targets partition [0, 1] into thirds
//! 5. Visual parameters stay inside their documented ranges
//! 6. Arbitrary pointer/tick sequences never leave progress out of range

use std::time::Duration;

use folio_core::progress::{Progress, SnapTarget, clamp01};
use folio_core::tracker::PointerTracker;
use folio_core::visual::{SplitSnapshot, VisualConfig, split_visuals};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Enter,
    Move(f64, f64),
    Leave,
    Tick(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Enter),
        (-200.0f64..1400.0, 0.0f64..1200.0).prop_map(|(x, w)| Op::Move(x, w)),
        Just(Op::Leave),
        (0u64..100).prop_map(Op::Tick),
    ]
}

// ═══════════════════════════════════════════════════════════════════════
// 1–3. Progress
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_is_identity_in_range(raw in 0.0f64..=1.0) {
        prop_assert_eq!(clamp01(raw), raw);
    }

    #[test]
    fn clamp_saturates_below(raw in -1e9f64..0.0) {
        prop_assert_eq!(clamp01(raw), 0.0);
    }

    #[test]
    fn clamp_saturates_above(raw in 1.0f64..1e9) {
        prop_assert_eq!(clamp01(raw), 1.0);
    }

    #[test]
    fn widths_sum_to_one(p in 0.0f64..=1.0, hover in any::<bool>()) {
        let v = split_visuals(SplitSnapshot::new(p, hover), &VisualConfig::DEFAULT);
        prop_assert!((v.left.width_fraction + v.right.width_fraction - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pointer_progress_in_range(x in any::<f64>(), w in any::<f64>()) {
        let p = Progress::from_pointer(x, w, 0.04).get();
        prop_assert!((0.0..=1.0).contains(&p), "progress {} for x={} w={}", p, x, w);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Snap targets
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snap_target_matches_third(p in 0.0f64..=1.0) {
        let expected = if p < 0.35 {
            SnapTarget::Start
        } else if p > 0.65 {
            SnapTarget::End
        } else {
            SnapTarget::Center
        };
        prop_assert_eq!(SnapTarget::nearest(p), expected);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Visual ranges
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn visual_params_in_range(p in 0.0f64..=1.0, hover in any::<bool>()) {
        let v = split_visuals(SplitSnapshot::new(p, hover), &VisualConfig::DEFAULT);
        for params in [v.left, v.right] {
            prop_assert!((0.0..=1.0).contains(&params.opacity));
            prop_assert!(params.blur >= 0.0);
            prop_assert!(params.scale >= 1.0);
            prop_assert!(params.offset_x.is_finite());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Tracker sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tracker_progress_always_in_range(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut tracker = PointerTracker::default();
        for op in ops {
            match op {
                Op::Enter => {
                    tracker.on_pointer_enter();
                }
                Op::Move(x, w) => {
                    tracker.on_pointer_move(x, w);
                }
                Op::Leave => {
                    tracker.on_pointer_leave();
                }
                Op::Tick(ms) => {
                    tracker.tick(Duration::from_millis(ms));
                }
            }
            let p = tracker.progress().get();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn leave_then_enough_ticks_rests_on_target(x in 0.0f64..=400.0) {
        let mut tracker = PointerTracker::default();
        tracker.on_pointer_enter();
        tracker.on_pointer_move(x, 400.0);
        let target = SnapTarget::nearest(tracker.progress().get());
        tracker.on_pointer_leave();
        for _ in 0..240 {
            tracker.tick(Duration::from_millis(16));
        }
        prop_assert!(!tracker.is_settling());
        prop_assert_eq!(tracker.progress(), Progress::from(target));
    }
}
