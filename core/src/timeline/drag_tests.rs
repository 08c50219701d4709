//! Tests for the drag/commit engine.
//!
//! Covers frame snapping, window clamping, simultaneity-group capture and
//! rigid translation, and the pointer-session behavior of the timeline
//! facade.

use std::collections::HashMap;

use tactic_types::TimelineSettings;

use super::bounds::TimeWindow;
use super::drag::{DragContext, DragInput, clamp, frame_of, snap_to_frame};
use super::{Timeline, compute_bounds};
use crate::events::{AttackItem, BuffItem, ItemRef, ItemSet};

const FPS: f64 = 30.0;

fn attack(character: &str, start_time: f64) -> AttackItem {
    AttackItem {
        start_time,
        character: character.to_string(),
        detail: "EX".to_string(),
        all_delays: vec![0.5, 1.0],
    }
}

fn buff(character: &str, start_time: f64) -> BuffItem {
    BuffItem {
        start_time,
        delay: 2.0,
        duration: 10.0,
        character: character.to_string(),
        detail: "EX".to_string(),
        ue2: false,
    }
}

fn window(min_time: f64, max_time: f64) -> TimeWindow {
    TimeWindow { min_time, max_time }
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapping and clamping primitives
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_snap_is_idempotent() {
    for &sec in &[0.0, 0.017, 3.2, 3.21, -1.23, 59.999, 600.4] {
        let once = snap_to_frame(sec, FPS);
        assert_eq!(snap_to_frame(once, FPS), once, "snap of {sec} not stable");
    }
}

#[test]
fn test_snap_hits_nearest_frame() {
    // 3.2s is exactly 96 frames and stays put.
    assert_eq!(snap_to_frame(3.2, FPS), 96.0 / 30.0);
    // 3.21s is 96.3 frames and rounds down to 96.
    assert_eq!(snap_to_frame(3.21, FPS), 96.0 / 30.0);
    // 3.23s is 96.9 frames and rounds up to 97.
    assert_eq!(snap_to_frame(3.23, FPS), 97.0 / 30.0);
}

#[test]
fn test_frame_of_matches_snap() {
    for &sec in &[0.0, 3.21, 10.01, 59.99] {
        let frame = frame_of(sec, FPS);
        assert_eq!(snap_to_frame(sec, FPS), frame as f64 / FPS);
    }
}

#[test]
fn test_clamp() {
    assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Group capture
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_capture_collects_same_character_same_frame() {
    let items = ItemSet {
        attack: vec![
            attack("A", 10.0),
            attack("A", 10.01), // same frame 300, sub-frame offset
            attack("A", 10.5),  // different frame
            attack("B", 10.0),  // different character
        ],
        buff: vec![buff("A", 10.0), buff("B", 10.0)],
    };
    let ctx = DragContext::capture(&items, ItemRef::Attack(0), FPS).unwrap();
    assert_eq!(ctx.character, "A");
    assert_eq!(ctx.base_frame, 300);
    // Leader, its sub-frame sibling, and the matching buff.
    assert_eq!(ctx.group_len(), 3);
}

#[test]
fn test_capture_of_ungrouped_item_is_single() {
    let items = ItemSet {
        attack: vec![attack("A", 10.0)],
        buff: vec![],
    };
    let ctx = DragContext::capture(&items, ItemRef::Attack(0), FPS).unwrap();
    assert_eq!(ctx.group_len(), 1);
}

#[test]
fn test_capture_stale_reference_fails() {
    let items = ItemSet::default();
    assert!(DragContext::capture(&items, ItemRef::Attack(0), FPS).is_none());
    assert!(DragContext::capture(&items, ItemRef::Buff(3), FPS).is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Applying moves
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_group_translates_rigidly() {
    let mut items = ItemSet {
        attack: vec![attack("A", 10.0), attack("A", 10.5)],
        buff: vec![buff("A", 10.0)],
    };
    let ctx = DragContext::capture(&items, ItemRef::Attack(0), FPS).unwrap();
    let delta = ctx.apply(&mut items, 12.34, window(0.0, 60.0), FPS);

    let snapped = snap_to_frame(12.34, FPS);
    assert_eq!(delta, snapped - 10.0);
    assert_eq!(items.attack[0].start_time, snapped);
    assert_eq!(items.buff[0].start_time, snapped);
    // Grouped items still share one frame after the move.
    assert_eq!(
        frame_of(items.attack[0].start_time, FPS),
        frame_of(items.buff[0].start_time, FPS)
    );
    // The different-frame item did not move.
    assert_eq!(items.attack[1].start_time, 10.5);
}

#[test]
fn test_other_characters_never_move() {
    let mut items = ItemSet {
        attack: vec![attack("A", 10.0), attack("B", 10.0)],
        buff: vec![buff("B", 10.0)],
    };
    let ctx = DragContext::capture(&items, ItemRef::Attack(0), FPS).unwrap();
    ctx.apply(&mut items, 20.0, window(0.0, 60.0), FPS);
    assert_eq!(items.attack[1].start_time, 10.0);
    assert_eq!(items.buff[0].start_time, 10.0);
}

#[test]
fn test_clamp_limits_realized_delta() {
    let mut items = ItemSet {
        attack: vec![attack("A", 10.0)],
        buff: vec![],
    };
    let ctx = DragContext::capture(&items, ItemRef::Attack(0), FPS).unwrap();
    // Requested far past the window: realized delta stops at the edge.
    let delta = ctx.apply(&mut items, 99.0, window(0.0, 20.0), FPS);
    assert_eq!(delta, 10.0);
    assert_eq!(items.attack[0].start_time, 20.0);

    let delta = ctx.apply(&mut items, -99.0, window(0.0, 20.0), FPS);
    assert_eq!(delta, -10.0);
    assert_eq!(items.attack[0].start_time, 0.0);
}

#[test]
fn test_member_at_boundary_stays_inside() {
    // Leader slightly below the edge, sibling exactly on it, same frame.
    let mut items = ItemSet {
        attack: vec![attack("A", 19.99), attack("A", 20.0)],
        buff: vec![],
    };
    let ctx = DragContext::capture(&items, ItemRef::Attack(0), FPS).unwrap();
    assert_eq!(ctx.group_len(), 2);
    ctx.apply(&mut items, 25.0, window(0.0, 20.0), FPS);
    assert!(items.attack[0].start_time <= 20.0);
    assert!(items.attack[1].start_time <= 20.0);
}

#[test]
fn test_moves_stay_relative_to_captured_bases() {
    let mut items = ItemSet {
        attack: vec![attack("A", 10.0)],
        buff: vec![],
    };
    let ctx = DragContext::capture(&items, ItemRef::Attack(0), FPS).unwrap();
    // Two successive moves of one gesture do not accumulate: each is
    // evaluated against the recorded base, like pointer deltas.
    ctx.apply(&mut items, 12.0, window(0.0, 60.0), FPS);
    ctx.apply(&mut items, 11.0, window(0.0, 60.0), FPS);
    assert_eq!(items.attack[0].start_time, 11.0);
}

#[test]
fn test_pointer_input_converts_pixels() {
    let items = ItemSet {
        attack: vec![attack("A", 10.0)],
        buff: vec![],
    };
    let ctx = DragContext::capture(&items, ItemRef::Attack(0), FPS).unwrap();
    // At 10 px/sec, dragging 32px left means 3.2 seconds later.
    let target = ctx
        .target_for(DragInput::Pointer {
            dx_px: -32.0,
            px_per_sec: 10.0,
        })
        .unwrap();
    assert!((target - 13.2).abs() < 1e-12);
    // An unavailable mapping turns the move into a no-op.
    assert!(
        ctx.target_for(DragInput::Pointer {
            dx_px: -32.0,
            px_per_sec: 0.0,
        })
        .is_none()
    );
    assert_eq!(ctx.target_for(DragInput::Absolute(42.0)), Some(42.0));
}

// ─────────────────────────────────────────────────────────────────────────────
// Timeline facade: sessions, typed commits, reset
// ─────────────────────────────────────────────────────────────────────────────

fn timeline() -> Timeline {
    let items = ItemSet {
        attack: vec![attack("A", 65.0), attack("A", 30.0)],
        buff: vec![buff("A", 65.0)],
    };
    Timeline::new(items, TimelineSettings::default())
}

#[test]
fn test_drag_session_lifecycle() {
    let mut tl = timeline();
    assert!(tl.start_drag(1, ItemRef::Attack(0)));

    let delta = tl
        .move_drag(
            1,
            DragInput::Pointer {
                dx_px: -30.0,
                px_per_sec: 10.0,
            },
        )
        .unwrap();
    assert_eq!(delta, 3.0);
    assert_eq!(tl.items().attack[0].start_time, 68.0);
    // The grouped buff moved with it.
    assert_eq!(tl.items().buff[0].start_time, 68.0);

    tl.end_drag(1);
    assert!(tl.move_drag(1, DragInput::Absolute(50.0)).is_none());
    // Cancellation semantics: items stay where the last move left them.
    assert_eq!(tl.items().attack[0].start_time, 68.0);
}

#[test]
fn test_move_without_start_is_noop() {
    let mut tl = timeline();
    assert!(tl.move_drag(7, DragInput::Absolute(50.0)).is_none());
    assert_eq!(tl.items().attack[0].start_time, 65.0);
}

#[test]
fn test_start_replaces_stale_context_for_pointer() {
    let mut tl = timeline();
    assert!(tl.start_drag(1, ItemRef::Attack(0)));
    // Same pointer starts again without an end: the old context is gone and
    // moves now affect the newly dragged item.
    assert!(tl.start_drag(1, ItemRef::Attack(1)));
    tl.move_drag(1, DragInput::Absolute(35.0));
    assert_eq!(tl.items().attack[0].start_time, 65.0);
    assert_eq!(tl.items().attack[1].start_time, 35.0);
}

#[test]
fn test_pointers_drag_independently() {
    let mut tl = timeline();
    assert!(tl.start_drag(1, ItemRef::Attack(0)));
    assert!(tl.start_drag(2, ItemRef::Attack(1)));
    tl.move_drag(2, DragInput::Absolute(35.0));
    tl.move_drag(1, DragInput::Absolute(66.0));
    assert_eq!(tl.items().attack[0].start_time, 66.0);
    assert_eq!(tl.items().attack[1].start_time, 35.0);
}

#[test]
fn test_bad_start_reference_is_rejected() {
    let mut tl = timeline();
    assert!(!tl.start_drag(1, ItemRef::Buff(5)));
    assert!(tl.move_drag(1, DragInput::Absolute(50.0)).is_none());
}

#[test]
fn test_commit_typed_time_moves_group() {
    let mut tl = timeline();
    let parsed = tl.commit_typed_time(ItemRef::Attack(0), "1:2.5").unwrap();
    assert_eq!(parsed.seconds, 62.5);
    assert_eq!(parsed.normalized, "01:02.500");
    assert_eq!(tl.items().attack[0].start_time, 62.5);
    // The same-frame buff follows a typed commit too.
    assert_eq!(tl.items().buff[0].start_time, 62.5);
    assert_eq!(tl.items().attack[1].start_time, 30.0);
}

#[test]
fn test_commit_clamps_into_window() {
    let mut tl = timeline();
    let window = tl.bounds();
    // A negative draft parses as zero by policy, then clamps to the window.
    let parsed = tl.commit_typed_time(ItemRef::Attack(0), "-5").unwrap();
    assert_eq!(parsed.seconds, 0.0);
    assert_eq!(parsed.normalized, "00:00.000");
    assert_eq!(tl.items().attack[0].start_time, window.min_time);
}

#[test]
fn test_unparsable_draft_changes_nothing() {
    let mut tl = timeline();
    assert!(tl.commit_typed_time(ItemRef::Attack(0), "not a time").is_none());
    assert!(tl.commit_typed_time(ItemRef::Attack(0), "").is_none());
    assert_eq!(tl.items().attack[0].start_time, 65.0);
    assert_eq!(tl.items().buff[0].start_time, 65.0);
}

#[test]
fn test_grouping_invariant_survives_any_gesture() {
    let mut tl = timeline();
    let fps = tl.settings().fps;
    let before = frame_of(tl.items().attack[0].start_time, fps);
    assert_eq!(frame_of(tl.items().buff[0].start_time, fps), before);

    tl.start_drag(1, ItemRef::Buff(0));
    tl.move_drag(
        1,
        DragInput::Pointer {
            dx_px: 123.0,
            px_per_sec: 7.0,
        },
    );
    tl.end_drag(1);
    tl.commit_typed_time(ItemRef::Attack(0), "0:47.3");

    let after = frame_of(tl.items().attack[0].start_time, fps);
    assert_eq!(frame_of(tl.items().buff[0].start_time, fps), after);
    assert_ne!(before, after);
}

#[test]
fn test_drag_respects_current_bounds() {
    let mut tl = timeline();
    let window = tl.bounds();
    tl.start_drag(1, ItemRef::Attack(0));
    tl.move_drag(1, DragInput::Absolute(window.max_time + 50.0));
    assert_eq!(tl.items().attack[0].start_time, window.max_time);
    tl.move_drag(1, DragInput::Absolute(window.min_time - 50.0));
    assert_eq!(tl.items().attack[0].start_time, window.min_time);
}

#[test]
fn test_reset_restores_pristine_items() {
    let mut tl = timeline();
    let original = tl.items().clone();
    tl.start_drag(1, ItemRef::Attack(0));
    tl.move_drag(1, DragInput::Absolute(40.0));
    tl.commit_typed_time(ItemRef::Attack(1), "0:5");
    assert_ne!(*tl.items(), original);

    tl.reset();
    assert_eq!(*tl.items(), original);
    // The in-flight gesture died with the reset.
    assert!(tl.move_drag(1, DragInput::Absolute(50.0)).is_none());
}

#[test]
fn test_bounds_match_pure_computation() {
    let tl = timeline();
    let expected = compute_bounds(tl.items(), &HashMap::new(), tl.settings());
    assert_eq!(tl.bounds(), expected);
}
