//! Frame-snapped, grouped item movement.
//!
//! A gesture captures the dragged item's simultaneity group at start: every
//! item of the same character whose start time rounds to the same frame.
//! Each move snaps the leader's target to the frame grid, clamps it to the
//! visible window, and translates the whole group by the realized delta.
//! Members snap and clamp individually, so one already at a boundary stays
//! there even when the leader can still move.

use super::bounds::TimeWindow;
use crate::events::{ItemRef, ItemSet};

/// Round to the nearest frame boundary.
pub fn snap_to_frame(sec: f64, fps: f64) -> f64 {
    (sec * fps).round() / fps
}

/// Discrete frame number of a point in time.
pub fn frame_of(sec: f64, fps: f64) -> i64 {
    (sec * fps).round() as i64
}

pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

/// How a move target is expressed.
#[derive(Debug, Clone, Copy)]
pub enum DragInput {
    /// Accumulated pointer delta since drag start, with the current mapping
    /// scale. A non-positive scale makes the move a no-op.
    Pointer { dx_px: f64, px_per_sec: f64 },
    /// An absolute target time, as committed from a typed draft.
    Absolute(f64),
}

/// Ephemeral state of one gesture, captured at drag start and discarded at
/// drag end. Holds the recorded base start times of every group member so
/// repeated moves stay relative to the original positions.
#[derive(Debug, Clone)]
pub struct DragContext {
    pub item: ItemRef,
    pub character: String,
    pub base_frame: i64,
    pub base_start_time: f64,
    attack_bases: Vec<(usize, f64)>,
    buff_bases: Vec<(usize, f64)>,
}

impl DragContext {
    /// Capture the simultaneity group for the given item. Returns `None` if
    /// the reference is stale.
    pub fn capture(items: &ItemSet, item: ItemRef, fps: f64) -> Option<Self> {
        let (character, base_start_time) = match item {
            ItemRef::Attack(i) => {
                let it = items.attack.get(i)?;
                (it.character.clone(), it.start_time)
            }
            ItemRef::Buff(i) => {
                let it = items.buff.get(i)?;
                (it.character.clone(), it.start_time)
            }
        };
        let base_frame = frame_of(base_start_time, fps);

        let attack_bases = items
            .attack
            .iter()
            .enumerate()
            .filter(|(_, it)| it.character == character && frame_of(it.start_time, fps) == base_frame)
            .map(|(i, it)| (i, it.start_time))
            .collect();
        let buff_bases = items
            .buff
            .iter()
            .enumerate()
            .filter(|(_, it)| it.character == character && frame_of(it.start_time, fps) == base_frame)
            .map(|(i, it)| (i, it.start_time))
            .collect();

        Some(Self {
            item,
            character,
            base_frame,
            base_start_time,
            attack_bases,
            buff_bases,
        })
    }

    /// Number of items moving with this gesture, the dragged one included.
    pub fn group_len(&self) -> usize {
        self.attack_bases.len() + self.buff_bases.len()
    }

    /// Resolve the leader's unclamped target time for a move, or `None` when
    /// the mapping is unavailable.
    pub fn target_for(&self, input: DragInput) -> Option<f64> {
        match input {
            DragInput::Pointer { dx_px, px_per_sec } => {
                if px_per_sec <= 0.0 {
                    return None;
                }
                Some(self.base_start_time - dx_px / px_per_sec)
            }
            DragInput::Absolute(sec) => Some(sec),
        }
    }

    /// Apply a move: snap and clamp the leader target, then translate every
    /// captured member by the realized delta. Returns that delta.
    pub fn apply(&self, items: &mut ItemSet, target_sec: f64, window: TimeWindow, fps: f64) -> f64 {
        let snapped = snap_to_frame(target_sec, fps);
        let clamped = clamp(snapped, window.min_time, window.max_time);
        let actual_delta = clamped - self.base_start_time;

        for &(i, base) in &self.attack_bases {
            if let Some(item) = items.attack.get_mut(i) {
                item.start_time = clamp(
                    snap_to_frame(base + actual_delta, fps),
                    window.min_time,
                    window.max_time,
                );
            }
        }
        for &(i, base) in &self.buff_bases {
            if let Some(item) = items.buff.get_mut(i) {
                item.start_time = clamp(
                    snap_to_frame(base + actual_delta, fps),
                    window.min_time,
                    window.max_time,
                );
            }
        }

        actual_delta
    }
}
