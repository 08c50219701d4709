//! Timeline session state and interaction.
//!
//! [`Timeline`] owns the editable item lists plus the ephemeral interaction
//! state (drag gestures keyed by pointer id, tooltip selection, per-character
//! gear toggles). Lanes and bounds are pure functions of the items and are
//! recomputed on demand. All mutation goes through the drag/commit engine;
//! only item start times ever change.

mod bounds;
mod drag;
mod lanes;
mod mapper;
mod selection;

#[cfg(test)]
mod drag_tests;

pub use bounds::{TimeWindow, compute_bounds, effective_duration};
pub use drag::{DragContext, DragInput, clamp, frame_of, snap_to_frame};
pub use lanes::{LaneKey, compute_lanes, lane_index};
pub use mapper::CoordinateMapper;
pub use selection::{Selection, TooltipContent, tooltip_content};

use std::collections::HashMap;

use tactic_types::TimelineSettings;
use tactic_types::formatting::{FreeformTime, parse_freeform_time};

use crate::events::{ItemRef, ItemSet};

/// One editing session over a pair of item lists.
#[derive(Debug)]
pub struct Timeline {
    items: ItemSet,
    /// The originally supplied lists, kept for reset.
    pristine: ItemSet,
    settings: TimelineSettings,
    ue2_checked: HashMap<String, bool>,
    selection: Selection,
    /// Active gestures by pointer id. Gestures are independent; a new start
    /// for the same pointer replaces any stale context.
    drags: HashMap<u32, DragContext>,
}

impl Timeline {
    pub fn new(items: ItemSet, settings: TimelineSettings) -> Self {
        Self {
            pristine: items.clone(),
            items,
            settings,
            ue2_checked: HashMap::new(),
            selection: Selection::default(),
            drags: HashMap::new(),
        }
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    pub fn start_time_of(&self, item: ItemRef) -> Option<f64> {
        match item {
            ItemRef::Attack(i) => self.items.attack.get(i).map(|it| it.start_time),
            ItemRef::Buff(i) => self.items.buff.get(i).map(|it| it.start_time),
        }
    }

    /// Ordered display lanes for the current items.
    pub fn lanes(&self) -> Vec<LaneKey> {
        compute_lanes(&self.items)
    }

    /// Visible window for the current items and gear toggles.
    pub fn bounds(&self) -> TimeWindow {
        compute_bounds(&self.items, &self.ue2_checked, &self.settings)
    }

    /// Pixel mapping for a viewport width at the configured zoom.
    pub fn mapper(&self, viewport_width_px: f64) -> CoordinateMapper {
        CoordinateMapper::new(
            self.bounds(),
            viewport_width_px,
            self.settings.effective_width_mult(),
        )
    }

    /// Toggle the two-star gear multiplier for a character.
    pub fn set_ue2_checked(&mut self, character: &str, checked: bool) {
        if checked {
            self.ue2_checked.insert(character.to_string(), true);
        } else {
            self.ue2_checked.remove(character);
        }
    }

    pub fn ue2_checked(&self) -> &HashMap<String, bool> {
        &self.ue2_checked
    }

    /// Begin a gesture on an item. Returns false when the reference is
    /// stale. Any earlier context for the same pointer is discarded.
    pub fn start_drag(&mut self, pointer_id: u32, item: ItemRef) -> bool {
        self.drags.remove(&pointer_id);
        match DragContext::capture(&self.items, item, self.settings.fps) {
            Some(ctx) => {
                self.drags.insert(pointer_id, ctx);
                true
            }
            None => false,
        }
    }

    /// Apply a move for an active gesture. Returns the realized delta in
    /// seconds, or `None` when there is no gesture or no usable mapping.
    pub fn move_drag(&mut self, pointer_id: u32, input: DragInput) -> Option<f64> {
        let window = self.bounds();
        let fps = self.settings.fps;
        let ctx = self.drags.get(&pointer_id)?;
        let target = ctx.target_for(input)?;
        Some(ctx.apply(&mut self.items, target, window, fps))
    }

    /// Finish a gesture. Items stay wherever the last move left them.
    pub fn end_drag(&mut self, pointer_id: u32) {
        self.drags.remove(&pointer_id);
    }

    /// Commit a typed time draft for an item. The draft is parsed leniently;
    /// on success the item's simultaneity group moves with it, exactly like
    /// a drag. Returns the parsed draft (with its normalized rendering) or
    /// `None` when the text does not parse, in which case nothing moves.
    pub fn commit_typed_time(&mut self, item: ItemRef, text: &str) -> Option<FreeformTime> {
        let parsed = parse_freeform_time(text)?;
        let window = self.bounds();
        let fps = self.settings.fps;
        let ctx = DragContext::capture(&self.items, item, fps)?;
        ctx.apply(&mut self.items, parsed.seconds, window, fps);
        Some(parsed)
    }

    /// Throw away all edits and restore the originally supplied lists.
    /// In-flight gestures are dropped with them.
    pub fn reset(&mut self) {
        self.items = self.pristine.clone();
        self.drags.clear();
    }

    // ─── Tooltip selection ───────────────────────────────────────────────

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn hover_enter(&mut self, item: ItemRef) {
        self.selection.hover_enter(item);
    }

    pub fn hover_leave(&mut self) {
        self.selection.hover_leave();
    }

    pub fn click(&mut self, item: ItemRef) {
        self.selection.click(item);
    }

    pub fn pointer_down_outside(&mut self) {
        self.selection.pointer_down_outside();
    }

    /// Tooltip body for the current selection, derived from live item data.
    pub fn tooltip(&self) -> Option<TooltipContent> {
        tooltip_content(&self.items, self.selection, &self.ue2_checked, &self.settings)
    }
}
