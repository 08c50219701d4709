//! Visible time window computation.
//!
//! The axis counts down toward zero: an item's activation is its rightmost
//! point and hits extend left as offsets below the start time. The window is
//! rounded outward to a ten-second grid. Whether the lower bound may go
//! negative to contain early lead-in hits is a settings switch.

use std::collections::HashMap;

use tactic_types::TimelineSettings;

use crate::events::{BuffItem, ItemSet};

/// The visible window in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub min_time: f64,
    pub max_time: f64,
}

impl TimeWindow {
    pub fn span(&self) -> f64 {
        self.max_time - self.min_time
    }
}

/// A buff's duration with the two-star gear multiplier applied when the
/// character's toggle is checked.
pub fn effective_duration(
    item: &BuffItem,
    ue2_checked: &HashMap<String, bool>,
    settings: &TimelineSettings,
) -> f64 {
    let checked = ue2_checked.get(&item.character).copied().unwrap_or(false);
    let multiplier = if checked {
        settings.ue2_duration_multiplier
    } else {
        1.0
    };
    item.duration * multiplier
}

/// Window from the extremes of both item lists.
///
/// `max_time` is the highest start time, ceilinged to the grid. `min_time`
/// is the lowest end value, floored to the grid, and additionally floored at
/// zero when the settings say so. With no items the seeds (max 0, min 600)
/// fall through, producing an inverted window that the mapper reports as
/// unavailable.
pub fn compute_bounds(
    items: &ItemSet,
    ue2_checked: &HashMap<String, bool>,
    settings: &TimelineSettings,
) -> TimeWindow {
    let mut max = 0.0_f64;
    let mut min = 600.0_f64;

    for item in &items.attack {
        max = max.max(item.start_time);
        let span = item.all_delays.last().copied().unwrap_or(0.0);
        min = min.min(item.start_time - span);
    }

    for item in &items.buff {
        max = max.max(item.start_time);
        let end = item.start_time - item.delay - effective_duration(item, ue2_checked, settings);
        min = min.min(end);
    }

    let max_time = (max / 10.0).ceil() * 10.0;
    let mut min_time = (min / 10.0).floor() * 10.0;
    if settings.clamp_min_time_at_zero {
        min_time = min_time.max(0.0);
    }

    TimeWindow { min_time, max_time }
}
