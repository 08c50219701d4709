//! Seconds to pixel mapping for the timeline view.
//!
//! Time flows right to left: a larger start time sits closer to the left
//! content edge. A degenerate window or viewport makes the mapping
//! unavailable, and every conversion then reports `None` or zero instead of
//! dividing.

use std::collections::HashMap;

use tactic_types::TimelineSettings;

use super::bounds::{TimeWindow, effective_duration};
use crate::events::{AttackItem, BuffItem};

/// Mapping between elapsed seconds and horizontal pixels for one viewport.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    window: TimeWindow,
    viewport_width_px: f64,
    width_mult: f64,
}

impl CoordinateMapper {
    pub fn new(window: TimeWindow, viewport_width_px: f64, width_mult: f64) -> Self {
        Self {
            window,
            viewport_width_px,
            width_mult,
        }
    }

    /// Pixels per second of zoomed content, or 0 when the mapping is
    /// unavailable. Callers must treat 0 as "no mapping", never divide.
    pub fn px_per_sec(&self) -> f64 {
        let span = self.window.span();
        if span <= 0.0 || self.viewport_width_px <= 0.0 {
            return 0.0;
        }
        self.width_mult * self.viewport_width_px / span
    }

    pub fn is_available(&self) -> bool {
        self.px_per_sec() > 0.0
    }

    /// Left offset of an activation as a fraction of the zoomed content
    /// width.
    pub fn left_fraction(&self, start_time: f64) -> f64 {
        let span = self.window.span();
        if span <= 0.0 {
            return 0.0;
        }
        self.width_mult * (self.window.max_time - start_time) / span
    }

    /// Width of a block covering `extent_secs` as a fraction of the zoomed
    /// content width.
    pub fn width_fraction(&self, extent_secs: f64) -> f64 {
        let span = self.window.span();
        if span <= 0.0 {
            return 0.0;
        }
        self.width_mult * extent_secs / span
    }

    /// Horizontal extent of an attack block: the span to its last hit.
    pub fn attack_extent(item: &AttackItem) -> f64 {
        item.all_delays.last().copied().unwrap_or(0.0)
    }

    /// Horizontal extent of a buff block: application delay plus the
    /// (possibly gear-scaled) effect duration.
    pub fn buff_extent(
        item: &BuffItem,
        ue2_checked: &HashMap<String, bool>,
        settings: &TimelineSettings,
    ) -> f64 {
        item.delay + effective_duration(item, ue2_checked, settings)
    }

    /// Content-space pixel position of a point in time.
    pub fn time_to_px(&self, time: f64) -> f64 {
        (self.window.max_time - time) * self.px_per_sec()
    }

    /// Time at a content-space pixel position.
    pub fn px_to_time(&self, px: f64) -> Option<f64> {
        let pps = self.px_per_sec();
        if pps <= 0.0 {
            return None;
        }
        Some(self.window.max_time - px / pps)
    }

    /// Drag delta in seconds for an accumulated pixel delta. Dragging right
    /// moves toward smaller times, hence the sign flip.
    pub fn delta_sec(&self, dx_px: f64) -> Option<f64> {
        let pps = self.px_per_sec();
        if pps <= 0.0 {
            return None;
        }
        Some(-dx_px / pps)
    }

    /// Axis label time at a viewport-relative ratio, given the current
    /// horizontal scroll. Feeds the tick labels along the top of the view.
    pub fn time_at_ratio(&self, scroll_left_px: f64, ratio: f64) -> Option<f64> {
        let span = self.window.span();
        if span <= 0.0 || self.viewport_width_px <= 0.0 || self.width_mult <= 0.0 {
            return None;
        }
        let content_px = scroll_left_px + self.viewport_width_px * ratio;
        Some(self.window.max_time - span * content_px / (self.viewport_width_px * self.width_mult))
    }
}
