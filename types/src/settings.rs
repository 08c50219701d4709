//! Timeline engine settings.
//!
//! Shared between the engine and its hosts so that a persisted settings file
//! fully determines snapping, zoom, and window behavior.

use serde::{Deserialize, Serialize};

/// Zoom factors below this render less than one viewport of content and are
/// rejected by [`TimelineSettings::effective_width_mult`].
pub const MIN_WIDTH_MULT: f64 = 1.0;

/// Tunable behavior of the timeline engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSettings {
    /// Frame rate used for drag snapping and simultaneity grouping.
    pub fps: f64,
    /// Duration multiplier applied to support skills of characters whose
    /// two-star unique gear toggle is checked.
    pub ue2_duration_multiplier: f64,
    /// When set, the visible window's lower bound never goes below zero,
    /// even if an early lead-in hit extends past it.
    pub clamp_min_time_at_zero: bool,
    /// Horizontal zoom: content width as a multiple of the viewport width.
    pub width_mult: f64,
    /// Number of divisions the time axis is split into for tick labels.
    pub time_zone_num: u32,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            fps: 30.0,
            ue2_duration_multiplier: 1.5,
            clamp_min_time_at_zero: false,
            width_mult: 1.0,
            time_zone_num: 6,
        }
    }
}

impl TimelineSettings {
    /// Zoom factor with the lower bound enforced.
    pub fn effective_width_mult(&self) -> f64 {
        self.width_mult.max(MIN_WIDTH_MULT)
    }
}
