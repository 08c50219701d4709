//! Tooltip selection state machine.
//!
//! Hover shows a tooltip, click locks it open, clicking the locked item or
//! pressing down anywhere else releases it. Content is derived from live
//! item data at read time, so it tracks the item through a drag.

use std::collections::HashMap;

use tactic_types::TimelineSettings;
use tactic_types::formatting::format_timecode;

use super::bounds::effective_duration;
use crate::events::{ItemRef, ItemSet};

/// Which item's detail tooltip is showing, and whether it is locked open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Hidden,
    Shown(ItemRef),
    Locked(ItemRef),
}

impl Selection {
    /// The item whose tooltip is currently visible, if any.
    pub fn visible_item(&self) -> Option<ItemRef> {
        match *self {
            Selection::Hidden => None,
            Selection::Shown(item) | Selection::Locked(item) => Some(item),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Selection::Locked(_))
    }

    /// Pointer entered an item. Hovering a different item while locked
    /// releases the lock.
    pub fn hover_enter(&mut self, item: ItemRef) {
        match *self {
            Selection::Locked(current) if current == item => {}
            _ => *self = Selection::Shown(item),
        }
    }

    /// Pointer left the hovered item.
    pub fn hover_leave(&mut self) {
        if !self.is_locked() {
            *self = Selection::Hidden;
        }
    }

    /// Click toggles the lock on an item.
    pub fn click(&mut self, item: ItemRef) {
        *self = match *self {
            Selection::Locked(current) if current == item => Selection::Hidden,
            _ => Selection::Locked(item),
        };
    }

    /// Pointer went down outside every item.
    pub fn pointer_down_outside(&mut self) {
        if self.is_locked() {
            *self = Selection::Hidden;
        }
    }
}

/// Tooltip body for the currently selected item, all times pre-formatted.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipContent {
    Attack {
        character: String,
        detail: String,
        start_time: String,
        /// Absolute time of every hit, activation offsets applied.
        hit_times: Vec<String>,
    },
    Buff {
        character: String,
        detail: String,
        start_time: String,
        /// When the effect applies and when it runs out.
        active_from: String,
        active_until: String,
        /// Gear-scaled duration in seconds.
        duration_secs: f64,
    },
}

/// Derive tooltip content from live item data, or `None` when nothing is
/// selected or the selection went stale.
pub fn tooltip_content(
    items: &ItemSet,
    selection: Selection,
    ue2_checked: &HashMap<String, bool>,
    settings: &TimelineSettings,
) -> Option<TooltipContent> {
    match selection.visible_item()? {
        ItemRef::Attack(i) => {
            let item = items.attack.get(i)?;
            Some(TooltipContent::Attack {
                character: item.character.clone(),
                detail: item.detail.clone(),
                start_time: format_timecode(item.start_time),
                hit_times: item
                    .all_delays
                    .iter()
                    .map(|delay| format_timecode(item.start_time - delay))
                    .collect(),
            })
        }
        ItemRef::Buff(i) => {
            let item = items.buff.get(i)?;
            let duration_secs = effective_duration(item, ue2_checked, settings);
            let applied = item.start_time - item.delay;
            Some(TooltipContent::Buff {
                character: item.character.clone(),
                detail: item.detail.clone(),
                start_time: format_timecode(item.start_time),
                active_from: format_timecode(applied),
                active_until: format_timecode(applied - duration_secs),
                duration_secs,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{AttackItem, BuffItem};

    const A0: ItemRef = ItemRef::Attack(0);
    const A1: ItemRef = ItemRef::Attack(1);
    const B0: ItemRef = ItemRef::Buff(0);

    #[test]
    fn test_hover_shows_and_hides() {
        let mut sel = Selection::default();
        sel.hover_enter(A0);
        assert_eq!(sel, Selection::Shown(A0));
        sel.hover_leave();
        assert_eq!(sel, Selection::Hidden);
    }

    #[test]
    fn test_click_locks_and_toggles() {
        let mut sel = Selection::default();
        sel.click(A0);
        assert_eq!(sel, Selection::Locked(A0));
        // Leaving while locked keeps the tooltip open.
        sel.hover_leave();
        assert_eq!(sel, Selection::Locked(A0));
        // Clicking the locked item again releases it.
        sel.click(A0);
        assert_eq!(sel, Selection::Hidden);
    }

    #[test]
    fn test_click_other_item_moves_lock() {
        let mut sel = Selection::default();
        sel.click(A0);
        sel.click(B0);
        assert_eq!(sel, Selection::Locked(B0));
    }

    #[test]
    fn test_hover_other_item_releases_lock() {
        let mut sel = Selection::default();
        sel.click(A0);
        sel.hover_enter(A1);
        assert_eq!(sel, Selection::Shown(A1));
        // Hovering the locked item itself changes nothing.
        sel.click(A1);
        sel.hover_enter(A1);
        assert_eq!(sel, Selection::Locked(A1));
    }

    #[test]
    fn test_pointer_down_outside_unlocks() {
        let mut sel = Selection::default();
        sel.click(A0);
        sel.pointer_down_outside();
        assert_eq!(sel, Selection::Hidden);
        // Without a lock it is a no-op.
        sel.hover_enter(A0);
        sel.pointer_down_outside();
        assert_eq!(sel, Selection::Shown(A0));
    }

    fn items() -> ItemSet {
        ItemSet {
            attack: vec![AttackItem {
                start_time: 60.0,
                character: "A".into(),
                detail: "EX".into(),
                all_delays: vec![0.5, 1.0],
            }],
            buff: vec![BuffItem {
                start_time: 30.0,
                delay: 2.0,
                duration: 10.0,
                character: "S".into(),
                detail: "A".into(),
                ue2: true,
            }],
        }
    }

    #[test]
    fn test_attack_tooltip_lists_hit_times() {
        let items = items();
        let settings = TimelineSettings::default();
        let content =
            tooltip_content(&items, Selection::Shown(A0), &HashMap::new(), &settings).unwrap();
        let TooltipContent::Attack {
            character,
            start_time,
            hit_times,
            ..
        } = content
        else {
            panic!("expected attack tooltip");
        };
        assert_eq!(character, "A");
        assert_eq!(start_time, "01:00.000");
        assert_eq!(hit_times, vec!["00:59.500", "00:59.000"]);
    }

    #[test]
    fn test_buff_tooltip_scales_duration() {
        let items = items();
        let settings = TimelineSettings::default();
        let checked = HashMap::from([("S".to_string(), true)]);
        let content = tooltip_content(&items, Selection::Locked(B0), &checked, &settings).unwrap();
        let TooltipContent::Buff {
            active_from,
            active_until,
            duration_secs,
            ..
        } = content
        else {
            panic!("expected buff tooltip");
        };
        assert_eq!(duration_secs, 15.0);
        assert_eq!(active_from, "00:28.000");
        assert_eq!(active_until, "00:13.000");
    }

    #[test]
    fn test_tooltip_tracks_live_item_data() {
        let mut items = items();
        let settings = TimelineSettings::default();
        items.attack[0].start_time = 45.0;
        let content =
            tooltip_content(&items, Selection::Shown(A0), &HashMap::new(), &settings).unwrap();
        let TooltipContent::Attack { start_time, .. } = content else {
            panic!("expected attack tooltip");
        };
        assert_eq!(start_time, "00:45.000");
    }

    #[test]
    fn test_stale_selection_yields_nothing() {
        let items = items();
        let settings = TimelineSettings::default();
        assert!(
            tooltip_content(
                &items,
                Selection::Shown(ItemRef::Attack(9)),
                &HashMap::new(),
                &settings
            )
            .is_none()
        );
        assert!(
            tooltip_content(&items, Selection::Hidden, &HashMap::new(), &settings).is_none()
        );
    }
}
