//! Display lane assignment.
//!
//! Each distinct `(character, detail)` pair gets one horizontal lane,
//! ordered by first appearance scanning attack items then buff items. Lanes
//! are a pure function of the item lists and are recomputed whenever either
//! list changes.

use std::collections::HashSet;

use crate::events::ItemSet;

/// Key identifying one lane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LaneKey {
    pub character: String,
    pub detail: String,
}

/// Ordered distinct lane keys for the current items.
pub fn compute_lanes(items: &ItemSet) -> Vec<LaneKey> {
    let mut seen = HashSet::new();
    let mut lanes = Vec::new();

    let keys = items
        .attack
        .iter()
        .map(|item| (&item.character, &item.detail))
        .chain(items.buff.iter().map(|item| (&item.character, &item.detail)));

    for (character, detail) in keys {
        if seen.insert((character.clone(), detail.clone())) {
            lanes.push(LaneKey {
                character: character.clone(),
                detail: detail.clone(),
            });
        }
    }

    lanes
}

/// Lane position of a `(character, detail)` pair, if it has one.
pub fn lane_index(lanes: &[LaneKey], character: &str, detail: &str) -> Option<usize> {
    lanes
        .iter()
        .position(|lane| lane.character == character && lane.detail == detail)
}
