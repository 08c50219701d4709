//! Event building: parsed log entries to typed timeline items.
//!
//! Each entry is tried against both roles. An entry can legitimately produce
//! an attack item and a buff item at once when the character has skills for
//! both roles under the same token. Entries that fail resolution or target
//! validation are dropped quietly; noisy logs are expected.

use tracing::debug;

use tactic_types::formatting::parse_timecode;

use crate::battle_log::LogEntry;
use crate::roster::{Role, SkillResolver};

/// A timed attack activation. Only `start_time` is mutable after
/// construction; everything else describes the skill.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackItem {
    /// Activation time in seconds. Hits land at `start_time - delay`.
    pub start_time: f64,
    /// Canonical character name.
    pub character: String,
    /// Opaque label used for lane keys and tooltips.
    pub detail: String,
    /// Per-hit offsets from activation; the last entry is the skill's span.
    pub all_delays: Vec<f64>,
}

/// A timed support activation.
#[derive(Debug, Clone, PartialEq)]
pub struct BuffItem {
    /// Activation time in seconds.
    pub start_time: f64,
    /// Seconds from activation until the effect applies.
    pub delay: f64,
    /// Base effect duration in seconds.
    pub duration: f64,
    /// Canonical character name.
    pub character: String,
    /// Opaque label used for lane keys and tooltips.
    pub detail: String,
    /// Whether the character can carry two-star unique gear.
    pub ue2: bool,
}

/// The two item lists the engine operates on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSet {
    pub attack: Vec<AttackItem>,
    pub buff: Vec<BuffItem>,
}

impl ItemSet {
    pub fn is_empty(&self) -> bool {
        self.attack.is_empty() && self.buff.is_empty()
    }
}

/// Index into one of the two item lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Attack(usize),
    Buff(usize),
}

/// Build both item lists from tokenized log entries.
pub fn build_items(entries: &[LogEntry], resolver: &SkillResolver) -> ItemSet {
    let mut items = ItemSet::default();

    for entry in entries {
        let Some(start_time) = parse_timecode(&entry.time) else {
            debug!(time = %entry.time, "unreadable timestamp, entry dropped");
            continue;
        };

        let attack = attack_item(entry, resolver, start_time);
        let buff = buff_item(entry, resolver, start_time);
        if attack.is_none() && buff.is_none() {
            debug!(character = %entry.character, kind = ?entry.kind, "entry resolved to no items");
        }
        items.attack.extend(attack);
        items.buff.extend(buff);
    }

    items
}

fn attack_item(
    entry: &LogEntry,
    resolver: &SkillResolver,
    start_time: f64,
) -> Option<AttackItem> {
    let resolved = resolver.resolve(&entry.character, entry.kind.as_deref(), Role::Attacker)?;
    // A named target must be a known enemy.
    if let Some(target) = &entry.target {
        if !resolver.is_enemy(target) {
            debug!(character = %entry.character, target = %target, "unknown enemy target, attack dropped");
            return None;
        }
    }
    Some(AttackItem {
        start_time,
        character: resolved.character.name.clone(),
        detail: resolved.skill.kind.clone(),
        all_delays: resolved.skill.delays.clone(),
    })
}

fn buff_item(entry: &LogEntry, resolver: &SkillResolver, start_time: f64) -> Option<BuffItem> {
    let resolved = resolver.resolve(&entry.character, entry.kind.as_deref(), Role::Supporter)?;
    // A named target must resolve to a character that can attack; the buff
    // label shows the canonical target when one is given, else the skill.
    let detail = match &entry.target {
        Some(target) => match resolver.attacker_target(target) {
            Some(name) => name.to_string(),
            None => {
                debug!(character = %entry.character, target = %target, "target cannot attack, buff dropped");
                return None;
            }
        },
        None => resolved.skill.kind.clone(),
    };
    Some(BuffItem {
        start_time,
        delay: resolved.skill.delays.first().copied().unwrap_or(0.0),
        duration: resolved.skill.duration,
        character: resolved.character.name.clone(),
        detail,
        ue2: resolved.character.ue2,
    })
}
