pub mod battle_log;
pub mod events;
pub mod roster;
pub mod timeline;

// Re-exports for convenience
pub use battle_log::{LogEntry, tokenize};
pub use events::{AttackItem, BuffItem, ItemRef, ItemSet, build_items};
pub use roster::{Character, Role, Roster, RosterError, Skill, SkillResolver};
pub use timeline::Timeline;
