//! Character, skill, and enemy reference data.
//!
//! The roster is loaded once from JSON tables and treated as immutable.
//! Alias lookups go through [`SkillResolver`], which indexes the tables at
//! load time so resolution stays a pure lookup.

mod loader;
mod resolver;

use serde::{Deserialize, Serialize};

pub use loader::{RosterError, default_data_dir, load_roster};
pub use resolver::{DEFAULT_SKILL_KIND, ResolvedSkill, SkillResolver};

use crate::battle_log::LogEntry;

/// Which of a character's capabilities a skill token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "attack")]
    Attacker,
    #[serde(rename = "support")]
    Supporter,
}

/// One skill definition. Order within a character matters: the first skill
/// matching a token and role wins resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    /// Canonical type token (`EX`, `2타`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Alternate tokens that resolve to this skill.
    #[serde(default)]
    pub alias: Vec<String>,
    /// Roles this skill can fill.
    #[serde(default)]
    pub role: Vec<Role>,
    /// Seconds from activation for each hit, non-decreasing; the last entry
    /// is the total span of the skill.
    #[serde(default)]
    pub delays: Vec<f64>,
    /// Effect duration in seconds, meaningful for support skills.
    #[serde(default)]
    pub duration: f64,
}

/// A playable character with its alias set and skill list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub alias: Vec<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Whether two-star unique gear is available, enabling the alternate
    /// duration multiplier on this character's support skills.
    #[serde(rename = "UE2", default)]
    pub ue2: bool,
}

impl Character {
    /// Whether any of this character's skills can fill the attacker role.
    pub fn has_attacker_skill(&self) -> bool {
        self.skills
            .iter()
            .any(|skill| skill.role.contains(&Role::Attacker))
    }
}

/// The full reference dataset: characters plus the flat enemy name list.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub characters: Vec<Character>,
    pub enemies: Vec<String>,
}

/// Canonical names of roster characters that appear in the parsed log,
/// in roster order. Only exact canonical-name mentions count; alias
/// mentions resolve later through the event builder.
pub fn used_roster_names(roster: &Roster, entries: &[LogEntry]) -> Vec<String> {
    roster
        .characters
        .iter()
        .filter(|character| entries.iter().any(|e| e.character == character.name))
        .map(|character| character.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_deserializes_from_table_json() {
        let json = r#"
        {
            "name": "Mika",
            "alias": ["미카"],
            "UE2": true,
            "skills": [
                {
                    "type": "EX",
                    "alias": ["이피"],
                    "role": ["attack"],
                    "delays": [0.5, 1.0],
                    "duration": 0
                }
            ]
        }"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.name, "Mika");
        assert!(character.ue2);
        assert_eq!(character.skills[0].kind, "EX");
        assert_eq!(character.skills[0].role, vec![Role::Attacker]);
        assert!(character.has_attacker_skill());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{ "name": "Aru", "skills": [{ "type": "EX" }] }"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert!(!character.ue2);
        assert!(character.alias.is_empty());
        assert!(character.skills[0].delays.is_empty());
        assert_eq!(character.skills[0].duration, 0.0);
        assert!(!character.has_attacker_skill());
    }

    #[test]
    fn test_used_roster_names_order_and_exactness() {
        let roster = Roster {
            characters: vec![
                Character {
                    name: "Aru".into(),
                    alias: vec!["아루".into()],
                    skills: vec![],
                    ue2: false,
                },
                Character {
                    name: "Mika".into(),
                    alias: vec![],
                    skills: vec![],
                    ue2: false,
                },
            ],
            enemies: vec![],
        };
        let entries = vec![
            LogEntry {
                time: "00:10.000".into(),
                character: "Mika".into(),
                kind: None,
                target: None,
            },
            // Alias mention does not count here.
            LogEntry {
                time: "00:20.000".into(),
                character: "아루".into(),
                kind: None,
                target: None,
            },
        ];
        assert_eq!(used_roster_names(&roster, &entries), vec!["Mika"]);
    }
}
