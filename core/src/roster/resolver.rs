//! Alias-chain resolution of characters and skills.
//!
//! All token maps are built once per roster load; resolution afterwards is a
//! pure lookup with no scanning, so results cannot depend on query order.

use hashbrown::{HashMap, HashSet};

use super::{Character, Role, Roster, Skill};

/// Sentinel type token used when a log entry carries no type.
pub const DEFAULT_SKILL_KIND: &str = "EX";

/// A successful resolution: the canonical character and the specific skill
/// that matched the token under the requested role.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSkill<'a> {
    pub character: &'a Character,
    pub skill: &'a Skill,
}

/// Token index for one character: skill token to skill position, per role.
/// Skills are inserted in dataset order with first-wins semantics, so the
/// original skill ordering decides ambiguous tokens.
#[derive(Debug, Default)]
struct SkillTable<'a> {
    attacker: HashMap<&'a str, usize>,
    supporter: HashMap<&'a str, usize>,
}

impl<'a> SkillTable<'a> {
    fn for_role(&self, role: Role) -> &HashMap<&'a str, usize> {
        match role {
            Role::Attacker => &self.attacker,
            Role::Supporter => &self.supporter,
        }
    }

    fn for_role_mut(&mut self, role: Role) -> &mut HashMap<&'a str, usize> {
        match role {
            Role::Attacker => &mut self.attacker,
            Role::Supporter => &mut self.supporter,
        }
    }
}

/// Prebuilt lookup over an immutable roster.
#[derive(Debug)]
pub struct SkillResolver<'a> {
    roster: &'a Roster,
    /// Character token (name or alias) to character position. First
    /// definition wins on duplicate tokens.
    characters: HashMap<&'a str, usize>,
    skills: Vec<SkillTable<'a>>,
    enemies: HashSet<&'a str>,
}

impl<'a> SkillResolver<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        let mut characters = HashMap::new();
        let mut skills = Vec::with_capacity(roster.characters.len());

        for (idx, character) in roster.characters.iter().enumerate() {
            characters.entry(character.name.as_str()).or_insert(idx);
            for alias in &character.alias {
                characters.entry(alias.as_str()).or_insert(idx);
            }

            let mut table = SkillTable::default();
            for (pos, skill) in character.skills.iter().enumerate() {
                for &role in &skill.role {
                    let index = table.for_role_mut(role);
                    index.entry(skill.kind.as_str()).or_insert(pos);
                    for alias in &skill.alias {
                        index.entry(alias.as_str()).or_insert(pos);
                    }
                }
            }
            skills.push(table);
        }

        let enemies = roster.enemies.iter().map(String::as_str).collect();

        Self {
            roster,
            characters,
            skills,
            enemies,
        }
    }

    /// Resolve a character token plus an optional type token to a skill that
    /// can fill `role`. A missing type token falls back to the
    /// [`DEFAULT_SKILL_KIND`] sentinel. Matching is exact; no case folding.
    pub fn resolve(
        &self,
        token: &str,
        kind: Option<&str>,
        role: Role,
    ) -> Option<ResolvedSkill<'a>> {
        let idx = *self.characters.get(token)?;
        let kind = kind.unwrap_or(DEFAULT_SKILL_KIND);
        let pos = *self.skills[idx].for_role(role).get(kind)?;
        let character = &self.roster.characters[idx];
        Some(ResolvedSkill {
            character,
            skill: &character.skills[pos],
        })
    }

    /// Whether a target token names a known enemy.
    pub fn is_enemy(&self, name: &str) -> bool {
        self.enemies.contains(name)
    }

    /// Resolve a target token to the canonical name of a character that owns
    /// at least one attacker-role skill.
    pub fn attacker_target(&self, token: &str) -> Option<&'a str> {
        let idx = *self.characters.get(token)?;
        let character = &self.roster.characters[idx];
        character
            .has_attacker_skill()
            .then_some(character.name.as_str())
    }
}
