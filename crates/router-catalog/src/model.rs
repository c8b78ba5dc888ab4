use indexmap::IndexMap;
use serde::Deserialize;

/// A named, documentation-backed capability unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub description: String,
    /// Relative location of this skill's `SKILL.md`, resolved against a skills root.
    pub path: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// A named, user-intent-labeled bundle of skills, activated by trigger phrases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Task {
    pub description: String,
    pub triggers: Vec<String>,
    pub skills: Vec<String>,
}

/// A documentation-only grouping of tasks/skills. Never participates in routing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// The raw, unvalidated shape a catalog file deserializes into.
///
/// `tasks` and `categories` are optional sections; `skills` is required and
/// its absence is reported as [`crate::CatalogError::MissingSection`] rather
/// than relying on serde's own "missing field" message.
#[derive(Debug, Default, Deserialize)]
pub struct RawCatalog {
    pub skills: Option<IndexMap<String, Skill>>,
    #[serde(default)]
    pub tasks: IndexMap<String, Task>,
    #[serde(default)]
    pub categories: IndexMap<String, Category>,
}

/// A validated, cross-referenced catalog. Immutable after construction —
/// reloads produce a new `Catalog` and swap the snapshot atomically at a
/// higher layer, they never mutate one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub skills: IndexMap<String, Skill>,
    pub tasks: IndexMap<String, Task>,
    pub categories: IndexMap<String, Category>,
}

impl Catalog {
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    pub fn has_task(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }
}
