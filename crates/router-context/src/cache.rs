use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::content::{load_skill_content, ContentWarning};

/// Caches skill documentation reads, keyed by resolved path. Must be
/// invalidated whenever the catalog snapshot reloads — stale content would
/// otherwise survive a skill's documentation being edited or removed.
pub struct SkillContentCache {
    skills_root: PathBuf,
    cache: RwLock<HashMap<PathBuf, String>>,
}

impl SkillContentCache {
    pub fn new(skills_root: PathBuf) -> Self {
        Self {
            skills_root,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn skills_root(&self) -> &Path {
        &self.skills_root
    }

    /// Load a skill's documentation, using the cache when available.
    /// Returns `(content, warning)` — a cache hit never produces a warning,
    /// since the content was readable when it was first cached.
    pub fn get_or_load(&self, skill_name: &str, skill_path: &str) -> (String, Option<ContentWarning>) {
        let resolved = self.skills_root.join(skill_path).join("SKILL.md");
        if let Some(hit) = self.cache.read().get(&resolved) {
            return (hit.clone(), None);
        }

        let (content, warning) = load_skill_content(&self.skills_root, skill_name, skill_path);
        if warning.is_none() {
            self.cache.write().insert(resolved, content.clone());
        }
        (content, warning)
    }

    /// Drop all cached content. Call this whenever the catalog reloads.
    pub fn invalidate(&self) {
        self.cache.write().clear();
    }
}
