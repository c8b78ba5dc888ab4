use std::path::{Path, PathBuf};

/// Surfaced when a skill's documentation file could not be loaded. Never
/// fatal: the caller gets a placeholder instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWarning {
    pub skill: String,
    pub expected_path: PathBuf,
}

impl std::fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "could not load documentation for '{}' (expected at {})",
            self.skill,
            self.expected_path.display()
        )
    }
}

/// Resolve `<skills_root>/<path>/SKILL.md` for one skill and read it.
///
/// Never fails: a missing or unreadable file produces a human-readable
/// placeholder naming the expected path, plus a warning, so the assembled
/// block stays intelligible in degraded cases.
pub fn load_skill_content(skills_root: &Path, skill_name: &str, skill_path: &str) -> (String, Option<ContentWarning>) {
    let resolved = skills_root.join(skill_path).join("SKILL.md");
    match std::fs::read_to_string(&resolved) {
        Ok(content) => (content, None),
        Err(_) => {
            let placeholder = format!(
                "[documentation unavailable for '{skill_name}', expected at {}]",
                resolved.display()
            );
            (
                placeholder,
                Some(ContentWarning {
                    skill: skill_name.to_string(),
                    expected_path: resolved,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let skill_dir = dir.path().join("terraform-base");
        fs::create_dir_all(&skill_dir).unwrap();
        fs::write(skill_dir.join("SKILL.md"), "# Terraform base\n").unwrap();

        let (content, warning) = load_skill_content(dir.path(), "terraform-base", "terraform-base");
        assert_eq!(content, "# Terraform base\n");
        assert!(warning.is_none());
    }

    #[test]
    fn missing_file_yields_placeholder_and_warning() {
        let dir = TempDir::new().unwrap();
        let (content, warning) = load_skill_content(dir.path(), "ghost", "ghost");
        assert!(content.contains("ghost"));
        assert!(content.contains("documentation unavailable"));
        assert!(warning.is_some());
    }
}
