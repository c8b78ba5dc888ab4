use std::fmt;
use std::path::PathBuf;

/// The kind of cross-reference that failed to resolve during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// A task's `skills` entry does not name a catalog skill.
    TaskSkill,
    /// A skill's `depends_on` entry does not name a catalog skill.
    SkillDependency,
    /// A category's `tasks` entry does not name a catalog task.
    CategoryTask,
    /// A category's `skills` entry does not name a catalog skill.
    CategorySkill,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TaskSkill => "task skill",
            Self::SkillDependency => "skill dependency",
            Self::CategoryTask => "category task",
            Self::CategorySkill => "category skill",
        };
        f.write_str(s)
    }
}

/// One unresolved reference discovered during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub kind: ReferenceKind,
    /// Name of the entity that holds the dangling reference.
    pub referrer: String,
    /// The name that could not be found.
    pub target: String,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' references unknown '{}'",
            self.kind, self.referrer, self.target
        )
    }
}

/// Errors produced while loading and validating a catalog.
///
/// Variants are listed in the precedence order in which loading checks for
/// them: a missing file is reported before an empty one, which is reported
/// before a parse failure, and so on.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog not found at {path}")]
    NotFound { path: PathBuf },

    #[error("catalog at {path} is empty")]
    Empty { path: PathBuf },

    #[error("failed to parse catalog at {path}: {source}")]
    ParseFailure {
        path: PathBuf,
        /// Line hint extracted from `source`, when the parser supplies one.
        line: Option<usize>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("catalog at {path} is missing required section '{section}'")]
    MissingSection { path: PathBuf, section: &'static str },

    #[error("catalog validation failed with {} unresolved reference(s)", self.references.len())]
    ValidationFailure { references: Vec<UnresolvedReference> },
}
