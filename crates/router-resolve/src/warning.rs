use std::fmt;

/// A non-fatal condition surfaced alongside a resolution result. Resolution
/// never throws for these; callers decide how to present them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveWarning {
    /// `skill` names `missing` in its `depends_on` list, but `missing` is not
    /// present in the catalog. `skill` is still included in the result.
    MissingDependency { skill: String, missing: String },
    /// The requested closure contains a cycle; `from -> to` names one
    /// participating edge for diagnostics. Remaining nodes were appended in
    /// deterministic order rather than a valid topological position.
    CycleBroken { from: String, to: String },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDependency { skill, missing } => {
                write!(f, "skill '{skill}' depends on unknown skill '{missing}'")
            }
            Self::CycleBroken { from, to } => {
                write!(f, "dependency cycle detected, includes edge '{from}' -> '{to}'")
            }
        }
    }
}
