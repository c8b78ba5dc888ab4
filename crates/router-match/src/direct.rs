use router_catalog::Catalog;

/// The rule that produced a Tier 1 match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The skill's name itself appeared verbatim in the normalized query.
    Exact,
    /// One of the phrase patterns (`use {s}`, `apply {s}`, ...) matched.
    Pattern,
}

/// A Tier 1 direct match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMatch {
    pub skill: String,
    pub kind: MatchKind,
    pub confidence: f64,
}

/// The default phrase templates tried during the pattern pass, each with a
/// single `{skill}` placeholder. Overridable via [`match_direct_with_patterns`].
pub const DEFAULT_PATTERNS: &[&str] = &[
    "use {s}",
    "apply {s}",
    "run {s}",
    "execute {s}",
    "{s} skill",
    "deploy with {s}",
    "set up {s}",
    "configure {s}",
];

/// Attempt a Tier 1 direct match of `normalized_query` against the catalog's
/// skill names, using the default pattern registry.
pub fn match_direct(normalized_query: &str, catalog: &Catalog) -> Option<DirectMatch> {
    match_direct_with_patterns(normalized_query, catalog, DEFAULT_PATTERNS)
}

/// Attempt a Tier 1 direct match using a caller-supplied pattern registry.
///
/// Candidate names are sorted by length, descending, so that when both
/// `terraform` and `terraform-base` exist, the longer name wins on a query
/// containing `terraform-base` — there is no substring ambiguity.
pub fn match_direct_with_patterns(
    normalized_query: &str,
    catalog: &Catalog,
    patterns: &[&str],
) -> Option<DirectMatch> {
    if normalized_query.is_empty() {
        return None;
    }

    let mut names: Vec<&str> = catalog.skills.keys().map(String::as_str).collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));

    for name in &names {
        if normalized_query.contains(&name.to_lowercase()) {
            return Some(DirectMatch {
                skill: (*name).to_string(),
                kind: MatchKind::Exact,
                confidence: 1.0,
            });
        }
    }

    for name in &names {
        let lowered = name.to_lowercase();
        for pattern in patterns {
            let phrase = pattern.replace("{s}", &lowered);
            if normalized_query.contains(&phrase) {
                return Some(DirectMatch {
                    skill: (*name).to_string(),
                    kind: MatchKind::Pattern,
                    confidence: 0.9,
                });
            }
        }
    }

    None
}
