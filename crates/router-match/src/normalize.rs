/// Canonicalize a raw user query: strip surrounding whitespace, lowercase,
/// replace ASCII quote characters with spaces, collapse whitespace runs.
///
/// Hyphens, digits, and non-quote punctuation are preserved so identifiers
/// like `aws-ecs-deployment` survive intact. An empty or whitespace-only
/// query normalizes to the empty string.
pub fn normalize(query: &str) -> String {
    let lowered = query.trim().to_lowercase();
    let unquoted: String = lowered
        .chars()
        .map(|c| if c == '\'' || c == '"' { ' ' } else { c })
        .collect();
    unquoted.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_and_lowercases() {
        assert_eq!(normalize("  Use Terraform-Base  "), "use terraform-base");
    }

    #[test]
    fn quotes_become_spaces() {
        assert_eq!(normalize("'terraform-base'"), "terraform-base");
        assert_eq!(normalize("\"terraform-base\""), "terraform-base");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("build   a    static   website"), "build a static website");
    }

    #[test]
    fn preserves_hyphens_and_digits() {
        assert_eq!(normalize("aws-ecs-deployment-v2"), "aws-ecs-deployment-v2");
    }

    #[test]
    fn empty_or_blank_normalizes_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t \n "), "");
    }

    proptest::proptest! {
        #[test]
        fn normalize_is_idempotent(s in ".{0,80}") {
            let once = normalize(&s);
            let twice = normalize(&once);
            proptest::prop_assert_eq!(once, twice);
        }
    }
}
