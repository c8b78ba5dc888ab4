use indexmap::{IndexMap, IndexSet};
use router_catalog::Catalog;

use crate::result::DependencyResult;
use crate::warning::ResolveWarning;

/// Resolve the transitive dependency closure of a single skill into a
/// topologically ordered [`DependencyResult`]. Never returns `Err`: an
/// unknown `name` simply yields an empty result.
pub fn resolve(catalog: &Catalog, name: &str) -> DependencyResult {
    resolve_multi(catalog, std::slice::from_ref(&name.to_string()))
}

/// Resolve the transitive dependency closure of several skills at once. The
/// result contains each name at most once (deduplicated across the whole
/// request), ordered topologically.
pub fn resolve_multi(catalog: &Catalog, names: &[String]) -> DependencyResult {
    let (collected, mut warnings) = collect_many(catalog, names);
    if collected.is_empty() {
        return DependencyResult::empty();
    }

    let (order, has_cycle, cycle_warning) = topological_order(catalog, &collected);
    if let Some(w) = cycle_warning {
        warnings.push(w);
    }

    DependencyResult {
        order,
        has_cycle,
        warnings,
    }
}

/// Depth-first, memoized collection of the transitive closure of `name`.
/// Returns the collected set (in first-discovery order) and any
/// missing-dependency warnings. A missing dependency is skipped; the
/// referring skill is still included.
pub fn collect(catalog: &Catalog, name: &str) -> (IndexSet<String>, Vec<ResolveWarning>) {
    collect_many(catalog, std::slice::from_ref(&name.to_string()))
}

fn collect_many(catalog: &Catalog, names: &[String]) -> (IndexSet<String>, Vec<ResolveWarning>) {
    let mut collected = IndexSet::new();
    let mut warnings = Vec::new();
    for name in names {
        collect_into(catalog, name, &mut collected, &mut warnings);
    }
    (collected, warnings)
}

fn collect_into(
    catalog: &Catalog,
    name: &str,
    collected: &mut IndexSet<String>,
    warnings: &mut Vec<ResolveWarning>,
) {
    let Some(skill) = catalog.skill(name) else {
        // The requested name itself doesn't exist; nothing to collect. The
        // caller (router) is responsible for deciding whether an unknown
        // request name is itself an error; the resolver stays silent.
        return;
    };
    if !collected.insert(name.to_string()) {
        return; // already visited, memoized
    }
    for dep in &skill.depends_on {
        if catalog.has_skill(dep) {
            collect_into(catalog, dep, collected, warnings);
        } else {
            warnings.push(ResolveWarning::MissingDependency {
                skill: name.to_string(),
                missing: dep.clone(),
            });
        }
    }
}

/// Kahn's algorithm over the subgraph induced by `collected`, with cycle
/// tolerance: when the main loop stalls with nodes still unplaced, those
/// nodes are appended in deterministic (collection) order, `has_cycle` is
/// set, and a warning naming one participating edge is returned.
fn topological_order(
    catalog: &Catalog,
    collected: &IndexSet<String>,
) -> (Vec<String>, bool, Option<ResolveWarning>) {
    // edges: dependency -> dependent (the dependency must precede the
    // dependent in execution order).
    let mut adjacency: IndexMap<&str, Vec<&str>> =
        collected.iter().map(|n| (n.as_str(), Vec::new())).collect();
    let mut in_degree: IndexMap<&str, usize> =
        collected.iter().map(|n| (n.as_str(), 0usize)).collect();

    for name in collected {
        let Some(skill) = catalog.skill(name) else {
            continue;
        };
        for dep in &skill.depends_on {
            if collected.contains(dep) {
                adjacency.get_mut(dep.as_str()).unwrap().push(name.as_str());
                *in_degree.get_mut(name.as_str()).unwrap() += 1;
            }
        }
    }

    let mut queue: std::collections::VecDeque<&str> = collected
        .iter()
        .map(String::as_str)
        .filter(|n| in_degree[n] == 0)
        .collect();

    let mut order: Vec<String> = Vec::with_capacity(collected.len());
    while let Some(node) = queue.pop_front() {
        order.push(node.to_string());
        for &next in &adjacency[node] {
            let deg = in_degree.get_mut(next).unwrap();
            *deg -= 1;
            if *deg == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() == collected.len() {
        return (order, false, None);
    }

    let placed: IndexSet<&str> = order.iter().map(String::as_str).collect();
    let mut cycle_warning = None;
    for name in collected {
        if placed.contains(name.as_str()) {
            continue;
        }
        for &next in &adjacency[name.as_str()] {
            if !placed.contains(next) {
                cycle_warning = Some(ResolveWarning::CycleBroken {
                    from: name.clone(),
                    to: next.to_string(),
                });
                break;
            }
        }
        if cycle_warning.is_some() {
            break;
        }
    }

    for name in collected {
        if !placed.contains(name.as_str()) {
            order.push(name.clone());
        }
    }

    (order, true, cycle_warning)
}

/// Find all elementary cycles in the full catalog's dependency graph, via
/// depth-first search with an explicit recursion stack. Used for
/// diagnostics only; resolution itself never calls this.
pub fn detect_cycles(catalog: &Catalog) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();
    let mut visited: IndexSet<String> = IndexSet::new();
    let mut stack: Vec<String> = Vec::new();
    let mut on_stack: IndexSet<String> = IndexSet::new();

    for name in catalog.skills.keys() {
        if !visited.contains(name) {
            visit(catalog, name, &mut visited, &mut stack, &mut on_stack, &mut cycles);
        }
    }
    cycles
}

fn visit(
    catalog: &Catalog,
    name: &str,
    visited: &mut IndexSet<String>,
    stack: &mut Vec<String>,
    on_stack: &mut IndexSet<String>,
    cycles: &mut Vec<Vec<String>>,
) {
    visited.insert(name.to_string());
    stack.push(name.to_string());
    on_stack.insert(name.to_string());

    if let Some(skill) = catalog.skill(name) {
        for dep in &skill.depends_on {
            if !catalog.has_skill(dep) {
                continue;
            }
            if on_stack.contains(dep) {
                let start = stack.iter().position(|n| n == dep).unwrap_or(0);
                let mut cycle: Vec<String> = stack[start..].to_vec();
                cycle.push(dep.clone());
                cycles.push(cycle);
            } else if !visited.contains(dep) {
                visit(catalog, dep, visited, stack, on_stack, cycles);
            }
        }
    }

    stack.pop();
    on_stack.shift_remove(name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use router_catalog::{catalog_from_parts, Skill};
    use indexmap::IndexMap;

    fn skill(desc: &str, deps: &[&str]) -> Skill {
        Skill {
            description: desc.to_string(),
            path: desc.to_string(),
            depends_on: deps.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn chain_catalog() -> Catalog {
        let mut skills = IndexMap::new();
        skills.insert("terraform-base".into(), skill("base", &[]));
        skills.insert("ecr-setup".into(), skill("ecr", &["terraform-base"]));
        skills.insert(
            "aws-ecs-deployment".into(),
            skill("ecs", &["terraform-base", "ecr-setup"]),
        );
        catalog_from_parts(skills, IndexMap::new(), IndexMap::new()).unwrap()
    }

    #[test]
    fn resolve_respects_topological_order() {
        let catalog = chain_catalog();
        let result = resolve(&catalog, "aws-ecs-deployment");
        assert!(!result.has_cycle);
        assert!(result.warnings.is_empty());
        let idx = |n: &str| result.order.iter().position(|x| x == n).unwrap();
        assert!(idx("terraform-base") < idx("ecr-setup"));
        assert!(idx("ecr-setup") < idx("aws-ecs-deployment"));
    }

    #[test]
    fn resolve_unknown_name_is_empty() {
        let catalog = chain_catalog();
        let result = resolve(&catalog, "does-not-exist");
        assert!(result.is_empty());
        assert!(!result.has_cycle);
    }

    #[test]
    fn resolve_multi_dedups() {
        let catalog = chain_catalog();
        let result = resolve_multi(
            &catalog,
            &["aws-ecs-deployment".to_string(), "ecr-setup".to_string()],
        );
        let mut seen = std::collections::HashSet::new();
        for name in &result.order {
            assert!(seen.insert(name.clone()), "duplicate name {name}");
        }
    }

    #[test]
    fn missing_dependency_is_warned_and_referrer_kept() {
        let mut skills = IndexMap::new();
        skills.insert("a".into(), skill("a", &["ghost"]));
        let catalog = catalog_from_parts(skills, IndexMap::new(), IndexMap::new()).unwrap();

        let result = resolve(&catalog, "a");
        assert_eq!(result.order, vec!["a".to_string()]);
        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            &result.warnings[0],
            ResolveWarning::MissingDependency { skill, missing }
                if skill == "a" && missing == "ghost"
        ));
    }

    #[test]
    fn cycle_is_tolerated_not_rejected() {
        let mut skills = IndexMap::new();
        skills.insert("skill-a".into(), skill("a", &["skill-b"]));
        skills.insert("skill-b".into(), skill("b", &["skill-a"]));
        let catalog = catalog_from_parts(skills, IndexMap::new(), IndexMap::new()).unwrap();

        let result = resolve(&catalog, "skill-a");
        assert!(result.has_cycle);
        assert_eq!(result.order.len(), 2);
        assert!(result.order.contains(&"skill-a".to_string()));
        assert!(result.order.contains(&"skill-b".to_string()));
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, ResolveWarning::CycleBroken { .. })));
    }

    #[test]
    fn detect_cycles_finds_the_loop() {
        let mut skills = IndexMap::new();
        skills.insert("skill-a".into(), skill("a", &["skill-b"]));
        skills.insert("skill-b".into(), skill("b", &["skill-a"]));
        let catalog = catalog_from_parts(skills, IndexMap::new(), IndexMap::new()).unwrap();

        let cycles = detect_cycles(&catalog);
        assert!(!cycles.is_empty());
    }

    #[test]
    fn detect_cycles_empty_for_dag() {
        let catalog = chain_catalog();
        assert!(detect_cycles(&catalog).is_empty());
    }

    #[test]
    fn empty_request_yields_empty_result_no_warnings() {
        let catalog = chain_catalog();
        let result = resolve_multi(&catalog, &[]);
        assert!(result.is_empty());
        assert!(result.warnings.is_empty());
        assert!(!result.has_cycle);
    }

    proptest::proptest! {
        #[test]
        fn resolve_multi_is_always_deduped_and_topological(
            picks in proptest::collection::vec(0usize..3, 0..6)
        ) {
            let catalog = chain_catalog();
            let names = ["terraform-base", "ecr-setup", "aws-ecs-deployment"];
            let requested: Vec<String> = picks.into_iter().map(|i| names[i].to_string()).collect();

            let result = resolve_multi(&catalog, &requested);

            let mut seen = std::collections::HashSet::new();
            for name in &result.order {
                proptest::prop_assert!(seen.insert(name.clone()));
            }

            let idx = |n: &str| result.order.iter().position(|x| x == n);
            if let (Some(base), Some(ecr)) = (idx("terraform-base"), idx("ecr-setup")) {
                proptest::prop_assert!(base < ecr);
            }
            if let (Some(ecr), Some(ecs)) = (idx("ecr-setup"), idx("aws-ecs-deployment")) {
                proptest::prop_assert!(ecr < ecs);
            }
        }
    }
}
