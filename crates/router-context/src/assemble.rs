use router_catalog::Catalog;
use router_core::{RouteResult, RouteType};

use crate::cache::SkillContentCache;

fn route_type_label(route_type: RouteType) -> &'static str {
    match route_type {
        RouteType::Skill => "skill",
        RouteType::Task => "task",
        RouteType::Discovery => "discovery",
        RouteType::Error => "error",
    }
}

/// Turn a [`RouteResult`] into the formatted `<skill_context>` injection
/// block. An Error route produces an empty string; the caller writes
/// nothing. An empty execution order produces the header only.
pub fn assemble_context(route: &RouteResult, catalog: &Catalog, cache: &SkillContentCache) -> String {
    if route.is_error() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("<skill_context>\n");
    out.push_str(&format!(
        "Matched: {} '{}'\n",
        route_type_label(route.route_type),
        route.matched
    ));
    out.push_str(&format!(
        "Execution order: {}\n",
        route.execution_order.join(" -> ")
    ));

    if route.execution_order.is_empty() {
        out.push_str("</skill_context>");
        return out;
    }
    out.push('\n');

    for name in &route.execution_order {
        let annotation = if route.primary.iter().any(|p| p == name) {
            "PRIMARY"
        } else {
            "DEPENDENCY"
        };
        out.push_str(&format!("## {name} [{annotation}]\n"));

        let content = match catalog.skill(name) {
            Some(skill) => cache.get_or_load(name, &skill.path).0,
            None => format!("[no catalog entry for '{name}']"),
        };
        out.push_str(&content);
        if !content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("\n---\n\n");
    }

    out.push_str("</skill_context>");
    out
}
