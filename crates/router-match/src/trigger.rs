use std::collections::HashSet;

use router_catalog::Catalog;

/// Default minimum coverage a trigger phrase must reach to be selected.
pub const DEFAULT_THRESHOLD: f64 = 0.60;

/// A Tier 2 trigger match.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerMatch {
    pub task: String,
    pub trigger: String,
    pub coverage: f64,
    pub skills: Vec<String>,
}

fn tokenize(s: &str) -> HashSet<String> {
    s.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Fraction of `trigger_tokens` present in `query_tokens`; 0 when the
/// trigger has no tokens.
fn coverage(query_tokens: &HashSet<String>, trigger_tokens: &HashSet<String>) -> f64 {
    if trigger_tokens.is_empty() {
        return 0.0;
    }
    let hits = trigger_tokens.intersection(query_tokens).count();
    hits as f64 / trigger_tokens.len() as f64
}

/// Attempt a Tier 2 trigger match of `normalized_query` against every task's
/// trigger phrases, using the default threshold.
pub fn match_trigger(normalized_query: &str, catalog: &Catalog) -> Option<TriggerMatch> {
    match_trigger_with_threshold(normalized_query, catalog, DEFAULT_THRESHOLD)
}

/// Attempt a Tier 2 trigger match with a caller-supplied coverage threshold.
///
/// Keeps the globally best `(task, trigger, score)` whose score meets the
/// threshold; ties are resolved by first-encountered (catalog insertion
/// order for tasks, declared order for triggers within a task).
pub fn match_trigger_with_threshold(
    normalized_query: &str,
    catalog: &Catalog,
    threshold: f64,
) -> Option<TriggerMatch> {
    if normalized_query.is_empty() {
        return None;
    }
    let query_tokens = tokenize(normalized_query);

    let mut best: Option<TriggerMatch> = None;
    for (task_name, task) in &catalog.tasks {
        for trigger in &task.triggers {
            let trigger_tokens = tokenize(trigger);
            let score = coverage(&query_tokens, &trigger_tokens);
            if score < threshold {
                continue;
            }
            let is_better = match &best {
                None => true,
                Some(current) => score > current.coverage,
            };
            if is_better {
                best = Some(TriggerMatch {
                    task: task_name.clone(),
                    trigger: trigger.clone(),
                    coverage: score,
                    skills: task.skills.clone(),
                });
            }
        }
    }
    best
}
