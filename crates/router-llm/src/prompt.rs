use router_catalog::Catalog;

use crate::error::LlmError;

/// Build the single prompt sent to the Tier 3 provider. Includes the
/// original (un-normalized) request, an itemized task listing labeled
/// "high-level", an itemized skill listing labeled "low-level", and a
/// JSON-shaped response spec. Every task and every skill in `catalog` is
/// included; categories are never shown to the LLM.
pub fn build_prompt(raw_query: &str, catalog: &Catalog) -> Result<String, LlmError> {
    if raw_query.trim().is_empty() {
        return Err(LlmError::InvalidInput {
            reason: "request is empty".to_string(),
        });
    }
    if catalog.tasks.is_empty() && catalog.skills.is_empty() {
        return Err(LlmError::InvalidInput {
            reason: "catalog has no tasks or skills to choose from".to_string(),
        });
    }

    let mut prompt = String::new();
    prompt.push_str("A developer made the following request:\n\n");
    prompt.push_str(raw_query.trim());
    prompt.push_str("\n\n");

    prompt.push_str(
        "Below are two kinds of catalog entries. Tasks are high-level and map to \
         multiple skills; skills are low-level, direct capabilities. Prefer a task \
         when the request names a broad goal, and a skill when it names a specific \
         capability.\n\n",
    );

    prompt.push_str("Tasks (high-level, maps to multiple skills):\n");
    for (name, task) in &catalog.tasks {
        prompt.push_str(&format!("- {name}: {}\n", task.description));
    }
    if catalog.tasks.is_empty() {
        prompt.push_str("(none)\n");
    }

    prompt.push_str("\nSkills (low-level, direct capabilities):\n");
    for (name, skill) in &catalog.skills {
        prompt.push_str(&format!("- {name}: {}\n", skill.description));
    }
    if catalog.skills.is_empty() {
        prompt.push_str("(none)\n");
    }

    prompt.push_str(
        "\nRespond with JSON only, either a single object or an array of objects, \
         each shaped as:\n\
         {\"type\": \"task\"|\"skill\", \"name\": \"<catalog name>\", \
         \"confidence\": <0.0-1.0>, \"reasoning\": \"<short reason>\"}\n\
         Sort by confidence descending. Only name entries that appear above.\n",
    );

    Ok(prompt)
}
