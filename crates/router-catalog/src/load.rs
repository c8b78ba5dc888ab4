use std::path::Path;

use indexmap::IndexMap;

use crate::error::{CatalogError, ReferenceKind, UnresolvedReference};
use crate::model::{Catalog, RawCatalog};

/// Load and validate a catalog file from disk.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|_| CatalogError::NotFound {
        path: path.to_path_buf(),
    })?;
    load_catalog_str(&text, path)
}

/// Parse and validate catalog text already read from `path` (or a synthetic
/// path used for diagnostics, e.g. in tests).
pub fn load_catalog_str(text: &str, path: &Path) -> Result<Catalog, CatalogError> {
    if text.trim().is_empty() {
        return Err(CatalogError::Empty {
            path: path.to_path_buf(),
        });
    }

    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|source| {
        let line = source.location().map(|loc| loc.line());
        CatalogError::ParseFailure {
            path: path.to_path_buf(),
            line,
            source,
        }
    })?;

    if value.is_null() {
        return Err(CatalogError::Empty {
            path: path.to_path_buf(),
        });
    }

    let raw: RawCatalog = serde_yaml::from_value(value).map_err(|source| CatalogError::ParseFailure {
        path: path.to_path_buf(),
        line: source.location().map(|loc| loc.line()),
        source,
    })?;

    let Some(skills) = raw.skills else {
        return Err(CatalogError::MissingSection {
            path: path.to_path_buf(),
            section: "skills",
        });
    };

    let catalog = Catalog {
        skills,
        tasks: raw.tasks,
        categories: raw.categories,
    };

    validate(&catalog)?;
    Ok(catalog)
}

/// Check cross-reference closure: every `Task.skills`, `Skill.depends_on`,
/// `Category.tasks`, `Category.skills` entry must name something present in
/// the catalog. Collects every offender rather than stopping at the first.
pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut offenders = Vec::new();

    for (skill_name, skill) in &catalog.skills {
        for dep in &skill.depends_on {
            if !catalog.has_skill(dep) {
                offenders.push(UnresolvedReference {
                    kind: ReferenceKind::SkillDependency,
                    referrer: skill_name.clone(),
                    target: dep.clone(),
                });
            }
        }
    }

    for (task_name, task) in &catalog.tasks {
        for skill in &task.skills {
            if !catalog.has_skill(skill) {
                offenders.push(UnresolvedReference {
                    kind: ReferenceKind::TaskSkill,
                    referrer: task_name.clone(),
                    target: skill.clone(),
                });
            }
        }
    }

    for (cat_name, category) in &catalog.categories {
        for task in &category.tasks {
            if !catalog.has_task(task) {
                offenders.push(UnresolvedReference {
                    kind: ReferenceKind::CategoryTask,
                    referrer: cat_name.clone(),
                    target: task.clone(),
                });
            }
        }
        for skill in &category.skills {
            if !catalog.has_skill(skill) {
                offenders.push(UnresolvedReference {
                    kind: ReferenceKind::CategorySkill,
                    referrer: cat_name.clone(),
                    target: skill.clone(),
                });
            }
        }
    }

    if offenders.is_empty() {
        Ok(())
    } else {
        tracing::warn!(count = offenders.len(), "catalog has unresolved references");
        Err(CatalogError::ValidationFailure {
            references: offenders,
        })
    }
}

/// Convenience constructor for tests and fixtures: build a [`Catalog`]
/// directly from already-typed maps, skipping the YAML round-trip.
pub fn catalog_from_parts(
    skills: IndexMap<String, crate::model::Skill>,
    tasks: IndexMap<String, crate::model::Task>,
    categories: IndexMap<String, crate::model::Category>,
) -> Result<Catalog, CatalogError> {
    let catalog = Catalog {
        skills,
        tasks,
        categories,
    };
    validate(&catalog)?;
    Ok(catalog)
}
