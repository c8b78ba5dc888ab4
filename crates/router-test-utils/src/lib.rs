//! Shared test fixtures for the router workspace: the BDD catalog used
//! across the end-to-end routing scenarios, env-var guards, and a temp
//! skills-root builder.

use std::path::PathBuf;
use std::sync::{LazyLock, Mutex, MutexGuard};

use router_catalog::{catalog_from_parts, Catalog, Category, Skill, Task};
use indexmap::IndexMap;

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables — restores the original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

/// Set an environment variable, returning a guard that restores the
/// original value (or removes it) when dropped.
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
    EnvVarGuard { key, previous }
}

fn skill(description: &str, path: &str, depends_on: &[&str]) -> Skill {
    Skill {
        description: description.to_string(),
        path: path.to_string(),
        depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
    }
}

fn task(description: &str, triggers: &[&str], skills: &[&str]) -> Task {
    Task {
        description: description.to_string(),
        triggers: triggers.iter().map(|s| s.to_string()).collect(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

/// Build the catalog used by the end-to-end routing scenarios: a
/// `terraform-base -> ecr-setup -> aws-ecs-deployment` dependency chain, a
/// `static-website` task, and a documentation-only category.
pub fn bdd_catalog() -> Catalog {
    let mut skills = IndexMap::new();
    skills.insert("terraform-base".into(), skill("Base terraform module", "terraform-base", &[]));
    skills.insert(
        "ecr-setup".into(),
        skill("ECR repository setup", "ecr-setup", &["terraform-base"]),
    );
    skills.insert(
        "aws-ecs-deployment".into(),
        skill(
            "Deploys a service onto ECS",
            "aws-ecs-deployment",
            &["terraform-base", "ecr-setup"],
        ),
    );
    skills.insert(
        "nextjs-standards".into(),
        skill("Next.js project conventions", "nextjs-standards", &[]),
    );
    skills.insert(
        "aws-static-hosting".into(),
        skill(
            "S3 + CloudFront static hosting",
            "aws-static-hosting",
            &["terraform-base"],
        ),
    );
    skills.insert(
        "github-actions-cicd".into(),
        skill("GitHub Actions CI/CD pipeline", "github-actions-cicd", &[]),
    );

    let mut tasks = IndexMap::new();
    tasks.insert(
        "static-website".into(),
        task(
            "Build and deploy a static website",
            &["build a static website"],
            &["nextjs-standards", "aws-static-hosting", "github-actions-cicd"],
        ),
    );

    let mut categories = IndexMap::new();
    categories.insert(
        "infrastructure".into(),
        Category {
            description: "Infrastructure-as-code skills".to_string(),
            tasks: vec!["static-website".to_string()],
            skills: vec!["terraform-base".to_string(), "aws-ecs-deployment".to_string()],
        },
    );

    catalog_from_parts(skills, tasks, categories).expect("bdd fixture catalog must validate")
}

/// A catalog containing a `skill-a -> skill-b -> skill-a` cycle, for
/// exercising cycle tolerance.
pub fn cyclic_catalog() -> Catalog {
    let mut skills = IndexMap::new();
    skills.insert("skill-a".into(), skill("A", "skill-a", &["skill-b"]));
    skills.insert("skill-b".into(), skill("B", "skill-b", &["skill-a"]));
    catalog_from_parts(skills, IndexMap::new(), IndexMap::new()).expect("cyclic fixture catalog must validate")
}

/// A temp directory laid out as a skills root, with `SKILL.md` written for
/// every skill in [`bdd_catalog`].
pub struct SkillsRootFixture {
    pub tempdir: tempfile::TempDir,
}

impl SkillsRootFixture {
    pub fn new_for_bdd_catalog() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let catalog = bdd_catalog();
        for (name, skill) in &catalog.skills {
            let dir = tempdir.path().join(&skill.path);
            std::fs::create_dir_all(&dir)?;
            std::fs::write(
                dir.join("SKILL.md"),
                format!("# {name}\n\n{}\n", skill.description),
            )?;
        }
        Ok(Self { tempdir })
    }

    pub fn root(&self) -> PathBuf {
        self.tempdir.path().to_path_buf()
    }
}
