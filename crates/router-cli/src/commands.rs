use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use router_catalog::{load_catalog, Catalog};
use router_context::{assemble_context, SkillContentCache};
use router_core::{DiscoveryClient, RouteResult, Router, RouterConfig};
use router_llm::{AnthropicClient, AnthropicConfig, LlmError, LlmResponse};

use crate::env;

struct MissingCredentialsClient;

#[async_trait]
impl DiscoveryClient for MissingCredentialsClient {
    async fn invoke(&self, _prompt: &str, _deadline: Duration) -> Result<LlmResponse, LlmError> {
        Err(LlmError::AuthFailure)
    }
}

fn build_discovery_client() -> Arc<dyn DiscoveryClient> {
    match AnthropicConfig::from_env() {
        Ok(config) => Arc::new(AnthropicClient::new(config)),
        Err(err) => {
            tracing::warn!(error = %err, "no LLM credentials configured, Tier 3 will always degrade to Error");
            Arc::new(MissingCredentialsClient)
        }
    }
}

fn resolve_catalog_path(catalog: Option<PathBuf>) -> Result<PathBuf> {
    catalog.map(Ok).unwrap_or_else(env::catalog_path)
}

fn resolve_skills_root(skills_root: Option<PathBuf>) -> Result<PathBuf> {
    skills_root.map(Ok).unwrap_or_else(env::skills_root)
}

fn load_catalog_or_exit(path: &Path) -> Catalog {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("failed to load catalog at {}: {err}", path.display());
            std::process::exit(1);
        }
    }
}

fn build_router(catalog: Catalog) -> Router {
    let config = RouterConfig::from_env();
    Router::new(Arc::new(catalog), build_discovery_client(), config)
}

/// Read the query from `PROMPT` if set and non-empty, else from stdin.
fn read_query() -> Result<String> {
    if let Ok(prompt) = std::env::var("PROMPT") {
        if !prompt.trim().is_empty() {
            return Ok(prompt);
        }
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

/// The pre-prompt hook entry point: read the query, route it, assemble the
/// context block, write it to stdout. Prints nothing for an empty query or
/// an Error route.
pub async fn run_hook(catalog: Option<PathBuf>, skills_root: Option<PathBuf>) -> Result<()> {
    let query = read_query()?;
    if query.trim().is_empty() {
        return Ok(());
    }

    let catalog_path = resolve_catalog_path(catalog)?;
    let root = resolve_skills_root(skills_root)?;
    let catalog = load_catalog_or_exit(&catalog_path);
    let router = build_router(catalog);

    let route = router.route(&query).await;
    let cache = SkillContentCache::new(root);
    let block = assemble_context(&route, router.catalog(), &cache);
    if !block.is_empty() {
        println!("{block}");
    }
    Ok(())
}

/// Route one query and print the wire-shape JSON result.
pub async fn run_route(query: &str, catalog: Option<PathBuf>) -> Result<()> {
    let catalog_path = resolve_catalog_path(catalog)?;
    let catalog = load_catalog_or_exit(&catalog_path);
    let router = build_router(catalog);
    let route = router.route(query).await;
    println!("{}", serde_json::to_string_pretty(&route)?);
    Ok(())
}

/// Load and validate a catalog, reporting every unresolved reference.
pub fn run_validate(catalog: Option<PathBuf>) -> Result<()> {
    let catalog_path = resolve_catalog_path(catalog)?;
    match load_catalog(&catalog_path) {
        Ok(catalog) => {
            println!(
                "catalog at {} is valid: {} skill(s), {} task(s), {} categor(y/ies)",
                catalog_path.display(),
                catalog.skills.len(),
                catalog.tasks.len(),
                catalog.categories.len()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("catalog at {} is invalid: {err}", catalog_path.display());
            std::process::exit(1);
        }
    }
}

/// Build a [`Router`] from a resolved catalog path, used by the `serve`
/// command (behind the `http-transport` feature). The HTTP transport returns
/// the wire-shape result directly and has no use for skill content, so it
/// skips the skills-root cache `hook` builds.
pub fn build_router_only(catalog: Option<PathBuf>) -> Result<Router> {
    let catalog_path = resolve_catalog_path(catalog)?;
    let catalog = load_catalog_or_exit(&catalog_path);
    Ok(build_router(catalog))
}

pub async fn route_to_result(router: &Router, query: &str) -> RouteResult {
    router.route(query).await
}
