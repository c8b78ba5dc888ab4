use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default catalog path relative to the user's skills root.
const DEFAULT_CATALOG_NAME: &str = "catalog.yaml";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().context("home directory not found")
}

/// Resolve the skills root: `ROUTER_SKILLS_ROOT` if set, else
/// `~/.claude/skills`.
pub fn skills_root() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var("ROUTER_SKILLS_ROOT") {
        return Ok(PathBuf::from(custom));
    }
    Ok(home_dir()?.join(".claude").join("skills"))
}

/// Resolve the catalog path: `ROUTER_CATALOG` if set, else
/// `<skills_root>/catalog.yaml`.
pub fn catalog_path() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var("ROUTER_CATALOG") {
        return Ok(PathBuf::from(custom));
    }
    Ok(skills_root()?.join(DEFAULT_CATALOG_NAME))
}

/// Log filter directive: `ROUTER_LOG` if set, else `info`.
pub fn log_filter() -> String {
    std::env::var("ROUTER_LOG").unwrap_or_else(|_| "info".to_string())
}

/// Optional bearer token required by the HTTP transport, if set.
pub fn http_auth_token() -> Option<String> {
    std::env::var("ROUTER_HTTP_TOKEN").ok()
}
