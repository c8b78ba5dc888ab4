use std::sync::Arc;

use router_catalog::Catalog;
use router_llm::DiscoveryClient;
use router_match::{match_direct_with_patterns, match_trigger_with_threshold, normalize};
use router_resolve::{resolve, resolve_multi};

use crate::config::RouterConfig;
use crate::route_result::{RouteResult, RouteType};

/// Deterministic short-circuit pipeline: normalize, then Tier 1, then
/// Tier 2, then Tier 3. Safe to call concurrently from many request
/// handlers — the catalog snapshot is immutable and Tiers 1/2 perform no
/// I/O.
pub struct Router {
    catalog: Arc<Catalog>,
    llm_client: Arc<dyn DiscoveryClient>,
    config: RouterConfig,
}

impl Router {
    pub fn new(catalog: Arc<Catalog>, llm_client: Arc<dyn DiscoveryClient>, config: RouterConfig) -> Self {
        Self {
            catalog,
            llm_client,
            config,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Route one raw query to a [`RouteResult`]. If Tier `k` matches, Tier
    /// `k+1` is never invoked.
    pub async fn route(&self, raw_query: &str) -> RouteResult {
        let patterns: Vec<&str> = self.config.patterns.iter().map(String::as_str).collect();
        let normalized = normalize(raw_query);
        if normalized.is_empty() {
            return RouteResult::error();
        }

        if let Some(direct) = match_direct_with_patterns(&normalized, &self.catalog, &patterns) {
            let resolution = resolve(&self.catalog, &direct.skill);
            return RouteResult {
                route_type: RouteType::Skill,
                matched: direct.skill.clone(),
                primary: vec![direct.skill],
                execution_order: resolution.order,
                tier: 1,
                confidence: direct.confidence,
            };
        }

        if let Some(trigger) = match_trigger_with_threshold(
            &normalized,
            &self.catalog,
            self.config.coverage_threshold,
        ) {
            let resolution = resolve_multi(&self.catalog, &trigger.skills);
            return RouteResult {
                route_type: RouteType::Task,
                matched: trigger.task,
                primary: trigger.skills,
                execution_order: resolution.order,
                tier: 2,
                confidence: 1.0,
            };
        }

        self.route_via_discovery(raw_query).await
    }

    async fn route_via_discovery(&self, raw_query: &str) -> RouteResult {
        let discovery = router_llm::discover(
            self.llm_client.as_ref(),
            raw_query,
            &self.catalog,
            self.config.llm_timeout,
        )
        .await;

        let result = match discovery {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "LLM discovery failed, routing to Error");
                return RouteResult::error();
            }
        };

        let Some(top) = result.top() else {
            return RouteResult::error();
        };

        if self.catalog.has_skill(&top.name) {
            let resolution = resolve(&self.catalog, &top.name);
            return RouteResult {
                route_type: RouteType::Discovery,
                matched: top.name.clone(),
                primary: vec![top.name.clone()],
                execution_order: resolution.order,
                tier: 3,
                confidence: top.confidence,
            };
        }

        if let Some(task) = self.catalog.task(&top.name) {
            let skills = task.skills.clone();
            let resolution = resolve_multi(&self.catalog, &skills);
            return RouteResult {
                route_type: RouteType::Discovery,
                matched: top.name.clone(),
                primary: skills,
                execution_order: resolution.order,
                tier: 3,
                confidence: top.confidence,
            };
        }

        tracing::warn!(name = %top.name, "LLM named an unknown catalog entry, routing to Error");
        RouteResult::error()
    }
}
