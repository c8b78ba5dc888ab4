//! The router orchestrator: sequences normalize → Tier 1 → Tier 2 → Tier 3
//! and builds the [`RouteResult`].

mod config;
mod route_result;
mod router;

pub use config::RouterConfig;
pub use route_result::{RouteResult, RouteType};
pub use router::Router;

pub use router_catalog::Catalog;
pub use router_llm::DiscoveryClient;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use router_catalog::{catalog_from_parts, Skill, Task};
    use router_llm::LlmResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct SpyClient {
        calls: AtomicUsize,
        text: String,
    }

    #[async_trait]
    impl DiscoveryClient for SpyClient {
        async fn invoke(
            &self,
            _prompt: &str,
            _deadline: Duration,
        ) -> Result<LlmResponse, router_llm::LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(LlmResponse {
                text: self.text.clone(),
                model: "spy".to_string(),
                input_tokens: None,
                output_tokens: None,
                finish_reason: None,
            })
        }
    }

    fn bdd_catalog() -> Arc<Catalog> {
        let mut skills = IndexMap::new();
        skills.insert(
            "terraform-base".into(),
            Skill {
                description: "Base terraform module".into(),
                path: "terraform-base".into(),
                depends_on: vec![],
            },
        );
        skills.insert(
            "ecr-setup".into(),
            Skill {
                description: "ECR setup".into(),
                path: "ecr-setup".into(),
                depends_on: vec!["terraform-base".into()],
            },
        );
        skills.insert(
            "aws-ecs-deployment".into(),
            Skill {
                description: "ECS deployment".into(),
                path: "aws-ecs-deployment".into(),
                depends_on: vec!["terraform-base".into(), "ecr-setup".into()],
            },
        );
        skills.insert(
            "nextjs-standards".into(),
            Skill {
                description: "Next.js conventions".into(),
                path: "nextjs-standards".into(),
                depends_on: vec![],
            },
        );
        skills.insert(
            "aws-static-hosting".into(),
            Skill {
                description: "S3 + CloudFront hosting".into(),
                path: "aws-static-hosting".into(),
                depends_on: vec!["terraform-base".into()],
            },
        );
        skills.insert(
            "github-actions-cicd".into(),
            Skill {
                description: "GitHub Actions CI/CD".into(),
                path: "github-actions-cicd".into(),
                depends_on: vec![],
            },
        );

        let mut tasks = IndexMap::new();
        tasks.insert(
            "static-website".into(),
            Task {
                description: "Build a static website".into(),
                triggers: vec!["build a static website".into()],
                skills: vec![
                    "nextjs-standards".into(),
                    "aws-static-hosting".into(),
                    "github-actions-cicd".into(),
                ],
            },
        );

        Arc::new(catalog_from_parts(skills, tasks, IndexMap::new()).unwrap())
    }

    fn router_with_spy(spy: Arc<SpyClient>) -> Router {
        Router::new(bdd_catalog(), spy, RouterConfig::default())
    }

    #[tokio::test]
    async fn tier1_direct_match_skips_llm() {
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: String::new(),
        });
        let router = router_with_spy(spy.clone());
        let result = router.route("use terraform-base for this project").await;
        assert_eq!(result.route_type, RouteType::Skill);
        assert_eq!(result.matched, "terraform-base");
        assert_eq!(result.tier, 1);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn tier1_resolves_dependencies_in_execution_order() {
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: String::new(),
        });
        let router = router_with_spy(spy);
        let result = router.route("apply aws-ecs-deployment").await;
        assert_eq!(result.matched, "aws-ecs-deployment");
        assert_eq!(
            result.execution_order,
            vec!["terraform-base", "ecr-setup", "aws-ecs-deployment"]
        );
    }

    #[tokio::test]
    async fn tier2_trigger_match_skips_llm() {
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: String::new(),
        });
        let router = router_with_spy(spy.clone());
        let result = router.route("build a static website").await;
        assert_eq!(result.route_type, RouteType::Task);
        assert_eq!(result.matched, "static-website");
        assert_eq!(result.tier, 2);
        assert_eq!(
            result.primary,
            vec!["nextjs-standards", "aws-static-hosting", "github-actions-cicd"]
        );
        assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn partial_trigger_coverage_still_matches() {
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: String::new(),
        });
        let router = router_with_spy(spy);
        let result = router.route("build static website").await;
        assert_eq!(result.matched, "static-website");
    }

    #[tokio::test]
    async fn weak_query_falls_through_to_tier3() {
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: r#"{"type":"task","name":"static-website","confidence":0.7,"reasoning":""}"#
                .to_string(),
        });
        let router = router_with_spy(spy.clone());
        let result = router.route("website").await;
        assert_eq!(result.tier, 3);
        assert_eq!(spy.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn tier1_wins_over_tier2_when_both_could_fire() {
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: String::new(),
        });
        let router = router_with_spy(spy);
        let result = router
            .route("use terraform-base to build a static website")
            .await;
        assert_eq!(result.tier, 1);
        assert_eq!(result.matched, "terraform-base");
    }

    #[tokio::test]
    async fn llm_hallucinated_name_is_error() {
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: r#"{"type":"task","name":"nonexistent","confidence":0.9,"reasoning":""}"#
                .to_string(),
        });
        let router = router_with_spy(spy);
        let result = router.route("do something exotic").await;
        assert!(result.is_error());
    }

    #[tokio::test]
    async fn empty_query_is_error_before_any_tier() {
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: String::new(),
        });
        let router = router_with_spy(spy.clone());
        let result = router.route("   ").await;
        assert!(result.is_error());
        assert_eq!(result.tier, 0);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cyclic_catalog_resolves_without_crashing() {
        let mut skills = IndexMap::new();
        skills.insert(
            "skill-a".into(),
            Skill {
                description: "a".into(),
                path: "skill-a".into(),
                depends_on: vec!["skill-b".into()],
            },
        );
        skills.insert(
            "skill-b".into(),
            Skill {
                description: "b".into(),
                path: "skill-b".into(),
                depends_on: vec!["skill-a".into()],
            },
        );
        let catalog = Arc::new(catalog_from_parts(skills, IndexMap::new(), IndexMap::new()).unwrap());
        let spy = Arc::new(SpyClient {
            calls: AtomicUsize::new(0),
            text: String::new(),
        });
        let router = Router::new(catalog, spy, RouterConfig::default());
        let result = router.route("use skill-a here").await;
        assert_eq!(result.route_type, RouteType::Skill);
        assert_eq!(result.execution_order.len(), 2);
    }
}
