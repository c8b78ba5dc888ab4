use std::time::Duration;

use router_catalog::Catalog;

use crate::client::DiscoveryClient;
use crate::error::LlmError;
use crate::parser::{parse_response, DiscoveryResult};
use crate::prompt::build_prompt;

/// State of a single discovery call. Only [`DiscoveryState::Failed`]
/// propagates as a typed error to the router; a parse failure is swallowed
/// into an empty [`DiscoveryResult`] with the raw text preserved so routing
/// can degrade gracefully instead of guessing intent.
#[derive(Debug)]
pub enum DiscoveryState {
    Idle,
    PromptBuilt,
    Invoking,
    Parsed(DiscoveryResult),
    Failed(LlmError),
}

/// Run prompt-build, provider invocation, and response parsing as one
/// façade. `LlmError::InvalidInput`, `AuthFailure`, `RateLimited`,
/// `TransportTimeout`, and `ClientFailure` propagate to the caller.
/// `ParseFailure` is logged and swallowed into an empty result.
pub async fn discover(
    client: &dyn DiscoveryClient,
    raw_query: &str,
    catalog: &Catalog,
    deadline: Duration,
) -> Result<DiscoveryResult, LlmError> {
    let mut state = DiscoveryState::Idle;

    let prompt = build_prompt(raw_query, catalog)?;
    state = advance(state, DiscoveryState::PromptBuilt);

    state = advance(state, DiscoveryState::Invoking);
    let response = match client.invoke(&prompt, deadline).await {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(error = %err, "LLM discovery call failed");
            let _ = advance(state, DiscoveryState::Failed(err.clone_for_log()));
            return Err(err);
        }
    };

    match parse_response(&response) {
        Ok(result) => {
            let _ = advance(state, DiscoveryState::Parsed(result.clone()));
            Ok(result)
        }
        Err(LlmError::ParseFailure { reason, raw }) => {
            tracing::warn!(reason = %reason, raw = %raw, "LLM response parse failure, degrading to empty result");
            Ok(DiscoveryResult {
                matches: Vec::new(),
                raw,
            })
        }
        Err(other) => {
            let _ = advance(state, DiscoveryState::Failed(other.clone_for_log()));
            Err(other)
        }
    }
}

fn advance(_from: DiscoveryState, to: DiscoveryState) -> DiscoveryState {
    to
}

impl LlmError {
    fn clone_for_log(&self) -> LlmError {
        match self {
            Self::InvalidInput { reason } => Self::InvalidInput {
                reason: reason.clone(),
            },
            Self::AuthFailure => Self::AuthFailure,
            Self::RateLimited => Self::RateLimited,
            Self::TransportTimeout => Self::TransportTimeout,
            Self::ClientFailure { message } => Self::ClientFailure {
                message: message.clone(),
            },
            Self::ParseFailure { reason, raw } => Self::ParseFailure {
                reason: reason.clone(),
                raw: raw.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LlmResponse;
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use router_catalog::{catalog_from_parts, Skill};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubClient {
        text: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DiscoveryClient for StubClient {
        async fn invoke(&self, _prompt: &str, _deadline: Duration) -> Result<LlmResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(LlmResponse {
                text: self.text.clone(),
                model: "stub".to_string(),
                input_tokens: None,
                output_tokens: None,
                finish_reason: None,
            })
        }
    }

    struct FailingClient;

    #[async_trait]
    impl DiscoveryClient for FailingClient {
        async fn invoke(&self, _prompt: &str, _deadline: Duration) -> Result<LlmResponse, LlmError> {
            Err(LlmError::AuthFailure)
        }
    }

    fn sample_catalog() -> Catalog {
        let mut skills = IndexMap::new();
        skills.insert(
            "terraform-base".into(),
            Skill {
                description: "Base terraform module".into(),
                path: "terraform-base".into(),
                depends_on: vec![],
            },
        );
        catalog_from_parts(skills, IndexMap::new(), IndexMap::new()).unwrap()
    }

    #[tokio::test]
    async fn well_formed_response_parses_through() {
        let client = StubClient {
            text: r#"{"type":"skill","name":"terraform-base","confidence":0.8,"reasoning":""}"#
                .to_string(),
            calls: AtomicUsize::new(0),
        };
        let result = discover(&client, "deploy infra", &sample_catalog(), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(result.matches.len(), 1);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn parse_failure_degrades_to_empty_result_not_error() {
        let client = StubClient {
            text: "not json".to_string(),
            calls: AtomicUsize::new(0),
        };
        let result = discover(&client, "deploy infra", &sample_catalog(), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(result.matches.is_empty());
    }

    #[tokio::test]
    async fn client_failure_propagates() {
        let client = FailingClient;
        let err = discover(&client, "deploy infra", &sample_catalog(), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::AuthFailure));
    }

    #[tokio::test]
    async fn empty_query_never_invokes_client() {
        let client = StubClient {
            text: String::new(),
            calls: AtomicUsize::new(0),
        };
        let err = discover(&client, "   ", &sample_catalog(), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::InvalidInput { .. }));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }
}
