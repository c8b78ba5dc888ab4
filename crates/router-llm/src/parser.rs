use serde::Deserialize;

use crate::client::LlmResponse;
use crate::error::LlmError;

/// Which catalog kind a discovery match names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTarget {
    Task,
    Skill,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    #[serde(rename = "type")]
    target: MatchTarget,
    name: String,
    confidence: f64,
    #[serde(default)]
    reasoning: String,
}

/// A single LLM-proposed match, confidence clamped to `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryMatch {
    pub target: MatchTarget,
    pub name: String,
    pub confidence: f64,
    pub reasoning: String,
}

/// The parsed outcome of a Tier 3 call: matches sorted by confidence
/// descending, plus the raw text for debugging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryResult {
    pub matches: Vec<DiscoveryMatch>,
    pub raw: String,
}

impl DiscoveryResult {
    pub fn top(&self) -> Option<&DiscoveryMatch> {
        self.matches.first()
    }
}

/// Confidence values outside this band are rejected outright rather than
/// clamped — they indicate the model did not follow the response spec at
/// all, not a minor rounding slip.
const GROSS_LOWER_BOUND: f64 = -0.5;
const GROSS_UPPER_BOUND: f64 = 1.5;

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .strip_prefix("json")
        .unwrap_or(rest)
        .trim_start_matches('\n');
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse an [`LlmResponse`] into a [`DiscoveryResult`]. Accepts either a
/// single JSON object or an array of objects. Malformed JSON, or a
/// structurally invalid record, produces [`LlmError::ParseFailure`].
pub fn parse_response(response: &LlmResponse) -> Result<DiscoveryResult, LlmError> {
    let raw = response.text.clone();
    let candidate = strip_code_fences(&raw);

    let raw_matches: Vec<RawMatch> = if let Ok(single) =
        serde_json::from_str::<RawMatch>(candidate)
    {
        vec![single]
    } else {
        serde_json::from_str::<Vec<RawMatch>>(candidate).map_err(|e| LlmError::ParseFailure {
            reason: e.to_string(),
            raw: raw.clone(),
        })?
    };

    let mut matches = Vec::with_capacity(raw_matches.len());
    for m in raw_matches {
        if m.confidence < GROSS_LOWER_BOUND || m.confidence > GROSS_UPPER_BOUND {
            return Err(LlmError::ParseFailure {
                reason: format!("confidence {} is out of a plausible range", m.confidence),
                raw: raw.clone(),
            });
        }
        let confidence = m.confidence.clamp(0.0, 1.0);
        matches.push(DiscoveryMatch {
            target: m.target,
            name: m.name,
            confidence,
            reasoning: m.reasoning,
        });
    }

    matches.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());

    Ok(DiscoveryResult { matches, raw })
}
