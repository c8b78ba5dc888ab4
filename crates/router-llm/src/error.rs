/// Typed failure taxonomy for LLM discovery. Provider-layer failures are
/// translated into one of these variants; only [`LlmError::ClientFailure`]
/// and [`LlmError::TransportTimeout`] originate from genuinely unexpected
/// conditions, the rest name a specific, anticipated cause.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    /// The prompt builder was asked to build a prompt from an empty request
    /// or an empty catalog listing.
    #[error("invalid discovery input: {reason}")]
    InvalidInput { reason: String },

    /// Provider responded 401: credentials are wrong or expired. Not
    /// retried — this is a configuration problem, not a transient one.
    #[error("LLM provider rejected credentials")]
    AuthFailure,

    /// Provider responded 429.
    #[error("LLM provider rate-limited the request")]
    RateLimited,

    /// The call did not complete before its deadline, or the network
    /// connection failed outright.
    #[error("LLM request timed out or the transport failed")]
    TransportTimeout,

    /// Any other non-success response from the provider.
    #[error("LLM client failure: {message}")]
    ClientFailure { message: String },

    /// The response body was not valid JSON, or did not match the expected
    /// tagged-union shape, after markdown fence stripping.
    #[error("failed to parse LLM response: {reason}")]
    ParseFailure { reason: String, raw: String },
}
