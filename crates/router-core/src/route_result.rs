use serde::Serialize;

/// The discriminant of a [`RouteResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    Skill,
    Task,
    Discovery,
    Error,
}

/// The outcome of routing one query. `primary` is the skill list directly
/// requested or taught by the match; `execution_order` is the
/// dependency-resolved load sequence, which may be longer than `primary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub route_type: RouteType,
    pub matched: String,
    #[serde(rename = "skills")]
    pub primary: Vec<String>,
    pub execution_order: Vec<String>,
    pub tier: u8,
    pub confidence: f64,
}

impl RouteResult {
    /// The canonical Error result: empty `matched`, empty `primary`, empty
    /// `execution_order`, tier 0, confidence 0.0.
    pub fn error() -> Self {
        Self {
            route_type: RouteType::Error,
            matched: String::new(),
            primary: Vec::new(),
            execution_order: Vec::new(),
            tier: 0,
            confidence: 0.0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.route_type == RouteType::Error
    }
}
