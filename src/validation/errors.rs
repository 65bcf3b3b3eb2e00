use thiserror::Error;

/// Failure to evaluate a rule at all, as opposed to a rule rejecting a value.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("missing {0} in validation context")]
    MissingContext(&'static str),
}
