use thiserror::Error;

/// Errors the interning repository itself can raise (spec §7). Translation
/// and grounding errors (`TranslationError`, `KindMismatch`,
/// `EnumerationAborted`, ...) live in their own crates, closer to where
/// they're actually raised.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
}
