use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroundingError {
    #[error("grounding capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("enumeration aborted by caller")]
    EnumerationAborted,
}
