use thiserror::Error;

#[derive(Debug, Error)]
pub enum FdrError {
    #[error("FDR variable has domain size 0, which has no valid value")]
    EmptyDomain,

    #[error("FDR variable bit width {0} does not fit in two consecutive {1}-bit words")]
    CapacityExceeded(u32, u32),
}
