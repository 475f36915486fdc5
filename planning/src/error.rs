//! One `thiserror`-derived enum wrapping every sub-crate's typed error,
//! re-exported here as the single error type the facade's own fallible
//! entry points return (spec §7's taxonomy, re-exported per SPEC_FULL §13).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error(transparent)]
    Translation(#[from] translate::TranslationError),

    #[error(transparent)]
    Repository(#[from] formalism::RepositoryError),

    #[error(transparent)]
    Grounding(#[from] grounding::GroundingError),

    #[error(transparent)]
    Fdr(#[from] fdr::FdrError),

    #[error(transparent)]
    MatchTree(#[from] matchtree::MatchTreeError),
}
