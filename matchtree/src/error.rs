use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchTreeError {
    #[error("match tree has no root node; applicable() on an empty tree always yields nothing")]
    EmptyTree,
}
