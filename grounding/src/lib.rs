//! Incremental grounding core: the static consistency graph and delta
//! k-partite clique enumerator that ground a lifted [`formalism::Repository`]
//! into a fully-instantiated task (spec §4.3–§4.5, this crate's reason to
//! exist).

pub mod consistency;
pub mod error;
pub mod graph;
pub mod grounder;
pub mod kpkc;
pub mod task_builder;

pub use consistency::StaticConsistencyGraph;
pub use error::GroundingError;
pub use graph::{ConstGraph, Edge, Graph, Vertex, VertexSet, Workspace};
pub use grounder::Grounder;
pub use kpkc::DeltaKpkc;
pub use task_builder::GroundTaskBuilder;
