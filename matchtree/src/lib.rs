//! The applicability index (spec §4.6): a hash-consed decision DAG over
//! ground atoms, finite-domain facts, and numeric constraints, with
//! generator leaves enumerating the ground actions/axioms reachable once
//! the path of tests to get there succeeds.

pub mod builder;
pub mod error;
pub mod lookup;
pub mod node;
pub mod repository;
pub mod state;

pub use builder::MatchTreeBuilder;
pub use error::MatchTreeError;
pub use lookup::applicable;
pub use node::{AtomSelector, FactSelector, Generator, GeneratorElement, Node, NodeId, NumericSelector};
pub use repository::MatchTreeRepository;
pub use state::MatchState;
