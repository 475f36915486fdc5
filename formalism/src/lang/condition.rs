use crate::ids::{BooleanOperatorId, LiteralId};

/// The parameterised precondition/axiom-body shared shape: a conjunction of
/// literals partitioned by the kind of predicate they reference (so the
/// grounder never has to re-classify an atom mid-enumeration), plus any
/// numeric constraints.
///
/// A zero-arity predicate's literal lives in these same lists as an `Atom`
/// with an empty term list — the enumerator treats it as a degenerate,
/// already-fully-bound partition rather than needing a separate
/// "nullary" representation.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ConjunctiveCondition {
    pub static_literals: Vec<LiteralId>,
    pub fluent_literals: Vec<LiteralId>,
    pub derived_literals: Vec<LiteralId>,
    pub numeric_constraints: Vec<BooleanOperatorId>,
}
