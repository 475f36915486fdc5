use crate::ids::{FunctionId, ObjectId, PredicateId, TermId};
use crate::kind::EntityKind;

/// `predicate(term, term, ...)`, lifted: arguments may reference parameters.
///
/// Grouped by `predicate` in the repository (spec §4.1's "grouped store"
/// example): the local index within a predicate's group is what makes the
/// per-rule static consistency graph's partitions contiguous.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Atom {
    pub predicate: PredicateId,
    pub terms: Vec<TermId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundAtom {
    pub predicate: PredicateId,
    pub objects: Vec<ObjectId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Literal {
    pub atom: crate::ids::AtomId,
    pub polarity: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundLiteral {
    pub atom: crate::ids::GroundAtomId,
    pub polarity: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionTerm {
    pub function: FunctionId,
    pub terms: Vec<TermId>,
    pub kind: EntityKind,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundFunctionTerm {
    pub function: FunctionId,
    pub objects: Vec<ObjectId>,
    pub kind: EntityKind,
}

/// A fixed numeric value bound to a ground function term, e.g. the
/// initial-state assignment `(= (fuel truck1) 10)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundFunctionValue {
    pub term: crate::ids::GroundFunctionTermId,
    pub value: i64,
}
