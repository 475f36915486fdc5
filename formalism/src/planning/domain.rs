use crate::ids::{ActionId, AxiomId, FunctionId, ObjectId, PredicateId};

/// The lifted description: predicate/function vocabulary, action and axiom
/// schemas, and the constants shared by every object in the domain.
#[derive(Clone, Debug, Default)]
pub struct Domain {
    pub name: String,
    pub predicates: Vec<PredicateId>,
    pub functions: Vec<FunctionId>,
    pub constants: Vec<ObjectId>,
    pub actions: Vec<ActionId>,
    pub axioms: Vec<AxiomId>,
}
