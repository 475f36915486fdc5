//! Dense identifier types for every interned entity kind.
//!
//! One [`grounding_collections::new_id_type`] per kind, exactly as the
//! classical-planning state representation hand-rolls `SvId`/`Op`: a thin
//! `u32` wrapper so the compiler stops us from indexing one store's `RefVec`
//! with another store's key.

use grounding_collections::new_id_type;

new_id_type! {
    /// A lifted parameter slot, identified by its position within whatever
    /// parameter list it was declared in (action, axiom, rule).
    pub struct VariableId;
}
new_id_type! {
    /// An interned domain constant.
    pub struct ObjectId;
}
new_id_type! {
    pub struct PredicateId;
}
new_id_type! {
    pub struct FunctionId;
}
new_id_type! {
    pub struct TermId;
}
/// Identifies an `Atom` within its predicate's group (see
/// [`crate::store::GroupedStore`]): a composite of the predicate and a
/// dense local index within that predicate's bucket.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct AtomId {
    pub predicate: PredicateId,
    pub local: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundAtomId {
    pub predicate: PredicateId,
    pub local: u32,
}
new_id_type! {
    pub struct LiteralId;
}
new_id_type! {
    pub struct GroundLiteralId;
}
new_id_type! {
    pub struct UnaryOperatorId;
}
new_id_type! {
    pub struct BinaryOperatorId;
}
new_id_type! {
    pub struct MultiOperatorId;
}
new_id_type! {
    /// A numeric comparison (`=`, `<`, ...) between two function expressions.
    pub struct BooleanOperatorId;
}
new_id_type! {
    pub struct FunctionTermId;
}
new_id_type! {
    pub struct GroundFunctionTermId;
}
new_id_type! {
    pub struct GroundFunctionValueId;
}
new_id_type! {
    pub struct FunctionExpressionId;
}
new_id_type! {
    pub struct GroundFunctionExpressionId;
}
new_id_type! {
    pub struct ConjunctiveConditionId;
}
new_id_type! {
    pub struct ConjunctiveEffectId;
}
new_id_type! {
    pub struct ConditionalEffectId;
}
new_id_type! {
    pub struct ActionId;
}
new_id_type! {
    pub struct AxiomId;
}
new_id_type! {
    pub struct RuleId;
}
new_id_type! {
    pub struct GroundRuleId;
}
new_id_type! {
    pub struct GroundActionId;
}
new_id_type! {
    pub struct GroundAxiomId;
}
new_id_type! {
    pub struct MetricId;
}
