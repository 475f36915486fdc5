use crate::ids::{FunctionExpressionId, FunctionTermId, LiteralId, VariableId};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NumericEffectKind {
    Assign,
    Increase,
    Decrease,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NumericEffect {
    pub kind: NumericEffectKind,
    pub target: FunctionTermId,
    pub value: FunctionExpressionId,
}

/// An unconditional conjunction of fluent-literal and numeric effects, the
/// payload every [`crate::planning::ConditionalEffect`] eventually applies.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ConjunctiveEffect {
    pub literals: Vec<LiteralId>,
    pub numeric_effects: Vec<NumericEffect>,
}

/// A `forall (?x ...) when (guard) (effect)` clause. An action's effect list
/// is a list of these; an unconditional, unquantified effect is simply one
/// with empty `parameters`/`guard`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConditionalEffect {
    pub parameters: Vec<VariableId>,
    pub guard: Vec<LiteralId>,
    pub effect: crate::ids::ConjunctiveEffectId,
}
