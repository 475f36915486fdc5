use crate::ids::*;
use crate::lang::{BooleanOpKind, NumericEffectKind};

/// A numeric constraint after substitution: both sides are fully-ground
/// expressions, so it can be evaluated directly against a function-value
/// table.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct GroundNumericConstraint {
    pub op: BooleanOpKind,
    pub lhs: GroundFunctionExpressionId,
    pub rhs: GroundFunctionExpressionId,
}

/// The lifted datalog-style rule the grounder actually enumerates over.
///
/// Both actions and axioms compile down to one of these: an action's rule
/// head is a fresh fluent atom naming the action itself (arity equal to its
/// parameter count, each argument a `Term::Variable` referencing the
/// matching parameter position); an axiom's rule head is its derived atom.
/// Unifying the two lets the static consistency graph and delta k-partite
/// enumerator stay oblivious to which kind of rule they are grounding.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Rule {
    pub parameters: Vec<VariableId>,
    pub static_body: Vec<LiteralId>,
    pub fluent_body: Vec<LiteralId>,
    pub derived_body: Vec<LiteralId>,
    pub numeric_body: Vec<BooleanOperatorId>,
    pub head: AtomId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundRule {
    pub rule: RuleId,
    pub objects: Vec<ObjectId>,
    pub static_body: Vec<GroundLiteralId>,
    pub fluent_body: Vec<GroundLiteralId>,
    pub derived_body: Vec<GroundLiteralId>,
    pub numeric_body: Vec<GroundNumericConstraint>,
    pub head: GroundAtomId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundNumericEffect {
    pub kind: NumericEffectKind,
    pub target: GroundFunctionTermId,
    pub value: GroundFunctionExpressionId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundConditionalEffect {
    pub guard: Vec<GroundLiteralId>,
    pub add: Vec<GroundAtomId>,
    pub delete: Vec<GroundAtomId>,
    pub numeric_effects: Vec<GroundNumericEffect>,
}

/// A fully-instantiated action, applicable exactly when every literal in
/// its inherited [`GroundRule`] body holds and every numeric constraint is
/// satisfied in the current state.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundAction {
    pub action: ActionId,
    pub ground_rule: GroundRuleId,
    pub effects: Vec<GroundConditionalEffect>,
}

/// A fully-instantiated axiom: when its body holds, `head` is derivable.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundAxiom {
    pub axiom: AxiomId,
    pub ground_rule: GroundRuleId,
}

/// A lifted action schema.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Action {
    pub name: String,
    pub parameters: Vec<VariableId>,
    pub precondition: ConjunctiveConditionId,
    pub effects: Vec<ConditionalEffectId>,
    pub rule: RuleId,
}

/// A lifted axiom: `head :- body`, where `head`'s predicate is derived.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Axiom {
    pub parameters: Vec<VariableId>,
    pub body: ConjunctiveConditionId,
    pub head: LiteralId,
    pub rule: RuleId,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MetricObjective {
    Minimize,
    Maximize,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Metric {
    pub objective: MetricObjective,
    pub expression: GroundFunctionExpressionId,
}
