//! The top-level interning repository: one store per entity kind, all
//! behind a single owner so every id handed out is only ever meaningful
//! relative to this one `Repository` (spec §3's exclusive single-writer
//! model; see also §5).

use crate::ids::*;
use crate::lang::*;
use crate::name::{NameRef, StringTable};
use crate::planning::*;
use crate::store::{GroupedStore, Store};

#[derive(Default)]
pub struct Repository {
    pub names: StringTable,

    pub variables: Store<VariableId, Variable>,
    pub objects: Store<ObjectId, Object>,
    pub predicates: Store<PredicateId, Predicate>,
    pub functions: Store<FunctionId, Function>,
    pub terms: Store<TermId, Term>,

    pub atoms: GroupedStore<PredicateId, Atom>,
    pub ground_atoms: GroupedStore<PredicateId, GroundAtom>,
    pub literals: Store<LiteralId, Literal>,
    pub ground_literals: Store<GroundLiteralId, GroundLiteral>,

    pub function_terms: Store<FunctionTermId, FunctionTerm>,
    pub ground_function_terms: Store<GroundFunctionTermId, GroundFunctionTerm>,
    pub ground_function_values: Store<GroundFunctionValueId, GroundFunctionValue>,

    pub unary_operators: Store<UnaryOperatorId, UnaryOperator>,
    pub binary_operators: Store<BinaryOperatorId, BinaryOperator>,
    pub multi_operators: Store<MultiOperatorId, MultiOperator>,
    pub boolean_operators: Store<BooleanOperatorId, BooleanOperator>,
    pub function_expressions: Store<FunctionExpressionId, FunctionExpression>,
    pub ground_function_expressions: Store<GroundFunctionExpressionId, GroundFunctionExpression>,

    pub conjunctive_conditions: Store<ConjunctiveConditionId, ConjunctiveCondition>,
    pub conjunctive_effects: Store<ConjunctiveEffectId, ConjunctiveEffect>,
    pub conditional_effects: Store<ConditionalEffectId, ConditionalEffect>,

    pub rules: Store<RuleId, Rule>,
    pub ground_rules: Store<GroundRuleId, GroundRule>,
    pub actions: Store<ActionId, Action>,
    pub axioms: Store<AxiomId, Axiom>,
    pub ground_actions: Store<GroundActionId, GroundAction>,
    pub ground_axioms: Store<GroundAxiomId, GroundAxiom>,
    pub metrics: Store<MetricId, Metric>,

    pub domain: Option<Domain>,
    pub task: Option<Task>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, returning a stable `(offset, len)` reference into the
    /// shared name arena.
    pub fn intern_name(&mut self, name: &str) -> NameRef {
        self.names.intern(name)
    }

    pub fn resolve_name(&self, reference: NameRef) -> &str {
        self.names.resolve(reference)
    }

    pub fn intern_object(&mut self, name: &str) -> ObjectId {
        let name = self.intern_name(name);
        self.objects.get_or_create(Object { name }).0
    }

    pub fn object_name(&self, id: ObjectId) -> &str {
        self.resolve_name(self.objects.get(id).name)
    }

    /// Looks up an already-interned object by name, without creating one.
    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        let name = self.names.find(name)?;
        self.objects.find(&Object { name })
    }

    pub fn intern_predicate(&mut self, name: &str, arity: u32, kind: EntityKind) -> PredicateId {
        let name = self.intern_name(name);
        self.predicates.get_or_create(Predicate { name, arity, kind }).0
    }

    pub fn predicate_name(&self, id: PredicateId) -> &str {
        self.resolve_name(self.predicates.get(id).name)
    }

    pub fn intern_function(&mut self, name: &str, arity: u32, kind: EntityKind) -> FunctionId {
        let name = self.intern_name(name);
        self.functions.get_or_create(Function { name, arity, kind }).0
    }

    pub fn intern_term_object(&mut self, object: ObjectId) -> TermId {
        self.terms.get_or_create(Term::Object(object)).0
    }

    pub fn intern_term_variable(&mut self, variable: VariableId) -> TermId {
        self.terms.get_or_create(Term::Variable(variable)).0
    }

    /// Interns an atom within its predicate's group, returning the composite
    /// `(predicate, local index)` id spec §4.1 describes for grouped stores.
    pub fn intern_atom(&mut self, predicate: PredicateId, terms: Vec<TermId>) -> AtomId {
        let (local, _) = self.atoms.get_or_create(predicate, Atom { predicate, terms });
        AtomId { predicate, local }
    }

    pub fn intern_ground_atom(&mut self, predicate: PredicateId, objects: Vec<ObjectId>) -> GroundAtomId {
        let (local, _) = self.ground_atoms.get_or_create(predicate, GroundAtom { predicate, objects });
        GroundAtomId { predicate, local }
    }

    pub fn get_atom(&self, id: AtomId) -> &Atom {
        self.atoms.get(id.predicate, id.local)
    }

    pub fn get_ground_atom(&self, id: GroundAtomId) -> &GroundAtom {
        self.ground_atoms.get(id.predicate, id.local)
    }

    pub fn find_ground_atom(&self, predicate: PredicateId, objects: &[ObjectId]) -> Option<GroundAtomId> {
        let candidate = GroundAtom { predicate, objects: objects.to_vec() };
        self.ground_atoms.find(predicate, &candidate).map(|local| GroundAtomId { predicate, local })
    }

    pub fn intern_literal(&mut self, atom: AtomId, polarity: bool) -> LiteralId {
        self.literals.get_or_create(Literal { atom, polarity }).0
    }

    pub fn intern_ground_literal(&mut self, atom: GroundAtomId, polarity: bool) -> GroundLiteralId {
        self.ground_literals.get_or_create(GroundLiteral { atom, polarity }).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_object_twice_returns_the_same_id() {
        let mut repo = Repository::new();
        let a = repo.intern_object("truck1");
        let b = repo.intern_object("truck1");
        assert_eq!(a, b);
        assert_eq!(repo.object_name(a), "truck1");
    }

    #[test]
    fn distinct_names_get_distinct_objects() {
        let mut repo = Repository::new();
        let a = repo.intern_object("truck1");
        let b = repo.intern_object("truck2");
        assert_ne!(a, b);
    }

    #[test]
    fn grouped_atom_store_keeps_predicates_in_separate_groups() {
        let mut repo = Repository::new();
        let on = repo.intern_predicate("on", 2, EntityKind::Fluent);
        let clear = repo.intern_predicate("clear", 1, EntityKind::Fluent);
        let a = repo.intern_object("a");
        let b = repo.intern_object("b");
        let ta = repo.intern_term_object(a);
        let tb = repo.intern_term_object(b);
        let on_atom = repo.intern_atom(on, vec![ta, tb]);
        let clear_atom = repo.intern_atom(clear, vec![ta]);
        assert_eq!(on_atom.local, 0);
        assert_eq!(clear_atom.local, 0);
        assert_eq!(repo.atoms.group_len(on), 1);
        assert_eq!(repo.atoms.group_len(clear), 1);
    }
}
