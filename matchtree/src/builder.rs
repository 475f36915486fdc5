//! Discrimination-tree construction: repeatedly pick a remaining literal
//! (then, once none remain, a remaining numeric constraint) to split the
//! candidate set into "requires true" / "requires false" (or, for numeric
//! constraints, "requires satisfied") / "don't care" groups, recursing into
//! each until every group's candidates have no conditions left to test.
//!
//! Static-body literals never appear here: by the time a ground action or
//! axiom exists, its static preconditions already held at grounding time
//! and can never change, so only the fluent/derived body and numeric body
//! need a runtime test.
//!
//! The builder only emits [`crate::node::Node::Atom`] and
//! [`crate::node::Node::Numeric`] selectors. [`crate::node::Node::Fact`]
//! (a value-indexed finite-domain test) is part of the node vocabulary for
//! callers that construct or consume trees directly, but synthesizing it
//! from a mutex-group `FDRVariable` would need per-candidate branch
//! replication for negative literals that this builder does not perform.

use formalism::{GroundActionId, GroundAtomId, GroundAxiomId, GroundNumericConstraint, Repository};

use crate::node::{AtomSelector, Generator, GeneratorElement, Node, NodeId, NumericSelector};
use crate::repository::MatchTreeRepository;

struct Candidate {
    element: GeneratorElement,
    literals: Vec<(GroundAtomId, bool)>,
    numeric: Vec<GroundNumericConstraint>,
}

pub struct MatchTreeBuilder<'a> {
    repo: &'a Repository,
}

impl<'a> MatchTreeBuilder<'a> {
    pub fn new(repo: &'a Repository) -> Self {
        MatchTreeBuilder { repo }
    }

    pub fn build_actions(&self, tree: &mut MatchTreeRepository, actions: impl IntoIterator<Item = GroundActionId>) -> Option<NodeId> {
        let candidates = actions.into_iter().map(|id| self.action_candidate(id)).collect();
        self.build(tree, candidates)
    }

    pub fn build_axioms(&self, tree: &mut MatchTreeRepository, axioms: impl IntoIterator<Item = GroundAxiomId>) -> Option<NodeId> {
        let candidates = axioms.into_iter().map(|id| self.axiom_candidate(id)).collect();
        self.build(tree, candidates)
    }

    fn action_candidate(&self, id: GroundActionId) -> Candidate {
        let action = self.repo.ground_actions.get(id);
        let rule = self.repo.ground_rules.get(action.ground_rule);
        Candidate { element: GeneratorElement::Action(id), literals: self.resolve_literals(rule), numeric: rule.numeric_body.clone() }
    }

    fn axiom_candidate(&self, id: GroundAxiomId) -> Candidate {
        let axiom = self.repo.ground_axioms.get(id);
        let rule = self.repo.ground_rules.get(axiom.ground_rule);
        Candidate { element: GeneratorElement::Axiom(id), literals: self.resolve_literals(rule), numeric: rule.numeric_body.clone() }
    }

    fn resolve_literals(&self, rule: &formalism::GroundRule) -> Vec<(GroundAtomId, bool)> {
        rule.fluent_body
            .iter()
            .chain(rule.derived_body.iter())
            .map(|&id| {
                let literal = self.repo.ground_literals.get(id);
                (literal.atom, literal.polarity)
            })
            .collect()
    }

    fn build(&self, tree: &mut MatchTreeRepository, candidates: Vec<Candidate>) -> Option<NodeId> {
        if candidates.is_empty() {
            return None;
        }

        if candidates.iter().all(|c| c.literals.is_empty() && c.numeric.is_empty()) {
            let elements = candidates.into_iter().map(|c| c.element).collect();
            return Some(tree.intern(Node::Generator(Generator { elements })));
        }

        if let Some(atom) = candidates.iter().find_map(|c| c.literals.first().map(|&(atom, _)| atom)) {
            return Some(self.split_on_atom(tree, candidates, atom));
        }

        let constraint = candidates.iter().find_map(|c| c.numeric.first().cloned()).expect("non-empty remaining conditions");
        Some(self.split_on_numeric(tree, candidates, constraint))
    }

    fn split_on_atom(&self, tree: &mut MatchTreeRepository, candidates: Vec<Candidate>, atom: GroundAtomId) -> NodeId {
        let mut present = Vec::new();
        let mut absent = Vec::new();
        let mut dontcare = Vec::new();

        for mut candidate in candidates {
            if let Some(pos) = candidate.literals.iter().position(|&(a, _)| a == atom) {
                let (_, polarity) = candidate.literals.remove(pos);
                if polarity {
                    present.push(candidate);
                } else {
                    absent.push(candidate);
                }
            } else {
                dontcare.push(candidate);
            }
        }

        let present = self.build(tree, present);
        let absent = self.build(tree, absent);
        let dontcare = self.build(tree, dontcare);
        tree.intern(Node::Atom(AtomSelector { atom, present, absent, dontcare }))
    }

    fn split_on_numeric(&self, tree: &mut MatchTreeRepository, candidates: Vec<Candidate>, constraint: GroundNumericConstraint) -> NodeId {
        let mut satisfied = Vec::new();
        let mut dontcare = Vec::new();

        for mut candidate in candidates {
            if let Some(pos) = candidate.numeric.iter().position(|c| *c == constraint) {
                candidate.numeric.remove(pos);
                satisfied.push(candidate);
            } else {
                dontcare.push(candidate);
            }
        }

        let satisfied = self.build(tree, satisfied);
        let dontcare = self.build(tree, dontcare);
        tree.intern(Node::Numeric(NumericSelector { constraint, satisfied, dontcare }))
    }
}
