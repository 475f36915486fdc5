//! The decision-DAG node families (spec §4.6), grounded on
//! `original_source/include/tyr/planning/ground_task/match_tree/nodes/{fact_data,variable_data,constraint_data,generator_data}.hpp`:
//! an atom test (`FactSelectorNode` there), a finite-domain-fact test
//! (`VariableSelectorNode`), a numeric-constraint test
//! (`NumericConstraintSelectorNode`), and a generator leaf
//! (`ElementGeneratorNode`).

use formalism::{Canonicalize, GroundActionId, GroundAtomId, GroundAxiomId, GroundNumericConstraint};
use grounding_collections::new_id_type;

new_id_type! {
    /// Identifies an interned [`Node`] within a [`crate::repository::MatchTreeRepository`].
    pub struct NodeId;
}

/// A three-way test on whether a ground atom currently holds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AtomSelector {
    pub atom: GroundAtomId,
    pub present: Option<NodeId>,
    pub absent: Option<NodeId>,
    pub dontcare: Option<NodeId>,
}

/// A value-indexed test on a finite-domain variable, plus a don't-care
/// branch for elements insensitive to this variable.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FactSelector {
    pub variable: usize,
    /// `children[v]` is the branch for value `v`; `None` means no element
    /// reachable through this branch needs a subtree there.
    pub children: Vec<Option<NodeId>>,
    pub dontcare: Option<NodeId>,
}

/// A two-way test on whether a numeric constraint is satisfied.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NumericSelector {
    pub constraint: GroundNumericConstraint,
    pub satisfied: Option<NodeId>,
    pub dontcare: Option<NodeId>,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum GeneratorElement {
    Action(GroundActionId),
    Axiom(GroundAxiomId),
}

/// A leaf enumerating every element whose remaining conditions are
/// satisfied once the path of tests leading here has succeeded.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Generator {
    pub elements: Vec<GeneratorElement>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Node {
    Atom(AtomSelector),
    Fact(FactSelector),
    Numeric(NumericSelector),
    Generator(Generator),
}

fn is_sorted_and_deduped(elements: &[GeneratorElement]) -> bool {
    elements.windows(2).all(|w| w[0] < w[1])
}

impl Canonicalize for Node {
    fn is_canonical(&self) -> bool {
        match self {
            Node::Generator(g) => is_sorted_and_deduped(&g.elements),
            Node::Atom(_) | Node::Fact(_) | Node::Numeric(_) => true,
        }
    }

    fn canonicalize(&mut self) {
        if let Node::Generator(g) = self {
            g.elements.sort();
            g.elements.dedup();
        }
    }
}
