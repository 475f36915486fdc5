//! A reference implementation of the [`crate::raw`] traits over plain
//! struct trees — no text parsing involved. Exists purely so this crate's
//! (and `planning`'s) tests can build domains/problems without a real
//! PDDL front end, grounded on `original_source/src/planning/parser.cpp`'s
//! shape: a thin adapter over an already-parsed tree, not a tokenizer.

use crate::raw::{
    RawAction, RawAxiom, RawCondition, RawConditionalEffect, RawDomain, RawExpr, RawLiteral, RawMetricObjective,
    RawProblem,
};

#[derive(Clone, Default)]
pub struct TreeAction {
    pub name: String,
    pub parameters: Vec<String>,
    pub precondition: RawCondition,
    pub effects: Vec<RawConditionalEffect>,
}

impl RawAction for TreeAction {
    fn name(&self) -> &str {
        &self.name
    }
    fn parameters(&self) -> &[String] {
        &self.parameters
    }
    fn precondition(&self) -> &RawCondition {
        &self.precondition
    }
    fn effects(&self) -> &[RawConditionalEffect] {
        &self.effects
    }
}

#[derive(Clone, Default)]
pub struct TreeAxiom {
    pub parameters: Vec<String>,
    pub body: RawCondition,
    pub head_predicate: String,
    pub head_args: Vec<String>,
}

impl RawAxiom for TreeAxiom {
    fn parameters(&self) -> &[String] {
        &self.parameters
    }
    fn body(&self) -> &RawCondition {
        &self.body
    }
    fn head(&self) -> (&str, &[String]) {
        (&self.head_predicate, &self.head_args)
    }
}

#[derive(Clone, Default)]
pub struct TreeDomain {
    pub name: String,
    pub predicates: Vec<(String, u32)>,
    pub functions: Vec<(String, u32)>,
    pub constants: Vec<String>,
    pub actions: Vec<TreeAction>,
    pub axioms: Vec<TreeAxiom>,
}

impl RawDomain for TreeDomain {
    type Action = TreeAction;
    type Axiom = TreeAxiom;

    fn name(&self) -> &str {
        &self.name
    }
    fn predicate_signatures(&self) -> Vec<(String, u32)> {
        self.predicates.clone()
    }
    fn function_signatures(&self) -> Vec<(String, u32)> {
        self.functions.clone()
    }
    fn constants(&self) -> &[String] {
        &self.constants
    }
    fn actions(&self) -> &[TreeAction] {
        &self.actions
    }
    fn axioms(&self) -> &[TreeAxiom] {
        &self.axioms
    }
}

#[derive(Clone, Default)]
pub struct TreeProblem {
    pub objects: Vec<String>,
    pub initial_literals: Vec<RawLiteral>,
    pub initial_function_values: Vec<((String, Vec<crate::raw::RawTerm>), i64)>,
    pub goal: RawCondition,
    pub metric: Option<(RawMetricObjective, RawExpr)>,
}

impl RawProblem for TreeProblem {
    fn objects(&self) -> &[String] {
        &self.objects
    }
    fn initial_literals(&self) -> &[RawLiteral] {
        &self.initial_literals
    }
    fn initial_function_values(&self) -> &[((String, Vec<crate::raw::RawTerm>), i64)] {
        &self.initial_function_values
    }
    fn goal(&self) -> &RawCondition {
        &self.goal
    }
    fn metric(&self) -> Option<(RawMetricObjective, &RawExpr)> {
        self.metric.as_ref().map(|(objective, expr)| (*objective, expr))
    }
}
