//! Action/axiom/rule/task-level entities: the formalism's "planning" layer,
//! built on top of the `lang` sub-language.

mod domain;
mod rule;
mod task;

pub use domain::Domain;
pub use rule::{
    Action, Axiom, GroundAction, GroundAxiom, GroundConditionalEffect, GroundNumericConstraint, GroundNumericEffect, GroundRule, Metric,
    MetricObjective, Rule,
};
pub use task::Task;
