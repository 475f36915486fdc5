use crate::ids::{GroundAtomId, GroundFunctionValueId, MetricId, ObjectId};

/// A problem instance over a [`super::Domain`]: the task-specific objects,
/// the initial state, the goal, and an optional metric to optimise.
#[derive(Clone, Debug, Default)]
pub struct Task {
    pub name: String,
    pub objects: Vec<ObjectId>,
    pub initial_static_atoms: Vec<GroundAtomId>,
    pub initial_fluent_atoms: Vec<GroundAtomId>,
    pub initial_function_values: Vec<GroundFunctionValueId>,
    pub goal: Vec<GroundAtomId>,
    pub metric: Option<MetricId>,
}
