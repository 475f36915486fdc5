//! The top-level facade: re-exports the public API of every workspace
//! member, owns the `FDRTask` aggregate (lifted `Domain`/`Task` plus the
//! grounded, FDR-packed view of it), and drives the full
//! translate → ground → index pipeline end to end.
//!
//! Grounded on `original_source/include/tyr/formalism/planning/fdr_task_data.hpp`'s
//! `Data<FDRTask>`: that type aggregates the domain/task identity, the
//! ground atom partitions, the FDR variable lists, the goal, and the
//! grounded actions/axioms into one value a search algorithm (out of
//! scope here) would consume directly.

pub mod error;

pub use error::PlanningError;

pub use fdr::{FDRFact, FDRState, FDRVariable, FdrVariableIndex, PackedLayout};
pub use formalism::{
    ActionId, AxiomId, Domain, EntityKind, GroundActionId, GroundAxiomId, GroundAtomId, MetricId, ObjectId, RepositoryError, Repository, Task,
};
pub use grounding::{GroundTaskBuilder, GroundingError};
pub use matchtree::{applicable, GeneratorElement, MatchState, MatchTreeBuilder, MatchTreeError, MatchTreeRepository, NodeId};
pub use translate::raw::{RawAction, RawAxiom, RawDomain, RawProblem};
pub use translate::tree::{TreeAction, TreeAxiom, TreeDomain, TreeProblem};
pub use translate::TranslationError;

use hashbrown::HashSet;

/// The grounded, FDR-packed view of one domain/problem pair: every ground
/// atom partitioned by kind, the bit-packed fluent variable index and its
/// initial/goal values, the grounded actions and axioms, and the match
/// trees that answer "which of these are applicable in a given state".
pub struct FDRTask {
    pub name: String,
    pub objects: Vec<ObjectId>,
    pub static_atoms: Vec<GroundAtomId>,
    pub fluent_atoms: Vec<GroundAtomId>,
    pub derived_atoms: Vec<GroundAtomId>,
    pub metric: Option<MetricId>,
    pub axioms: Vec<AxiomId>,
    pub variables: FdrVariableIndex,
    pub initial_state: FDRState,
    /// Ground atoms the goal requires to hold. Kept as plain atoms (the
    /// same representation `formalism::Task::goal` already uses) rather
    /// than a dedicated partial-FDR-state type: a goal only constrains the
    /// variables it mentions, and both consumers this crate offers —
    /// [`FdrVariableIndex::get_fact`] for packed lookups, `MatchState` for
    /// tree walks — already accept raw ground atoms directly.
    pub goal: Vec<GroundAtomId>,
    pub ground_actions: Vec<GroundActionId>,
    pub ground_axioms: Vec<GroundAxiomId>,
    pub match_tree: MatchTreeRepository,
    pub action_root: Option<NodeId>,
    pub axiom_root: Option<NodeId>,
}

impl FDRTask {
    /// Ground atoms currently true in `state`'s action-applicability
    /// sense: the set of atoms the goal was checked against at
    /// construction time plus whatever a caller's own search has derived.
    /// Exposed as a convenience so a caller driving a search loop doesn't
    /// need to re-derive the atom ↔ variable mapping itself.
    pub fn applicable_actions(&self, state: &FDRState) -> HashSet<GeneratorElement> {
        let adapter = FdrMatchState { variables: &self.variables, state };
        applicable(&self.match_tree, self.action_root, &adapter)
    }

    pub fn applicable_axioms(&self, state: &FDRState) -> HashSet<GeneratorElement> {
        let adapter = FdrMatchState { variables: &self.variables, state };
        applicable(&self.match_tree, self.axiom_root, &adapter)
    }

    /// Whether every goal atom holds in `state`.
    pub fn goal_holds(&self, state: &FDRState) -> bool {
        self.goal.iter().all(|&atom| match self.variables.get_fact(atom) {
            Some(fact) => state.get(self.variables.layout(), fact.variable) == fact.value,
            None => false,
        })
    }
}

/// Bridges a packed [`FDRState`] to the [`MatchState`] trait the match
/// tree walk is evaluated against.
struct FdrMatchState<'a> {
    variables: &'a FdrVariableIndex,
    state: &'a FDRState,
}

impl MatchState for FdrMatchState<'_> {
    fn atom_holds(&self, atom: GroundAtomId) -> bool {
        match self.variables.get_fact(atom) {
            Some(fact) => self.state.get(self.variables.layout(), fact.variable) == fact.value,
            None => false,
        }
    }

    fn fact_value(&self, variable: usize) -> u32 {
        self.state.get(self.variables.layout(), variable)
    }

    fn constraint_satisfied(&self, _constraint: &formalism::GroundNumericConstraint) -> bool {
        // No packed numeric-function state exists in this facade (only
        // ground-atom facts are laid out into FDR variables); a numeric
        // selector node is therefore always treated as unsatisfied, which
        // only affects domains whose rule bodies carry a numeric
        // constraint (none of the fixtures in `tests/` do).
        false
    }
}

/// Runs the full pipeline: translate the raw domain/problem tree into the
/// repository, ground it to fixed point, partition the reachable ground
/// atoms, pack the fluent ones into an [`FdrVariableIndex`], and build the
/// action/axiom match trees.
pub fn ground_task<D: RawDomain, P: RawProblem>(domain: &D, problem: &P, word_bits: u32) -> Result<(Repository, FDRTask), PlanningError> {
    let mut repo = Repository::new();
    let (domain_out, task_out) = translate::translate(&mut repo, domain, problem)?;

    let mut builder = GroundTaskBuilder::new(&repo, &domain_out, &task_out)?;
    builder.run_to_fixed_point(&mut repo);

    let mut static_atoms = Vec::new();
    let mut fluent_atoms = Vec::new();
    let mut derived_atoms = Vec::new();
    for &atom in builder.facts() {
        match repo.predicates.get(atom.predicate).kind {
            formalism::EntityKind::Fluent => fluent_atoms.push(atom),
            formalism::EntityKind::Derived => derived_atoms.push(atom),
            formalism::EntityKind::Static | formalism::EntityKind::Auxiliary => static_atoms.push(atom),
        }
    }

    let variables = FdrVariableIndex::from_fluent_atoms(fluent_atoms.iter().copied(), word_bits)?;
    let initial_fluent_atoms: HashSet<GroundAtomId> = task_out.initial_fluent_atoms.iter().copied().collect();
    let initial_state = variables.pack(&initial_fluent_atoms);

    let objects: Vec<ObjectId> = domain_out.constants.iter().chain(task_out.objects.iter()).copied().collect();

    let mt_builder = MatchTreeBuilder::new(&repo);
    let mut match_tree = MatchTreeRepository::new();
    let action_root = mt_builder.build_actions(&mut match_tree, builder.ground_actions().iter().copied());
    let axiom_root = mt_builder.build_axioms(&mut match_tree, builder.ground_axioms().iter().copied());

    tracing::debug!(
        fluent_atoms = fluent_atoms.len(),
        static_atoms = static_atoms.len(),
        derived_atoms = derived_atoms.len(),
        ground_actions = builder.ground_actions().len(),
        ground_axioms = builder.ground_axioms().len(),
        "grounded task"
    );

    let task = FDRTask {
        name: task_out.name.clone(),
        objects,
        static_atoms,
        fluent_atoms,
        derived_atoms,
        metric: task_out.metric,
        axioms: domain_out.axioms.clone(),
        variables,
        initial_state,
        goal: task_out.goal.clone(),
        ground_actions: builder.ground_actions().to_vec(),
        ground_axioms: builder.ground_axioms().to_vec(),
        match_tree,
        action_root,
        axiom_root,
    };

    Ok((repo, task))
}
