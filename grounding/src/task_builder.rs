//! Semi-naive fixed-point grounding driver (spec §4.4 + §6's `GroundTaskBuilder`).
//!
//! One [`StaticConsistencyGraph`]/[`DeltaKpkc`] pair is built per rule (one
//! per action, one per axiom) ahead of time; `advance_round` feeds each
//! enumerator the current fact set, discovers newly-completable rule
//! bindings, grounds them, and folds the results (action add-effects,
//! axiom derived heads) back into the fact set so the next round's delta
//! sees them. `run_to_fixed_point` drives this to the point spec §2
//! describes ("grounds to fixed point") without naming a type for it —
//! this builder is that type.
//!
//! Relaxed reachability: the fact set this builder grows is monotone (an
//! action's delete effects are never applied to it). That's deliberate —
//! grounding needs to know which ground atoms/actions are *reachable*, not
//! to simulate a particular execution trace; a downstream state-transition
//! layer applies deletes when actually executing a grounded action.

use hashbrown::HashSet;

use formalism::{ActionId, AxiomId, Domain, GroundActionId, GroundAxiomId, GroundAtomId, ObjectId, Repository, RuleId, Task};

use crate::consistency::{literal_holds, StaticConsistencyGraph};
use crate::error::GroundingError;
use crate::graph::Vertex;
use crate::grounder::Grounder;
use crate::kpkc::DeltaKpkc;

enum HeadKind {
    Action(ActionId),
    Axiom(AxiomId),
}

struct RuleEnumerator {
    rule: RuleId,
    head_kind: HeadKind,
    static_graph: StaticConsistencyGraph,
    kpkc: DeltaKpkc,
    /// Head cliques seen in some previous round, for rules whose head
    /// partition count is strictly less than their parameter count (an
    /// axiom with existentially-quantified body-only parameters). A head
    /// already known may only become completable once a later round's
    /// delta adds a non-head edge, so each of these is re-driven through
    /// `for_each_new_rule_clique` every round; `head.len() == k` rules
    /// (every action, and any axiom binding all its parameters in the
    /// head) never populate this, since their head clique already is the
    /// full clique.
    known_heads: Vec<Vec<Vertex>>,
}

pub struct GroundTaskBuilder {
    facts: HashSet<GroundAtomId>,
    static_facts: HashSet<GroundAtomId>,
    objects: Vec<ObjectId>,
    enumerators: Vec<RuleEnumerator>,
    ground_actions: Vec<GroundActionId>,
    ground_axioms: Vec<GroundAxiomId>,
}

fn resolve_binding(static_graph: &StaticConsistencyGraph, vertices: &[Vertex]) -> Vec<ObjectId> {
    let k = static_graph.const_graph.k;
    let mut binding: Vec<Option<ObjectId>> = vec![None; k];
    for &v in vertices {
        let p = static_graph.const_graph.vertex_to_partition[v.0 as usize] as usize;
        binding[p] = Some(static_graph.object_of(p, v));
    }
    binding.into_iter().map(|o| o.expect("a completed clique must bind every rule parameter")).collect()
}

fn residual_literals_hold(repo: &Repository, static_graph: &StaticConsistencyGraph, binding: &[ObjectId], facts: &HashSet<GroundAtomId>) -> bool {
    let bound: Vec<Option<ObjectId>> = binding.iter().copied().map(Some).collect();
    static_graph.residual_literals.iter().all(|&lit| literal_holds(repo, lit, &bound, facts))
}

impl GroundTaskBuilder {
    pub fn new(repo: &Repository, domain: &Domain, task: &Task) -> Result<Self, GroundingError> {
        let objects: Vec<ObjectId> = domain.constants.iter().chain(task.objects.iter()).copied().collect();

        let mut facts: HashSet<GroundAtomId> = HashSet::new();
        facts.extend(task.initial_static_atoms.iter().copied());
        facts.extend(task.initial_fluent_atoms.iter().copied());
        let static_facts: HashSet<GroundAtomId> = task.initial_static_atoms.iter().copied().collect();

        let mut enumerators = Vec::with_capacity(domain.actions.len() + domain.axioms.len());
        for &action_id in &domain.actions {
            let action = repo.actions.get(action_id);
            let rule = repo.rules.get(action.rule).clone();
            let static_graph = StaticConsistencyGraph::build(repo, &rule, &objects, &static_facts)?;
            let kpkc = DeltaKpkc::new(&static_graph);
            enumerators.push(RuleEnumerator {
                rule: action.rule,
                head_kind: HeadKind::Action(action_id),
                static_graph,
                kpkc,
                known_heads: Vec::new(),
            });
        }
        for &axiom_id in &domain.axioms {
            let axiom = repo.axioms.get(axiom_id);
            let rule = repo.rules.get(axiom.rule).clone();
            let static_graph = StaticConsistencyGraph::build(repo, &rule, &objects, &static_facts)?;
            let kpkc = DeltaKpkc::new(&static_graph);
            enumerators.push(RuleEnumerator {
                rule: axiom.rule,
                head_kind: HeadKind::Axiom(axiom_id),
                static_graph,
                kpkc,
                known_heads: Vec::new(),
            });
        }

        tracing::debug!(actions = domain.actions.len(), axioms = domain.axioms.len(), "built ground task builder");
        Ok(GroundTaskBuilder { facts, static_facts, objects, enumerators, ground_actions: Vec::new(), ground_axioms: Vec::new() })
    }

    pub fn ground_actions(&self) -> &[GroundActionId] {
        &self.ground_actions
    }

    pub fn ground_axioms(&self) -> &[GroundAxiomId] {
        &self.ground_axioms
    }

    pub fn facts(&self) -> &HashSet<GroundAtomId> {
        &self.facts
    }

    /// Runs one semi-naive round: recomputes every rule's delta against the
    /// current fact set, grounds every new binding, and returns whether
    /// anything new (a ground action, a ground axiom, or a derived fact)
    /// was produced.
    pub fn advance_round(&mut self, repo: &mut Repository) -> bool {
        let mut progressed = false;

        for enumerator in &mut self.enumerators {
            enumerator.kpkc.set_next_assignment_sets(&enumerator.static_graph, repo, &self.facts);

            let k = enumerator.static_graph.const_graph.k;
            let mut heads: Vec<Vec<Vertex>> = Vec::new();
            enumerator.kpkc.for_each_new_head_clique(&enumerator.static_graph, |vertices| {
                heads.push(vertices.to_vec());
                true
            });

            let mut bindings: Vec<Vec<ObjectId>> = Vec::new();

            // Case 2: a head bound in some earlier round may only become
            // completable now, because this round's delta added a non-head
            // edge that wasn't there before. Re-drive every previously
            // known head through the delta-only entry point before folding
            // in this round's own new heads.
            for head in &enumerator.known_heads {
                enumerator.kpkc.for_each_new_rule_clique(&enumerator.static_graph, head, |vertices| {
                    bindings.push(resolve_binding(&enumerator.static_graph, vertices));
                    true
                });
            }

            // Case 1: heads that are themselves new this round, completed
            // exhaustively (any vertex consistent with the head extends it,
            // whether or not that vertex is itself part of this round's delta).
            for head in &heads {
                if head.len() == k {
                    bindings.push(resolve_binding(&enumerator.static_graph, head));
                } else {
                    enumerator.kpkc.for_each_rule_clique(&enumerator.static_graph, head, |vertices| {
                        bindings.push(resolve_binding(&enumerator.static_graph, vertices));
                        true
                    });
                    if !enumerator.known_heads.contains(head) {
                        enumerator.known_heads.push(head.clone());
                    }
                }
            }

            if bindings.is_empty() {
                continue;
            }

            bindings.retain(|b| residual_literals_hold(repo, &enumerator.static_graph, b, &self.facts));

            let mut grounder = Grounder::new(repo);
            for binding in bindings {
                let ground_rule = grounder.ground_rule(enumerator.rule, &binding);
                let ground_rule_id = grounder.intern_ground_rule(ground_rule.clone());

                match enumerator.head_kind {
                    HeadKind::Action(action_id) => {
                        let ga = grounder.ground_action(action_id, ground_rule_id, &binding, &self.objects);
                        let new_atoms: Vec<GroundAtomId> = ga.effects.iter().flat_map(|e| e.add.iter().copied()).collect();
                        let (id, fresh) = grounder.repo_mut().ground_actions.get_or_create(ga);
                        if fresh {
                            progressed = true;
                            self.ground_actions.push(id);
                        }
                        for atom in new_atoms {
                            if self.facts.insert(atom) {
                                progressed = true;
                            }
                        }
                    }
                    HeadKind::Axiom(axiom_id) => {
                        let gx = grounder.ground_axiom(axiom_id, ground_rule_id);
                        let (id, fresh) = grounder.repo_mut().ground_axioms.get_or_create(gx);
                        if fresh {
                            progressed = true;
                            self.ground_axioms.push(id);
                        }
                        if self.facts.insert(ground_rule.head) {
                            progressed = true;
                        }
                    }
                }
            }
        }

        tracing::debug!(
            facts = self.facts.len(),
            ground_actions = self.ground_actions.len(),
            ground_axioms = self.ground_axioms.len(),
            progressed,
            "completed grounding round"
        );
        progressed
    }

    pub fn run_to_fixed_point(&mut self, repo: &mut Repository) {
        let mut rounds = 0u32;
        while self.advance_round(repo) {
            rounds += 1;
        }
        tracing::debug!(rounds, facts = self.facts.len(), "reached grounding fixed point");
    }
}
