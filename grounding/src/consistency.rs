//! Per-rule static consistency graph (spec §4.3) plus the per-round
//! vertex/edge consistency checks the delta k-partite enumerator's `full`
//! graph is rebuilt from (spec §4.4's `assignment_sets` parameter — played
//! here directly by the live [`Repository`], since fluent/derived ground
//! truth already lives there and a separate read-only snapshot type would
//! just be a second name for the same data).
//!
//! Grounded on `original_source/src/datalog/delta_kpkc_new.cpp`'s
//! `allocate_const_graph`: the skeleton (partitions, head/non-head vertex
//! sets) is built once from the rule's *static* body, exactly as spec §4.3
//! says it must be ("static atoms do not change during evaluation"). The
//! per-round `full` graph additionally folds in unary/binary *fluent* and
//! *derived* literals so the enumerator does not have to re-verify those by
//! callback for every candidate clique; literals spanning three or more
//! distinct parameters (or zero) cannot be represented as vertex/edge bits
//! and are kept as `residual` literals checked once per completed clique —
//! the same "post-filter" resolution spec §9 already applies to numeric
//! constraints.

use hashbrown::{HashMap, HashSet};

use env_param::EnvParam;
use formalism::{GroundAtomId, LiteralId, ObjectId, Repository, Rule, Term};

use crate::error::GroundingError;
use crate::graph::{ConstGraph, Edge, Vertex};

/// Upper bound on a rule's parameter count. The const graph allocates one
/// partition per parameter and one vertex per `(partition, object)` pair;
/// an arity beyond this is almost certainly a malformed domain rather than
/// a legitimate large action, so it is rejected rather than allowed to
/// allocate unboundedly.
static MAX_ARITY: EnvParam<usize> = EnvParam::new("GROUNDING_MAX_ARITY", "16");

/// Distinct rule-parameter positions an atom's term list mentions, sorted
/// and deduplicated (constants contribute nothing).
fn distinct_positions(repo: &Repository, terms: &[formalism::TermId]) -> Vec<u32> {
    let mut positions: Vec<u32> = terms
        .iter()
        .filter_map(|&t| match repo.terms.get(t) {
            Term::Variable(v) => Some(v.to_u32()),
            Term::Object(_) => None,
        })
        .collect();
    positions.sort_unstable();
    positions.dedup();
    positions
}

/// Resolves an atom's terms to a full object tuple given a partial
/// parameter binding; `None` if some referenced position is unbound.
fn resolve_objects(repo: &Repository, terms: &[formalism::TermId], binding: &[Option<ObjectId>]) -> Option<Vec<ObjectId>> {
    terms
        .iter()
        .map(|&t| match repo.terms.get(t) {
            Term::Object(o) => Some(*o),
            Term::Variable(v) => binding.get(v.to_usize()).copied().flatten(),
        })
        .collect()
}

pub(crate) fn literal_holds(repo: &Repository, literal: LiteralId, binding: &[Option<ObjectId>], facts: &HashSet<GroundAtomId>) -> bool {
    let lit = repo.literals.get(literal);
    let atom = repo.get_atom(lit.atom);
    let Some(objects) = resolve_objects(repo, &atom.terms, binding) else {
        return true; // unbound positions aren't checked at this stage
    };
    let present = repo.find_ground_atom(atom.predicate, &objects).map(|g| facts.contains(&g)).unwrap_or(false);
    present == lit.polarity
}

pub struct StaticConsistencyGraph {
    pub const_graph: ConstGraph,
    dynamic_unary: Vec<Vec<LiteralId>>,
    dynamic_binary: HashMap<(u32, u32), Vec<LiteralId>>,
    /// Fluent/derived literals mentioning 0 or ≥3 distinct parameters:
    /// can't be folded into vertex/edge bits, checked once per completed
    /// clique instead.
    pub residual_literals: Vec<LiteralId>,
    /// Set by construction when a 0-ary static literal fails against the
    /// fixed static extension: no binding of this rule can ever be
    /// consistent, so enumeration short-circuits to nothing.
    pub unsatisfiable: bool,
    /// `vertex_objects[p][i]` is the object bound to the `i`-th vertex of
    /// partition `p` (`const_graph.partitions[p][i]`).
    vertex_objects: Vec<Vec<ObjectId>>,
    /// Static adjacency (binary static literals + "distinct objects"),
    /// baked once; per-round `consistent_edges` intersects with this.
    static_adjacency: Vec<grounding_collections::Bitset>,
}

impl StaticConsistencyGraph {
    pub fn build(repo: &Repository, rule: &Rule, objects: &[ObjectId], static_facts: &HashSet<GroundAtomId>) -> Result<Self, GroundingError> {
        let k = rule.parameters.len();
        let max_arity = MAX_ARITY.get();
        if k > max_arity {
            tracing::error!(k, max_arity, "rule parameter count exceeds GROUNDING_MAX_ARITY");
            return Err(GroundingError::CapacityExceeded(format!("rule has {k} parameters, exceeds GROUNDING_MAX_ARITY={max_arity}")));
        }

        let mut static_unary: Vec<Vec<LiteralId>> = vec![Vec::new(); k];
        let mut static_binary: HashMap<(u32, u32), Vec<LiteralId>> = HashMap::new();
        let mut dynamic_unary: Vec<Vec<LiteralId>> = vec![Vec::new(); k];
        let mut dynamic_binary: HashMap<(u32, u32), Vec<LiteralId>> = HashMap::new();
        let mut residual_literals = Vec::new();
        let mut unsatisfiable = false;

        for &lit_id in &rule.static_body {
            let lit = repo.literals.get(lit_id);
            let atom = repo.get_atom(lit.atom);
            let positions = distinct_positions(repo, &atom.terms);
            match positions.as_slice() {
                [] => {
                    let no_binding = vec![None; k];
                    if !literal_holds(repo, lit_id, &no_binding, static_facts) {
                        unsatisfiable = true;
                    }
                }
                [p] => static_unary[*p as usize].push(lit_id),
                [p, q] => static_binary.entry((*p, *q)).or_default().push(lit_id),
                _ => residual_literals.push(lit_id),
            }
        }

        for &lit_id in rule.fluent_body.iter().chain(rule.derived_body.iter()) {
            let lit = repo.literals.get(lit_id);
            let atom = repo.get_atom(lit.atom);
            let positions = distinct_positions(repo, &atom.terms);
            match positions.as_slice() {
                [p] => dynamic_unary[*p as usize].push(lit_id),
                [p, q] => dynamic_binary.entry((*p, *q)).or_default().push(lit_id),
                _ => residual_literals.push(lit_id),
            }
        }

        let mut next_vertex = 0u32;
        let mut partitions: Vec<Vec<Vertex>> = Vec::with_capacity(k);
        // parallel table: for partition p, Vertex index -> ObjectId, needed
        // to re-check binary constraints and to resolve final bindings.
        let mut vertex_objects: Vec<Vec<ObjectId>> = Vec::with_capacity(k);

        for p in 0..k {
            let mut binding = vec![None; k];
            let mut verts = Vec::new();
            let mut objs = Vec::new();
            for &o in objects {
                binding[p] = Some(o);
                if static_unary[p].iter().all(|&lit| literal_holds(repo, lit, &binding, static_facts)) {
                    verts.push(Vertex(next_vertex));
                    objs.push(o);
                    next_vertex += 1;
                }
                binding[p] = None;
            }
            partitions.push(verts);
            vertex_objects.push(objs);
        }

        let head_positions: Vec<usize> =
            distinct_positions(repo, &repo.get_atom(rule.head).terms).into_iter().map(|p| p as usize).collect();

        let const_graph = ConstGraph::new(partitions, &head_positions);
        tracing::debug!(k, vertices = const_graph.num_vertices, "built static consistency graph");

        Ok(StaticConsistencyGraph {
            const_graph,
            dynamic_unary,
            dynamic_binary,
            residual_literals,
            unsatisfiable,
            vertex_objects: Vec::new(),
            static_adjacency: Vec::new(),
        }
        .with_static_binary_and_objects(repo, &static_binary, vertex_objects, static_facts))
    }

    /// Second pass: record, per const-graph vertex, its object id (needed
    /// to check binary literals and to resolve final bindings), and bake
    /// static binary constraints (plus the "distinct objects" rule) into a
    /// private adjacency bitset reused by every round's `consistent_edges`.
    fn with_static_binary_and_objects(
        self,
        repo: &Repository,
        static_binary: &HashMap<(u32, u32), Vec<LiteralId>>,
        vertex_objects: Vec<Vec<ObjectId>>,
        static_facts: &HashSet<GroundAtomId>,
    ) -> Self {
        let mut graph = self;
        graph.vertex_objects = vertex_objects;
        graph.static_adjacency = {
            let n = graph.const_graph.num_vertices;
            let mut adj = vec![grounding_collections::Bitset::with_capacity(n); n];
            let k = graph.const_graph.k;
            for p in 0..k {
                for q in (p + 1)..k {
                    let binary_lits = static_binary.get(&(p as u32, q as u32));
                    for &u in &graph.const_graph.partitions[p] {
                        for &v in &graph.const_graph.partitions[q] {
                            let ou = graph.vertex_objects[p][graph.local_index(p, u)];
                            let ov = graph.vertex_objects[q][graph.local_index(q, v)];
                            if ou == ov {
                                continue;
                            }
                            let ok = binary_lits.map_or(true, |lits| {
                                let mut binding = vec![None; k];
                                binding[p] = Some(ou);
                                binding[q] = Some(ov);
                                lits.iter().all(|&lit| literal_holds(repo, lit, &binding, static_facts))
                            });
                            if ok {
                                adj[u.0 as usize].set(v.0 as usize, true);
                                adj[v.0 as usize].set(u.0 as usize, true);
                            }
                        }
                    }
                }
            }
            adj
        };
        graph
    }

    fn local_index(&self, partition: usize, vertex: Vertex) -> usize {
        self.const_graph.partitions[partition].iter().position(|&v| v == vertex).expect("vertex belongs to its partition")
    }

    /// Every vertex consistent with the static skeleton *and* the current
    /// fluent/derived extensions held by `repo`.
    pub fn consistent_vertices(&self, repo: &Repository, facts: &HashSet<GroundAtomId>) -> Vec<Vertex> {
        if self.unsatisfiable {
            return Vec::new();
        }
        let mut out = Vec::new();
        for p in 0..self.const_graph.k {
            for (i, &v) in self.const_graph.partitions[p].iter().enumerate() {
                let o = self.vertex_objects[p][i];
                let mut binding = vec![None; self.const_graph.k];
                binding[p] = Some(o);
                if self.dynamic_unary[p].iter().all(|&lit| literal_holds(repo, lit, &binding, facts)) {
                    out.push(v);
                }
            }
        }
        out
    }

    /// Every edge consistent with the static adjacency *and* the current
    /// fluent/derived extensions, restricted to `vertices` (the output of
    /// [`Self::consistent_vertices`]).
    pub fn consistent_edges(&self, repo: &Repository, vertices: &[Vertex], facts: &HashSet<GroundAtomId>) -> Vec<Edge> {
        if self.unsatisfiable {
            return Vec::new();
        }
        let member = {
            let mut b = grounding_collections::Bitset::with_capacity(self.const_graph.num_vertices);
            for &v in vertices {
                b.set(v.0 as usize, true);
            }
            b
        };
        let mut out = Vec::new();
        for &u in vertices {
            let pu = self.const_graph.vertex_to_partition[u.0 as usize] as usize;
            for w in self.static_adjacency[u.0 as usize].ones() {
                let w = w as u32;
                if w <= u.0 || !member.test(w as usize) {
                    continue;
                }
                let v = Vertex(w);
                let pv = self.const_graph.vertex_to_partition[v.0 as usize] as usize;
                let (p, q, smaller, larger) = if pu < pv { (pu, pv, u, v) } else { (pv, pu, v, u) };
                let lits = self.dynamic_binary.get(&(p as u32, q as u32));
                let ok = lits.map_or(true, |lits| {
                    let mut binding = vec![None; self.const_graph.k];
                    binding[p] = Some(self.vertex_objects[p][self.local_index(p, smaller)]);
                    binding[q] = Some(self.vertex_objects[q][self.local_index(q, larger)]);
                    lits.iter().all(|&lit| literal_holds(repo, lit, &binding, facts))
                });
                if ok {
                    out.push(Edge::new(u, v));
                }
            }
        }
        out
    }

    pub fn object_of(&self, partition: usize, vertex: Vertex) -> ObjectId {
        self.vertex_objects[partition][self.local_index(partition, vertex)]
    }
}
