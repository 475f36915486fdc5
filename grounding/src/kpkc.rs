//! The delta k-partite clique enumerator (spec §4.4), the algorithmic
//! core of the grounding crate.
//!
//! Faithfully ports `original_source/include/tyr/datalog/delta_kpkc_new.hpp`
//! and `.../src/datalog/delta_kpkc_new.cpp`: `set_next_assignment_sets`'s
//! swap-then-XOR-then-AND delta recomputation, the anchor/rank/monotone
//! pruning in `complete_from_seed`, and the `for_each_*` entry points
//! specialised for head arity 0/1/2 with a generic recursive path for
//! arity ≥ 3. `for_each_new_rule_clique`/`for_each_rule_clique` are stubs
//! in the original (marked as an open question there); this port gives
//! them the same anchor-seed-then-recurse treatment as the head variants,
//! parameterised over a fixed head clique instead of discovering one.

use grounding_collections::Bitset;
use hashbrown::HashSet;

use formalism::{GroundAtomId, Repository};

use crate::consistency::StaticConsistencyGraph;
use crate::graph::{ConstGraph, Edge, Graph, Vertex, Workspace};

pub struct DeltaKpkc {
    delta_graph: Graph,
    full_graph: Graph,
    workspace: Workspace,
}

impl DeltaKpkc {
    pub fn new(static_graph: &StaticConsistencyGraph) -> Self {
        let n = static_graph.const_graph.num_vertices;
        DeltaKpkc {
            delta_graph: Graph::empty(n),
            full_graph: Graph::empty(n),
            workspace: Workspace::empty(&static_graph.const_graph),
        }
    }

    fn const_graph<'a>(&self, static_graph: &'a StaticConsistencyGraph) -> &'a ConstGraph {
        &static_graph.const_graph
    }

    /// Swaps delta↔full, recomputes `full` from the current assignment
    /// sets (the live repository's fluent/derived ground atoms), then sets
    /// `delta = (old XOR new) AND new` for vertices and every adjacency
    /// row — exactly the original's three-step dance.
    pub fn set_next_assignment_sets(&mut self, static_graph: &StaticConsistencyGraph, repo: &Repository, facts: &HashSet<GroundAtomId>) {
        std::mem::swap(&mut self.delta_graph, &mut self.full_graph);

        self.full_graph.vertices.clear();
        let consistent_vertices = static_graph.consistent_vertices(repo, facts);
        for v in &consistent_vertices {
            self.full_graph.vertices.set(v.0 as usize, true);
        }

        for row in &mut self.full_graph.adjacency_matrix {
            row.clear();
        }
        for edge in static_graph.consistent_edges(repo, &consistent_vertices, facts) {
            self.full_graph.set_edge(edge);
        }

        let k = static_graph.const_graph.k;
        for p in 0..k {
            self.workspace.compatible_vertices[0][p] = Bitset::with_capacity(static_graph.const_graph.partitions[p].len());
            for i in 0..static_graph.const_graph.partitions[p].len() {
                self.workspace.compatible_vertices[0][p].set(i, true);
            }
        }
        self.workspace.partition_bits.clear();

        let mut new_vertices = self.full_graph.vertices.clone();
        new_vertices.xor_into(&self.delta_graph.vertices);
        new_vertices.intersect_with(&self.full_graph.vertices);
        self.delta_graph.vertices = new_vertices;

        for i in 0..static_graph.const_graph.num_vertices {
            let mut new_row = self.full_graph.adjacency_matrix[i].clone();
            new_row.xor_into(&self.delta_graph.adjacency_matrix[i]);
            new_row.intersect_with(&self.full_graph.adjacency_matrix[i]);
            self.delta_graph.adjacency_matrix[i] = new_row;
        }
    }

    pub fn reset(&mut self) {
        self.delta_graph.reset();
        self.full_graph.reset();
    }

    fn edge_rank(&self, static_graph: &StaticConsistencyGraph, edge: Edge) -> u64 {
        edge.src.0 as u64 * static_graph.const_graph.num_vertices as u64 + edge.dst.0 as u64
    }

    fn is_vertex_compatible_with_anchor(&self, static_graph: &StaticConsistencyGraph, edge: Edge, vertex: Vertex) -> bool {
        let e1 = Edge::new(edge.src, vertex);
        let e2 = Edge::new(edge.dst, vertex);
        self.full_graph.contains_vertex(vertex)
            && self.full_graph.contains_edge(e1)
            && self.full_graph.contains_edge(e2)
            && (!self.delta_graph.contains_edge(e1) || self.edge_rank(static_graph, e1) > self.workspace.anchor_edge_rank)
            && (!self.delta_graph.contains_edge(e2) || self.edge_rank(static_graph, e2) > self.workspace.anchor_edge_rank)
    }

    fn seed_from_anchor(&mut self, static_graph: &StaticConsistencyGraph, edge: Edge) {
        let const_graph = &static_graph.const_graph;
        let pi = const_graph.vertex_to_partition[edge.src.0 as usize];
        let pj = const_graph.vertex_to_partition[edge.dst.0 as usize];

        self.workspace.partial_solution.clear();
        self.workspace.partial_solution.push(edge.src);
        self.workspace.partial_solution.push(edge.dst);
        self.workspace.anchor_edge_rank = self.edge_rank(static_graph, edge);

        self.workspace.partition_bits.clear();
        self.workspace.partition_bits.set(pi as usize, true);
        self.workspace.partition_bits.set(pj as usize, true);

        for p in 0..const_graph.k {
            let cv = &mut self.workspace.compatible_vertices[0][p];
            cv.clear();
            if p as u32 == pi || p as u32 == pj {
                continue;
            }
            for (bit, &vertex) in const_graph.partitions[p].iter().enumerate() {
                if self.is_vertex_compatible_with_anchor(static_graph, edge, vertex) {
                    cv.set(bit, true);
                }
            }
        }
    }

    fn choose_best_partition(&self, depth: usize, vertices_partition_bits: &Bitset) -> Option<usize> {
        let cv_d = &self.workspace.compatible_vertices[depth];
        let used = &self.workspace.partition_bits;

        let mut best: Option<(usize, usize)> = None;
        for p in vertices_partition_bits.ones() {
            if used.test(p) {
                continue;
            }
            let count = cv_d[p].count_ones();
            if best.map_or(true, |(_, best_count)| count < best_count) {
                best = Some((p, count));
            }
        }
        best.map(|(p, _)| p)
    }

    fn copy_current_compatible_vertices_to_next_depth(&mut self, k: usize, depth: usize) {
        let (left, right) = self.workspace.compatible_vertices.split_at_mut(depth + 1);
        right[0].clone_from_slice(&left[depth][..k]);
    }

    fn update_compatible_adjacent_vertices_at_next_depth(
        &mut self,
        static_graph: &StaticConsistencyGraph,
        src: Vertex,
        depth: usize,
        delta: bool,
    ) {
        let const_graph = &static_graph.const_graph;
        let k = const_graph.k;
        let used = self.workspace.partition_bits.clone();
        let anchor_rank = self.workspace.anchor_edge_rank;

        for partition in 0..k {
            if used.test(partition) {
                continue;
            }
            let size = const_graph.partitions[partition].len();
            for bit in 0..size {
                let dst = const_graph.partitions[partition][bit];
                let edge = Edge::new(src, dst);
                let cur = self.workspace.compatible_vertices[depth + 1][partition].test(bit);
                let keep = cur && self.full_graph.contains_edge(edge);
                let keep = keep
                    && !(delta && self.delta_graph.contains_edge(edge) && self.edge_rank(static_graph, edge) < anchor_rank);
                self.workspace.compatible_vertices[depth + 1][partition].set(bit, keep);
            }
        }
    }

    fn num_possible_additions_at_next_depth(&self, scope: &Bitset, depth: usize) -> usize {
        let cv_next = &self.workspace.compatible_vertices[depth + 1];
        let used = &self.workspace.partition_bits;
        scope.ones().filter(|&p| !used.test(p) && cv_next[p].any()).count()
    }

    /// Shared recursive completion for both head-clique discovery (target
    /// size = head partition count) and fixed-head-clique completion
    /// (target size = k), mirroring `complete_from_seed<Delta>`.
    fn complete_from_seed(
        &mut self,
        static_graph: &StaticConsistencyGraph,
        scope: &Bitset,
        target_size: usize,
        depth: usize,
        delta: bool,
        callback: &mut dyn FnMut(&[Vertex]) -> bool,
    ) -> bool {
        let const_graph = &static_graph.const_graph;
        let Some(p) = self.choose_best_partition(depth, scope) else {
            return true;
        };

        let k = const_graph.k;
        let bits: Vec<usize> = self.workspace.compatible_vertices[depth][p].ones().collect();
        for bit in bits {
            self.workspace.compatible_vertices[depth][p].set(bit, false);
            let vertex = const_graph.partitions[p][bit];
            self.workspace.partial_solution.push(vertex);

            let should_continue = if self.workspace.partial_solution.len() == target_size {
                callback(&self.workspace.partial_solution)
            } else {
                self.copy_current_compatible_vertices_to_next_depth(k, depth);
                self.update_compatible_adjacent_vertices_at_next_depth(static_graph, vertex, depth, delta);
                self.workspace.partition_bits.set(p, true);

                let can_complete =
                    self.workspace.partial_solution.len() + self.num_possible_additions_at_next_depth(scope, depth) == target_size;
                let r = if can_complete {
                    self.complete_from_seed(static_graph, scope, target_size, depth + 1, delta, callback)
                } else {
                    true
                };
                self.workspace.partition_bits.set(p, false);
                r
            };

            self.workspace.partial_solution.pop();
            if !should_continue {
                return false;
            }
        }
        true
    }

    fn for_each_unary(&mut self, vertices: &[Vertex], callback: &mut dyn FnMut(&[Vertex]) -> bool) {
        for &v in vertices {
            self.workspace.partial_solution.clear();
            self.workspace.partial_solution.push(v);
            if !callback(&self.workspace.partial_solution) {
                return;
            }
        }
    }

    fn for_each_binary(&mut self, edges: &[Edge], callback: &mut dyn FnMut(&[Vertex]) -> bool) {
        for &e in edges {
            self.workspace.partial_solution.clear();
            self.workspace.partial_solution.push(e.src);
            self.workspace.partial_solution.push(e.dst);
            if !callback(&self.workspace.partial_solution) {
                return;
            }
        }
    }

    /// Enumerates only head cliques that use ≥1 delta vertex/edge.
    pub fn for_each_new_head_clique(&mut self, static_graph: &StaticConsistencyGraph, mut callback: impl FnMut(&[Vertex]) -> bool) {
        let h = static_graph.const_graph.head.partition_count;
        let head_mask = static_graph.const_graph.head.vertex_bits.clone();
        match h {
            0 => {
                self.workspace.partial_solution.clear();
                callback(&self.workspace.partial_solution);
            }
            1 => {
                let verts = self.delta_graph.vertices_in(&head_mask);
                self.for_each_unary(&verts, &mut callback);
            }
            2 => {
                let edges = self.delta_graph.edges_in(&head_mask, &head_mask);
                self.for_each_binary(&edges, &mut callback);
            }
            _ => {
                let edges = self.delta_graph.edges_in(&head_mask, &head_mask);
                for edge in edges {
                    self.seed_from_anchor(static_graph, edge);
                    let scope = static_graph.const_graph.head.partition_bits.clone();
                    if !self.complete_from_seed(static_graph, &scope, h, 0, true, &mut callback) {
                        return;
                    }
                }
            }
        }
    }

    /// Exhaustively enumerates every head clique in the current full graph.
    pub fn for_each_head_clique(&mut self, static_graph: &StaticConsistencyGraph, mut callback: impl FnMut(&[Vertex]) -> bool) {
        let h = static_graph.const_graph.head.partition_count;
        let head_mask = static_graph.const_graph.head.vertex_bits.clone();
        match h {
            0 => {
                self.workspace.partial_solution.clear();
                callback(&self.workspace.partial_solution);
            }
            1 => {
                let verts = self.full_graph.vertices_in(&head_mask);
                self.for_each_unary(&verts, &mut callback);
            }
            2 => {
                let edges = self.full_graph.edges_in(&head_mask, &head_mask);
                self.for_each_binary(&edges, &mut callback);
            }
            _ => {
                let edges = self.full_graph.edges_in(&head_mask, &head_mask);
                for edge in edges {
                    self.seed_from_anchor(static_graph, edge);
                    let scope = static_graph.const_graph.head.partition_bits.clone();
                    if !self.complete_from_seed(static_graph, &scope, h, 0, false, &mut callback) {
                        return;
                    }
                }
            }
        }
    }

    /// Given a fixed head clique (already bound, `head.len()` vertices, one
    /// per head partition), completes it to a full k-clique, invoking
    /// `callback` for every extension that uses at least one delta edge.
    pub fn for_each_new_rule_clique(&mut self, static_graph: &StaticConsistencyGraph, head: &[Vertex], mut callback: impl FnMut(&[Vertex]) -> bool) {
        self.complete_fixed_head(static_graph, head, true, &mut callback);
    }

    /// As above, but exhaustive over the full graph (no delta requirement).
    pub fn for_each_rule_clique(&mut self, static_graph: &StaticConsistencyGraph, head: &[Vertex], mut callback: impl FnMut(&[Vertex]) -> bool) {
        self.complete_fixed_head(static_graph, head, false, &mut callback);
    }

    fn complete_fixed_head(&mut self, static_graph: &StaticConsistencyGraph, head: &[Vertex], delta: bool, callback: &mut dyn FnMut(&[Vertex]) -> bool) {
        let const_graph = &static_graph.const_graph;
        let k = const_graph.k;

        self.workspace.partial_solution.clear();
        self.workspace.partial_solution.extend_from_slice(head);
        self.workspace.partition_bits.clear();
        for &v in head {
            let p = const_graph.vertex_to_partition[v.0 as usize] as usize;
            self.workspace.partition_bits.set(p, true);
        }

        for p in 0..k {
            let cv = &mut self.workspace.compatible_vertices[0][p];
            *cv = Bitset::with_capacity(const_graph.partitions[p].len());
            if self.workspace.partition_bits.test(p) {
                continue;
            }
            for (bit, &candidate) in const_graph.partitions[p].iter().enumerate() {
                let compatible = head.iter().all(|&h| self.full_graph.contains_edge(Edge::new(h, candidate)));
                cv.set(bit, compatible);
            }
        }

        if head.len() == k {
            callback(&self.workspace.partial_solution);
            return;
        }

        // No anchor edge here (the head is already fixed): rank 0 means the
        // `< anchor_rank` delta dedup check in `update_compatible_adjacent_*`
        // never fires, so every still-compatible vertex stays a candidate.
        self.workspace.anchor_edge_rank = 0;
        let scope = const_graph.full.partition_bits.clone();
        self.complete_from_seed(static_graph, &scope, k, 0, delta, callback);
    }

    pub fn const_graph_ref<'a>(&self, static_graph: &'a StaticConsistencyGraph) -> &'a ConstGraph {
        self.const_graph(static_graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ConstGraph;
    use formalism::{EntityKind, Repository, Rule};

    fn unary_const_graph() -> ConstGraph {
        ConstGraph::new(vec![vec![Vertex(0), Vertex(1), Vertex(2)]], &[0])
    }

    #[test]
    fn choose_best_partition_prefers_fewest_candidates() {
        let const_graph = unary_const_graph();
        let workspace = Workspace::empty(&const_graph);
        let kpkc = DeltaKpkc { delta_graph: Graph::empty(3), full_graph: Graph::empty(3), workspace };
        // With only one partition available and it unused, it must be chosen.
        let mut bits = Bitset::with_capacity(1);
        bits.set(0, true);
        assert_eq!(kpkc.choose_best_partition(0, &bits), Some(0));
    }

    /// A nullary rule (no parameters) has a const graph with zero
    /// partitions; both head-clique entry points must still emit the empty
    /// binding exactly once, delta or not.
    #[test]
    fn nullary_rule_emits_the_empty_clique_once() {
        let mut repo = Repository::new();
        let p = repo.intern_predicate("done", 0, EntityKind::Derived);
        let atom = repo.intern_atom(p, vec![]);
        let rule = repo
            .rules
            .get_or_create(Rule { parameters: vec![], static_body: vec![], fluent_body: vec![], derived_body: vec![], numeric_body: vec![], head: atom })
            .0;
        let rule = repo.rules.get(rule).clone();

        let static_graph = StaticConsistencyGraph::build(&repo, &rule, &[], &HashSet::new()).unwrap();
        let mut kpkc = DeltaKpkc::new(&static_graph);
        kpkc.set_next_assignment_sets(&static_graph, &repo, &HashSet::new());

        let mut new_cliques = Vec::new();
        kpkc.for_each_new_head_clique(&static_graph, |vertices| {
            new_cliques.push(vertices.to_vec());
            true
        });
        assert_eq!(new_cliques, vec![Vec::<Vertex>::new()]);

        let mut all_cliques = Vec::new();
        kpkc.for_each_head_clique(&static_graph, |vertices| {
            all_cliques.push(vertices.to_vec());
            true
        });
        assert_eq!(all_cliques, vec![Vec::<Vertex>::new()]);
    }

    /// A unary rule with a single fluent-body literal: partition `{v0, v1}`
    /// (one vertex per object). Only the newly-true object shows up in
    /// `for_each_new_head_clique`'s delta; `for_each_head_clique` always
    /// sees both once both hold.
    #[test]
    fn unary_rule_delta_sees_only_the_newly_true_object() {
        let mut repo = Repository::new();
        let a = repo.intern_object("a");
        let b = repo.intern_object("b");
        let p = repo.intern_predicate("active", 1, EntityKind::Fluent);
        let v0 = formalism::VariableId::new(0);
        let tv0 = repo.intern_term_variable(v0);
        let atom = repo.intern_atom(p, vec![tv0]);
        let literal = repo.intern_literal(atom, true);
        let rule_id = repo
            .rules
            .get_or_create(Rule { parameters: vec![v0], static_body: vec![], fluent_body: vec![literal], derived_body: vec![], numeric_body: vec![], head: atom })
            .0;
        let rule = repo.rules.get(rule_id).clone();

        let objects = vec![a, b];
        let static_graph = StaticConsistencyGraph::build(&repo, &rule, &objects, &HashSet::new()).unwrap();
        let mut kpkc = DeltaKpkc::new(&static_graph);

        // Round 1: only `b` holds.
        let atom_b = repo.intern_ground_atom(p, vec![b]);
        let mut facts: HashSet<GroundAtomId> = HashSet::new();
        facts.insert(atom_b);
        kpkc.set_next_assignment_sets(&static_graph, &repo, &facts);

        // Round 2: `a` newly holds too.
        let atom_a = repo.intern_ground_atom(p, vec![a]);
        facts.insert(atom_a);
        kpkc.set_next_assignment_sets(&static_graph, &repo, &facts);

        let v_a = static_graph.const_graph.partitions[0].iter().copied().find(|&v| static_graph.object_of(0, v) == a).unwrap();
        let v_b = static_graph.const_graph.partitions[0].iter().copied().find(|&v| static_graph.object_of(0, v) == b).unwrap();

        let mut new_cliques = Vec::new();
        kpkc.for_each_new_head_clique(&static_graph, |vertices| {
            new_cliques.push(vertices.to_vec());
            true
        });
        assert_eq!(new_cliques, vec![vec![v_a]]);

        let mut all_cliques = Vec::new();
        kpkc.for_each_head_clique(&static_graph, |vertices| {
            all_cliques.push(vertices.to_vec());
            true
        });
        let mut all_sorted: Vec<Vec<Vertex>> = all_cliques;
        all_sorted.sort_by_key(|c| c[0].0);
        let mut expected = vec![vec![v_a], vec![v_b]];
        expected.sort_by_key(|c| c[0].0);
        assert_eq!(all_sorted, expected);
    }

    /// A binary rule whose two parameters are each pinned to a single
    /// object by a static unary literal, so each partition has exactly one
    /// vertex; the single possible edge becomes consistent once its fluent
    /// literal holds. Re-running `set_next_assignment_sets` with the same
    /// facts a second time empties the delta (nothing new), but the
    /// exhaustive entry point still reports the edge.
    #[test]
    fn binary_rule_delta_is_empty_once_stable_but_exhaustive_still_finds_the_edge() {
        let mut repo = Repository::new();
        let l1 = repo.intern_object("l1");
        let l2 = repo.intern_object("l2");

        let is_l1 = repo.intern_predicate("is-l1", 1, EntityKind::Static);
        let is_l2 = repo.intern_predicate("is-l2", 1, EntityKind::Static);
        let connected = repo.intern_predicate("connected", 2, EntityKind::Fluent);

        let v0 = formalism::VariableId::new(0);
        let v1 = formalism::VariableId::new(1);
        let tv0 = repo.intern_term_variable(v0);
        let tv1 = repo.intern_term_variable(v1);

        let is_l1_atom = repo.intern_atom(is_l1, vec![tv0]);
        let is_l1_lit = repo.intern_literal(is_l1_atom, true);
        let is_l2_atom = repo.intern_atom(is_l2, vec![tv1]);
        let is_l2_lit = repo.intern_literal(is_l2_atom, true);
        let connected_atom = repo.intern_atom(connected, vec![tv0, tv1]);
        let connected_lit = repo.intern_literal(connected_atom, true);

        let rule_id = repo
            .rules
            .get_or_create(Rule {
                parameters: vec![v0, v1],
                static_body: vec![is_l1_lit, is_l2_lit],
                fluent_body: vec![connected_lit],
                derived_body: vec![],
                numeric_body: vec![],
                head: connected_atom,
            })
            .0;
        let rule = repo.rules.get(rule_id).clone();

        let objects = vec![l1, l2];
        let mut static_facts: HashSet<GroundAtomId> = HashSet::new();
        static_facts.insert(repo.intern_ground_atom(is_l1, vec![l1]));
        static_facts.insert(repo.intern_ground_atom(is_l2, vec![l2]));

        let static_graph = StaticConsistencyGraph::build(&repo, &rule, &objects, &static_facts).unwrap();
        assert_eq!(static_graph.const_graph.partitions[0].len(), 1);
        assert_eq!(static_graph.const_graph.partitions[1].len(), 1);

        let mut kpkc = DeltaKpkc::new(&static_graph);

        let mut facts: HashSet<GroundAtomId> = HashSet::new();
        facts.insert(repo.intern_ground_atom(connected, vec![l1, l2]));
        kpkc.set_next_assignment_sets(&static_graph, &repo, &facts);

        let expected_edge = vec![static_graph.const_graph.partitions[0][0], static_graph.const_graph.partitions[1][0]];

        let mut new_cliques = Vec::new();
        kpkc.for_each_new_head_clique(&static_graph, |vertices| {
            new_cliques.push(vertices.to_vec());
            true
        });
        assert_eq!(new_cliques, vec![expected_edge.clone()]);

        // Same facts again: the edge was already known, so nothing is new.
        kpkc.set_next_assignment_sets(&static_graph, &repo, &facts);
        let mut new_cliques_again = Vec::new();
        kpkc.for_each_new_head_clique(&static_graph, |vertices| {
            new_cliques_again.push(vertices.to_vec());
            true
        });
        assert!(new_cliques_again.is_empty());

        let mut all_cliques = Vec::new();
        kpkc.for_each_head_clique(&static_graph, |vertices| {
            all_cliques.push(vertices.to_vec());
            true
        });
        assert_eq!(all_cliques, vec![expected_edge]);
    }
}
