//! Bitset graph primitives the delta k-partite clique enumerator runs over.
//!
//! Grounded on `original_source/include/tyr/datalog/delta_kpkc_new.hpp`'s
//! `Vertex`/`Edge`/`VertexSet`/`ConstGraph`/`Graph`/`Workspace`: a vertex is
//! `(parameter position, candidate object)` flattened to one dense index,
//! partitioned by parameter.

use grounding_collections::Bitset;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Vertex(pub u32);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Edge {
    pub src: Vertex,
    pub dst: Vertex,
}

impl Edge {
    pub fn new(u: Vertex, v: Vertex) -> Self {
        if u.0 < v.0 {
            Edge { src: u, dst: v }
        } else {
            Edge { src: v, dst: u }
        }
    }
}

/// A named subset of vertices/partitions: `head` (partitions referenced by
/// the rule's head), `non_head` (the complement), or `full` (everything).
#[derive(Clone, Debug)]
pub struct VertexSet {
    pub partition_bits: Bitset,
    pub partition_count: usize,
    pub vertex_bits: Bitset,
    pub vertex_count: usize,
}

impl VertexSet {
    fn finalize(mut self) -> Self {
        self.partition_count = self.partition_bits.count_ones();
        self.vertex_count = self.vertex_bits.count_ones();
        self
    }
}

/// Per-rule data that never changes once the static body is fixed: vertex
/// partitioning and which partitions the rule's head references.
pub struct ConstGraph {
    pub num_vertices: usize,
    pub k: usize,
    pub partitions: Vec<Vec<Vertex>>,
    pub vertex_to_partition: Vec<u32>,
    pub head: VertexSet,
    pub non_head: VertexSet,
    pub full: VertexSet,
}

impl ConstGraph {
    /// `partitions[p]` is the candidate vertex list for parameter position
    /// `p`; `head_partitions` are the positions the rule's head mentions.
    pub fn new(partitions: Vec<Vec<Vertex>>, head_partitions: &[usize]) -> Self {
        let k = partitions.len();
        let num_vertices = partitions.iter().map(Vec::len).sum();

        let mut vertex_to_partition = vec![0u32; num_vertices];
        for (p, verts) in partitions.iter().enumerate() {
            for v in verts {
                vertex_to_partition[v.0 as usize] = p as u32;
            }
        }

        let mut head_partition_bits = Bitset::with_capacity(k.max(1));
        for &p in head_partitions {
            head_partition_bits.set(p, true);
        }
        let mut non_head_partition_bits = Bitset::with_capacity(k.max(1));
        for p in 0..k {
            non_head_partition_bits.set(p, !head_partition_bits.test(p));
        }
        let full_partition_bits = {
            let mut b = Bitset::with_capacity(k.max(1));
            for p in 0..k {
                b.set(p, true);
            }
            b
        };

        let vertex_bits_for = |bits: &Bitset| {
            let mut vb = Bitset::with_capacity(num_vertices.max(1));
            for p in bits.ones() {
                if let Some(verts) = partitions.get(p) {
                    for v in verts {
                        vb.set(v.0 as usize, true);
                    }
                }
            }
            vb
        };

        let head_vertex_bits = vertex_bits_for(&head_partition_bits);
        let non_head_vertex_bits = vertex_bits_for(&non_head_partition_bits);
        let full_vertex_bits = vertex_bits_for(&full_partition_bits);

        let head = VertexSet {
            partition_bits: head_partition_bits,
            partition_count: 0,
            vertex_bits: head_vertex_bits,
            vertex_count: 0,
        }
        .finalize();
        let non_head = VertexSet {
            partition_bits: non_head_partition_bits,
            partition_count: 0,
            vertex_bits: non_head_vertex_bits,
            vertex_count: 0,
        }
        .finalize();
        let full = VertexSet {
            partition_bits: full_partition_bits,
            partition_count: 0,
            vertex_bits: full_vertex_bits,
            vertex_count: 0,
        }
        .finalize();

        ConstGraph { num_vertices, k, partitions, vertex_to_partition, head, non_head, full }
    }
}

/// A mutable vertex/adjacency-matrix snapshot: either the "full" graph of
/// everything currently consistent, or the "delta" of what changed since
/// the previous round.
#[derive(Clone)]
pub struct Graph {
    pub vertices: Bitset,
    pub adjacency_matrix: Vec<Bitset>,
}

impl Graph {
    pub fn empty(num_vertices: usize) -> Self {
        Graph {
            vertices: Bitset::with_capacity(num_vertices),
            adjacency_matrix: (0..num_vertices).map(|_| Bitset::with_capacity(num_vertices)).collect(),
        }
    }

    pub fn reset(&mut self) {
        self.vertices.clear();
        for row in &mut self.adjacency_matrix {
            row.clear();
        }
    }

    pub fn contains_vertex(&self, v: Vertex) -> bool {
        self.vertices.test(v.0 as usize)
    }

    pub fn contains_edge(&self, e: Edge) -> bool {
        self.adjacency_matrix[e.src.0 as usize].test(e.dst.0 as usize)
    }

    pub fn set_edge(&mut self, e: Edge) {
        self.adjacency_matrix[e.src.0 as usize].set(e.dst.0 as usize, true);
        self.adjacency_matrix[e.dst.0 as usize].set(e.src.0 as usize, true);
    }

    pub fn vertices_in(&self, mask: &Bitset) -> Vec<Vertex> {
        self.vertices.ones().filter(|&i| mask.test(i)).map(|i| Vertex(i as u32)).collect()
    }

    pub fn edges_in(&self, src_mask: &Bitset, dst_mask: &Bitset) -> Vec<Edge> {
        let mut out = Vec::new();
        for i in self.vertices.ones().filter(|&i| src_mask.test(i)) {
            for j in self.adjacency_matrix[i].ones().filter(|&j| j > i && dst_mask.test(j)) {
                out.push(Edge { src: Vertex(i as u32), dst: Vertex(j as u32) });
            }
        }
        out
    }
}

/// Scratch space reused across every `complete_from_seed` recursion for one
/// rule, sized once at construction (spec §4.4: "does not allocate after
/// construction").
pub struct Workspace {
    pub compatible_vertices: Vec<Vec<Bitset>>,
    pub partition_bits: Bitset,
    pub partial_solution: Vec<Vertex>,
    pub anchor_edge_rank: u64,
}

impl Workspace {
    pub fn empty(const_graph: &ConstGraph) -> Self {
        let k = const_graph.k;
        let compatible_vertices = (0..k.max(1))
            .map(|_| (0..k).map(|p| Bitset::with_capacity(const_graph.partitions[p].len())).collect())
            .collect();
        Workspace {
            compatible_vertices,
            partition_bits: Bitset::with_capacity(k.max(1)),
            partial_solution: Vec::with_capacity(k),
            anchor_edge_rank: 0,
        }
    }
}
