//! Hash-consed storage for match-tree nodes, reusing the same `Store`
//! primitive the formalism repository interns every other entity kind
//! with (spec §4.6: "hash-consed identically to the formal repository").

use formalism::store::Store;

use crate::node::{Node, NodeId};

#[derive(Default)]
pub struct MatchTreeRepository {
    nodes: Store<NodeId, Node>,
}

impl MatchTreeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, node: Node) -> NodeId {
        self.nodes.get_or_create(node).0
    }

    pub fn get(&self, id: NodeId) -> &Node {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
