//! Applicability lookup (spec §4.6): walk the tree from the root, at each
//! internal node following both the state-determined branch and the
//! don't-care branch, collecting every generator leaf reached.

use hashbrown::HashSet;

use crate::node::{GeneratorElement, Node, NodeId};
use crate::repository::MatchTreeRepository;
use crate::state::MatchState;

/// Every element reachable from `root` under `state`. `root` is `None` for
/// an empty tree (no actions/axioms to ground at all), which always yields
/// nothing.
pub fn applicable(tree: &MatchTreeRepository, root: Option<NodeId>, state: &dyn MatchState) -> HashSet<GeneratorElement> {
    let mut elements = HashSet::new();
    if let Some(root) = root {
        let mut visited = HashSet::new();
        visit(tree, root, state, &mut elements, &mut visited);
    }
    elements
}

fn visit(tree: &MatchTreeRepository, id: NodeId, state: &dyn MatchState, elements: &mut HashSet<GeneratorElement>, visited: &mut HashSet<NodeId>) {
    // A node's reachable generator set depends only on its id and the
    // state, never on the path taken to reach it, so memoizing by id alone
    // is sound and keeps shared subtrees from being re-walked.
    if !visited.insert(id) {
        return;
    }

    match tree.get(id) {
        Node::Atom(selector) => {
            let branch = if state.atom_holds(selector.atom) { selector.present } else { selector.absent };
            if let Some(next) = branch {
                visit(tree, next, state, elements, visited);
            }
            if let Some(dontcare) = selector.dontcare {
                visit(tree, dontcare, state, elements, visited);
            }
        }
        Node::Fact(selector) => {
            let value = state.fact_value(selector.variable) as usize;
            if let Some(Some(next)) = selector.children.get(value) {
                visit(tree, *next, state, elements, visited);
            }
            if let Some(dontcare) = selector.dontcare {
                visit(tree, dontcare, state, elements, visited);
            }
        }
        Node::Numeric(selector) => {
            if state.constraint_satisfied(&selector.constraint) {
                if let Some(next) = selector.satisfied {
                    visit(tree, next, state, elements, visited);
                }
            }
            if let Some(dontcare) = selector.dontcare {
                visit(tree, dontcare, state, elements, visited);
            }
        }
        Node::Generator(generator) => {
            elements.extend(generator.elements.iter().copied());
        }
    }
}
