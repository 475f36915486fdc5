//! The state oracle a lookup is evaluated against. A caller plugs in
//! whatever representation it has at hand (a raw fact set, an
//! [`fdr::FDRState`], ...) rather than the tree depending on one concrete
//! state representation.

use formalism::{GroundAtomId, GroundNumericConstraint};

pub trait MatchState {
    fn atom_holds(&self, atom: GroundAtomId) -> bool;
    fn fact_value(&self, variable: usize) -> u32;
    fn constraint_satisfied(&self, constraint: &GroundNumericConstraint) -> bool;
}
