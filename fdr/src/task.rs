//! Wires an ordered [`FDRVariable`] list, its [`PackedLayout`], and the
//! ground-atom-to-fact mapping into one type a caller can pack/unpack
//! ground-atom sets through (spec §4.7 supplement).
//!
//! Grounded on `original_source/include/tyr/formalism/planning/fdr_context.hpp`'s
//! `BinaryFDRContext` (one binary variable per fluent atom) and
//! `GeneralFDRContext` (one variable per supplied mutex group).

use hashbrown::{HashMap, HashSet};

use formalism::GroundAtomId;

use crate::error::FdrError;
use crate::layout::PackedLayout;
use crate::state::FDRState;
use crate::variable::{FDRFact, FDRVariable};

/// Ordered variables plus the atom -> `(variable, value)` mapping needed to
/// translate between ground-atom sets and packed [`FDRState`]s.
pub struct FdrVariableIndex {
    variables: Vec<FDRVariable>,
    layout: PackedLayout,
    mapping: HashMap<GroundAtomId, FDRFact>,
}

impl FdrVariableIndex {
    /// One binary variable per atom in `atoms`, mirroring `BinaryFDRContext`.
    pub fn from_fluent_atoms(atoms: impl IntoIterator<Item = GroundAtomId>, word_bits: u32) -> Result<Self, FdrError> {
        let mut variables = Vec::new();
        let mut mapping = HashMap::new();

        for (index, atom) in atoms.into_iter().enumerate() {
            variables.push(FDRVariable::binary(atom));
            mapping.insert(atom, FDRFact { variable: index, value: 1 });
        }

        let layout = PackedLayout::build(&variables, word_bits)?;
        Ok(FdrVariableIndex { variables, layout, mapping })
    }

    /// One mutex-group variable per group, mirroring `GeneralFDRContext`.
    pub fn from_mutex_groups(groups: Vec<Vec<GroundAtomId>>, word_bits: u32) -> Result<Self, FdrError> {
        let mut variables = Vec::with_capacity(groups.len());
        let mut mapping = HashMap::new();

        for (index, group) in groups.into_iter().enumerate() {
            for (value, &atom) in group.iter().enumerate() {
                mapping.insert(atom, FDRFact { variable: index, value: value as u32 + 1 });
            }
            variables.push(FDRVariable::mutex_group(group));
        }

        let layout = PackedLayout::build(&variables, word_bits)?;
        Ok(FdrVariableIndex { variables, layout, mapping })
    }

    pub fn variables(&self) -> &[FDRVariable] {
        &self.variables
    }

    pub fn layout(&self) -> &PackedLayout {
        &self.layout
    }

    /// The `(variable, value)` fact for `atom` holding, or `None` if `atom`
    /// isn't covered by any variable in this index.
    pub fn get_fact(&self, atom: GroundAtomId) -> Option<FDRFact> {
        self.mapping.get(&atom).copied()
    }

    /// As [`Self::get_fact`], but for a negative occurrence of `atom`: the
    /// variable's "none of these atoms" value, `0`.
    pub fn get_fact_for_negation(&self, atom: GroundAtomId) -> Option<FDRFact> {
        self.get_fact(atom).map(|fact| FDRFact { variable: fact.variable, value: 0 })
    }

    /// Packs the ground atoms that currently hold into a fresh state: every
    /// covered variable not mentioned in `facts` implicitly takes value `0`.
    pub fn pack(&self, facts: &HashSet<GroundAtomId>) -> FDRState {
        let mut state = FDRState::zeroed(&self.layout);
        for &atom in facts {
            if let Some(fact) = self.get_fact(atom) {
                state.set(&self.layout, fact.variable, fact.value);
            }
        }
        state
    }

    /// The inverse of [`Self::pack`]: every atom whose variable currently
    /// holds a non-zero value.
    pub fn unpack(&self, state: &FDRState) -> HashSet<GroundAtomId> {
        let mut facts = HashSet::new();
        for (index, variable) in self.variables.iter().enumerate() {
            let value = state.get(&self.layout, index);
            if value > 0 {
                facts.insert(variable.atoms[value as usize - 1]);
            }
        }
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formalism::{EntityKind, Repository};

    fn atom(repo: &mut Repository, name: &str) -> GroundAtomId {
        let predicate = repo.intern_predicate(name, 0, EntityKind::Fluent);
        repo.intern_ground_atom(predicate, Vec::new())
    }

    #[test]
    fn binary_round_trip_packs_and_unpacks() {
        let mut repo = Repository::new();
        let a = atom(&mut repo, "a");
        let b = atom(&mut repo, "b");
        let index = FdrVariableIndex::from_fluent_atoms([a, b], 64).unwrap();

        let mut facts = HashSet::new();
        facts.insert(a);
        let state = index.pack(&facts);
        assert_eq!(index.unpack(&state), facts);
    }

    #[test]
    fn mutex_group_assigns_distinct_values() {
        let mut repo = Repository::new();
        let a = atom(&mut repo, "a");
        let b = atom(&mut repo, "b");
        let index = FdrVariableIndex::from_mutex_groups(vec![vec![a, b]], 64).unwrap();

        assert_eq!(index.get_fact(a).unwrap().value, 1);
        assert_eq!(index.get_fact(b).unwrap().value, 2);

        let mut facts = HashSet::new();
        facts.insert(b);
        let state = index.pack(&facts);
        assert_eq!(index.unpack(&state), facts);
    }
}
