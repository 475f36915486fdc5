//! A read-through overlay over a parent [`Repository`] (design notes'
//! "Overlay repository"): ground atoms already present in the parent
//! resolve there; anything new goes into a local repository, with local
//! ids offset past the parent's so that `GroundAtomId`s minted through the
//! overlay never collide with the parent's.
//!
//! Intended for session-scoped grounding work (e.g. lazily grounding
//! actions touched during search) without handing every caller mutable
//! access to the shared base repository. The object vocabulary is assumed
//! fixed for the overlay's lifetime: only ground atoms are added.

use crate::ids::{GroundAtomId, ObjectId, PredicateId};
use crate::lang::GroundAtom;
use crate::repository::Repository;

pub struct Overlay<'p> {
    parent: &'p Repository,
    local: Repository,
}

impl<'p> Overlay<'p> {
    pub fn new(parent: &'p Repository) -> Self {
        Overlay { parent, local: Repository::new() }
    }

    fn parent_group_len(&self, predicate: PredicateId) -> u32 {
        self.parent.ground_atoms.group_len(predicate) as u32
    }

    pub fn get_ground_atom(&self, id: GroundAtomId) -> &GroundAtom {
        let boundary = self.parent_group_len(id.predicate);
        if id.local < boundary {
            self.parent.get_ground_atom(id)
        } else {
            self.local.get_ground_atom(GroundAtomId { predicate: id.predicate, local: id.local - boundary })
        }
    }

    /// Interns a ground atom, checking the parent first and offsetting new
    /// local ids past the parent's existing bucket size.
    pub fn intern_ground_atom(&mut self, predicate: PredicateId, objects: Vec<ObjectId>) -> GroundAtomId {
        if let Some(id) = self.parent.find_ground_atom(predicate, &objects) {
            return id;
        }
        let boundary = self.parent_group_len(predicate);
        let local_id = self.local.intern_ground_atom(predicate, objects);
        GroundAtomId { predicate, local: boundary + local_id.local }
    }
}
