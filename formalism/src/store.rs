//! Hash-consing stores (spec §4.1's "interning repository").
//!
//! Each store keeps a dense [`RefVec`] from id to owned value alongside a
//! `HashMap` from value back to id, so `get_or_create` is O(1) amortised and
//! always returns the same id for structurally-equal canonical input —
//! that's the whole of hash-consing. We key the map on the owned value's
//! `Eq`/`Hash` derive rather than hashing a serialized byte buffer: it's
//! the same uniqueness guarantee with none of the (de)serialization
//! boilerplate a manual byte-buffer key would need for a dozen-plus entity
//! kinds.

use grounding_collections::{Ref, RefVec};
use hashbrown::HashMap;
use std::hash::Hash;

use crate::canonical::Canonicalize;

/// A flat hash-consed store for one entity kind.
pub struct Store<K, V> {
    values: RefVec<K, V>,
    index: HashMap<V, K>,
}

impl<K, V> Default for Store<K, V> {
    fn default() -> Self {
        Store { values: RefVec::new(), index: HashMap::new() }
    }
}

impl<K, V> Store<K, V>
where
    K: Ref,
    V: Eq + Hash + Clone + Canonicalize,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a value without inserting it. The argument must already be
    /// canonical: a non-canonical lookup is defined to miss even if the
    /// canonical form is present, mirroring the interner's documented
    /// contract (spec §9 open question, resolved uniformly to `Option`).
    pub fn find(&self, value: &V) -> Option<K> {
        debug_assert!(value.is_canonical(), "find() called with non-canonical value");
        self.index.get(value).copied()
    }

    /// Interns `value`, canonicalizing it first. Returns the id and whether
    /// this was a new entity (`true`) or an existing one (`false`).
    pub fn get_or_create(&mut self, mut value: V) -> (K, bool) {
        value.canonicalize();
        if let Some(&id) = self.index.get(&value) {
            return (id, false);
        }
        let id = self.values.push(value.clone());
        self.index.insert(value, id);
        (id, true)
    }

    pub fn get(&self, id: K) -> &V {
        self.values.get(id).expect("dangling id: referential closure violated")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.values.iter()
    }
}

/// A store grouped by a leading [`EntityKind`]-carrying key (here, the
/// predicate or function an atom/term belongs to), matching spec §4.1's
/// "e.g. `Atom<K>` is internally a list of stores indexed by predicate
/// identifier" example. `P` is the id type of the group (`PredicateId` or
/// `FunctionId`); the composite identifier is `(P, local index)`.
pub struct GroupedStore<P, V> {
    groups: HashMap<P, Group<V>>,
}

struct Group<V> {
    values: Vec<V>,
    index: HashMap<V, u32>,
}

impl<V> Default for Group<V> {
    fn default() -> Self {
        Group { values: Vec::new(), index: HashMap::new() }
    }
}

impl<P, V> Default for GroupedStore<P, V> {
    fn default() -> Self {
        GroupedStore { groups: HashMap::new() }
    }
}

impl<P, V> GroupedStore<P, V>
where
    P: Copy + Eq + Hash,
    V: Eq + Hash + Clone + Canonicalize,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, group: P, value: &V) -> Option<u32> {
        debug_assert!(value.is_canonical());
        self.groups.get(&group).and_then(|g| g.index.get(value).copied())
    }

    pub fn get_or_create(&mut self, group: P, mut value: V) -> (u32, bool) {
        value.canonicalize();
        let bucket = self.groups.entry(group).or_default();
        if let Some(&local) = bucket.index.get(&value) {
            return (local, false);
        }
        let local = bucket.values.len() as u32;
        bucket.values.push(value.clone());
        bucket.index.insert(value, local);
        (local, true)
    }

    pub fn get(&self, group: P, local: u32) -> &V {
        &self.groups.get(&group).expect("dangling group id").values[local as usize]
    }

    /// Number of entities interned within `group`'s bucket.
    pub fn group_len(&self, group: P) -> usize {
        self.groups.get(&group).map_or(0, |g| g.values.len())
    }

    pub fn groups(&self) -> impl Iterator<Item = P> + '_ {
        self.groups.keys().copied()
    }

    pub fn iter_group(&self, group: P) -> impl Iterator<Item = (u32, &V)> + '_ {
        self.groups
            .get(&group)
            .into_iter()
            .flat_map(|g| g.values.iter().enumerate().map(|(i, v)| (i as u32, v)))
    }
}
