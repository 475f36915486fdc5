use crate::Ref;
use std::marker::PhantomData;

/// A sparse map keyed by a dense identifier type `K`, backed by a `Vec<Option<V>>`.
///
/// Mirrors `aries_collections::ref_store::RefMap`, used where not every key in
/// a dense id space has an associated value (e.g. the expression-to-literal
/// binding cache in `DiscreteModel::expr_binding`).
#[derive(Clone)]
pub struct RefMap<K, V> {
    values: Vec<Option<V>>,
    _phantom: PhantomData<K>,
}

impl<K, V> Default for RefMap<K, V> {
    fn default() -> Self {
        RefMap { values: Vec::new(), _phantom: PhantomData }
    }
}

impl<K: Ref, V> RefMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index: usize = key.into();
        if index >= self.values.len() {
            self.values.resize_with(index + 1, || None);
        }
        self.values[index].replace(value)
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.values.get(key.into()).and_then(|v| v.as_ref())
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        let index: usize = key.into();
        self.values.get_mut(index).and_then(|v| v.take())
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
