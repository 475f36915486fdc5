//! A thin newtype over `fixedbitset::FixedBitSet`, giving the grounding
//! core's graph structures a named type instead of depending on the crate
//! type directly everywhere.

use fixedbitset::FixedBitSet;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bitset(FixedBitSet);

impl Bitset {
    pub fn with_capacity(bits: usize) -> Self {
        Bitset(FixedBitSet::with_capacity(bits))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_clear()
    }

    pub fn test(&self, index: usize) -> bool {
        self.0.contains(index)
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.0.set(index, value);
    }

    pub fn insert(&mut self, index: usize) {
        self.0.insert(index);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn count_ones(&self) -> usize {
        self.0.count_ones(..)
    }

    pub fn any(&self) -> bool {
        self.0.count_ones(..) > 0
    }

    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.ones()
    }

    pub fn union_with(&mut self, other: &Bitset) {
        self.0.union_with(&other.0);
    }

    pub fn intersect_with(&mut self, other: &Bitset) {
        self.0.intersect_with(&other.0);
    }

    pub fn xor_into(&mut self, other: &Bitset) {
        // `self ^= other`
        for i in 0..self.len().max(other.len()) {
            if other.test(i) {
                let cur = self.test(i);
                self.set(i, !cur);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_test_round_trip() {
        let mut bs = Bitset::with_capacity(8);
        bs.set(3, true);
        assert!(bs.test(3));
        assert!(!bs.test(4));
        assert_eq!(bs.count_ones(), 1);
    }

    #[test]
    fn xor_into_computes_symmetric_difference() {
        let mut a = Bitset::with_capacity(4);
        a.set(0, true);
        a.set(1, true);
        let mut b = Bitset::with_capacity(4);
        b.set(1, true);
        b.set(2, true);
        a.xor_into(&b);
        assert!(a.test(0));
        assert!(!a.test(1));
        assert!(a.test(2));
    }
}
