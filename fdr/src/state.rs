//! A packed finite-domain state: one `u64` word vector, read and written
//! through the `VariableReference`s of a [`crate::layout::PackedLayout`].

use crate::layout::PackedLayout;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FDRState {
    words: Vec<u64>,
}

impl FDRState {
    pub fn zeroed(layout: &PackedLayout) -> Self {
        FDRState { words: vec![0u64; layout.total_words] }
    }

    pub fn get(&self, layout: &PackedLayout, variable: usize) -> u32 {
        layout.references[variable].get(&self.words)
    }

    pub fn set(&mut self, layout: &PackedLayout, variable: usize, value: u32) {
        layout.references[variable].set(&mut self.words, value);
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }
}
