//! Bit-width computation and low/high word-spanning packing (spec §4.7).
//!
//! Variables are placed consecutively into `word_bits`-wide logical words;
//! a variable whose bit width doesn't fit in the remaining bits of the
//! current word spills its high-order bits into the head of the next word
//! ("low portion" + "high portion"), never spanning more than two. Each
//! portion is a `(word_mask, right_shift, value_mask, value_shift)` tuple,
//! exactly as spec'd, so a [`VariableReference`] can read/write its value
//! with one mask-and-shift per portion.

use crate::error::FdrError;
use crate::variable::{bit_width, FDRVariable};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FieldPortion {
    pub word_mask: u64,
    pub right_shift: u32,
    pub value_mask: u64,
    pub value_shift: u32,
}

impl FieldPortion {
    fn new(shift_in_word: u32, width: u32, value_shift: u32) -> Self {
        FieldPortion {
            word_mask: ((1u64 << width) - 1) << shift_in_word,
            right_shift: shift_in_word,
            value_mask: (1u64 << width) - 1,
            value_shift,
        }
    }
}

/// Base word index plus the low portion (always present, even for a
/// zero-width variable) and an optional high portion for a value that
/// straddles two words.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VariableReference {
    pub base_word: usize,
    pub low: FieldPortion,
    pub high: Option<FieldPortion>,
}

impl VariableReference {
    pub fn get(&self, words: &[u64]) -> u32 {
        let mut value = (words[self.base_word] & self.low.word_mask) >> self.low.right_shift;
        if let Some(high) = &self.high {
            let high_bits = (words[self.base_word + 1] & high.word_mask) >> high.right_shift;
            value |= high_bits << high.value_shift;
        }
        value as u32
    }

    pub fn set(&self, words: &mut [u64], value: u32) {
        let value = value as u64;
        words[self.base_word] = (words[self.base_word] & !self.low.word_mask) | ((value & self.low.value_mask) << self.low.right_shift);
        if let Some(high) = &self.high {
            let high_part = (value >> high.value_shift) & high.value_mask;
            words[self.base_word + 1] = (words[self.base_word + 1] & !high.word_mask) | (high_part << high.right_shift);
        }
    }
}

/// The packed layout of an ordered list of variables: one
/// [`VariableReference`] per variable, plus the total number of
/// `word_bits`-wide words the packed state occupies.
pub struct PackedLayout {
    pub word_bits: u32,
    pub references: Vec<VariableReference>,
    pub total_words: usize,
}

impl PackedLayout {
    /// Lays out `variables` in order, packing into `word_bits`-wide words
    /// (never spanning more than two consecutive ones per variable).
    ///
    /// Fails if a variable's domain is empty, or its bit width doesn't fit
    /// in two consecutive `word_bits`-wide words even starting from a fresh
    /// one.
    pub fn build(variables: &[FDRVariable], word_bits: u32) -> Result<Self, FdrError> {
        let mut references = Vec::with_capacity(variables.len());
        let mut word_index = 0usize;
        let mut bit_cursor = 0u32;

        for variable in variables {
            if variable.domain_size == 0 {
                return Err(FdrError::EmptyDomain);
            }

            let width = bit_width(variable.domain_size);
            if width > 2 * word_bits {
                return Err(FdrError::CapacityExceeded(width, word_bits));
            }
            let remaining = word_bits - bit_cursor;

            if width == 0 {
                // A domain of size <=1 carries no information; still give it
                // a reference so callers can treat every variable uniformly.
                references.push(VariableReference { base_word: word_index, low: FieldPortion::new(bit_cursor, 0, 0), high: None });
                continue;
            }

            if width <= remaining {
                let portion = FieldPortion::new(bit_cursor, width, 0);
                references.push(VariableReference { base_word: word_index, low: portion, high: None });
                bit_cursor += width;
            } else {
                let low_width = remaining;
                let high_width = width - low_width;
                let low = FieldPortion::new(bit_cursor, low_width, 0);
                let high = FieldPortion::new(0, high_width, low_width);
                references.push(VariableReference { base_word: word_index, low, high: Some(high) });
                word_index += 1;
                bit_cursor = high_width;
            }

            if bit_cursor == word_bits {
                word_index += 1;
                bit_cursor = 0;
            }
        }

        let total_words = word_index + if bit_cursor > 0 { 1 } else { 0 };
        Ok(PackedLayout { word_bits, references, total_words: total_words.max(1) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(domain_size: u32) -> FDRVariable {
        FDRVariable { domain_size, atoms: Vec::new() }
    }

    #[test]
    fn three_variables_fit_one_64_bit_word() {
        let vars = vec![var(3), var(5), var(9)];
        let layout = PackedLayout::build(&vars, 64).unwrap();
        assert_eq!(layout.total_words, 1);
        for r in &layout.references {
            assert!(r.high.is_none());
            assert_eq!(r.base_word, 0);
        }
    }

    #[test]
    fn four_variables_span_two_bytes_on_an_8_bit_word() {
        let vars = vec![var(3), var(5), var(9), var(17)];
        let layout = PackedLayout::build(&vars, 8).unwrap();
        // widths 2,3,4,5: cursor sits at bit 5 of word 0 after the first two
        // variables; the third (width 4) doesn't fit in the remaining 3
        // bits and splits 3-low/1-high, pushing the fourth entirely into
        // word 1.
        assert_eq!(layout.total_words, 2);
        assert!(layout.references[2].high.is_some());
        assert!(layout.references[3].high.is_none());
    }

    #[test]
    fn packing_round_trips_through_get_and_set() {
        let vars = vec![var(3), var(5), var(9), var(17)];
        let layout = PackedLayout::build(&vars, 8).unwrap();
        let mut words = vec![0u64; layout.total_words];
        let values = [2u32, 4, 8, 16];
        for (r, &v) in layout.references.iter().zip(values.iter()) {
            r.set(&mut words, v);
        }
        for (r, &v) in layout.references.iter().zip(values.iter()) {
            assert_eq!(r.get(&words), v);
        }
    }

    #[test]
    fn empty_domain_is_rejected() {
        let vars = vec![FDRVariable { domain_size: 0, atoms: Vec::new() }];
        assert!(matches!(PackedLayout::build(&vars, 64), Err(FdrError::EmptyDomain)));
    }
}
