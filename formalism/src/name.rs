//! A small string-interning table built directly on [`grounding_buffer::Buffer`]
//! (spec §4.1's "Buffer"): every predicate, function and object name lives
//! in one append-only byte arena, and entities hold a stable `(offset, len)`
//! reference rather than an owned `String`. Because interning dedupes by
//! content first, two occurrences of the same name always resolve to the
//! same `NameRef`, so `NameRef`'s derived `Eq`/`Hash` is exactly the
//! structural-equality hash-consing needs.

use grounding_buffer::{Buffer, Offset};
use hashbrown::HashMap;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NameRef {
    offset: Offset,
    len: u32,
}

#[derive(Default)]
pub struct StringTable {
    buffer: Buffer,
    index: HashMap<String, NameRef>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> NameRef {
        if let Some(&existing) = self.index.get(name) {
            return existing;
        }
        let offset = self.buffer.append(name.as_bytes());
        let reference = NameRef { offset, len: name.len() as u32 };
        self.index.insert(name.to_string(), reference);
        reference
    }

    /// Looks up a name without interning it.
    pub fn find(&self, name: &str) -> Option<NameRef> {
        self.index.get(name).copied()
    }

    pub fn resolve(&self, reference: NameRef) -> &str {
        std::str::from_utf8(self.buffer.view(reference.offset, reference.len)).expect("interned names are valid utf8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names_share_a_reference() {
        let mut table = StringTable::new();
        let a = table.intern("on");
        let b = table.intern("on");
        let c = table.intern("clear");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.resolve(a), "on");
        assert_eq!(table.resolve(c), "clear");
    }
}
