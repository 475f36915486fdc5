/// The classification a predicate or function is assigned during
/// preparation (see `translate`'s classification pass).
///
/// Represented as a plain enum field on `Predicate`/`Function` rather than as
/// a phantom type parameter `Predicate<K>`: the design notes call the
/// tagged-union style a clean fit for the data side, and a runtime tag keeps
/// one dense `PredicateId` space instead of four parallel ones, at no cost to
/// the uniqueness or kind-consistency invariants (the tag is part of the
/// interning key).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EntityKind {
    /// True in every reachable state; never appears in an effect head.
    Static,
    /// May change across states; appears in at least one action effect head.
    Fluent,
    /// Computed by axioms from other atoms; never appears in an action effect.
    Derived,
    /// Synthesised bookkeeping (e.g. the implicit `total-cost` function) with
    /// no counterpart in the original domain description.
    Auxiliary,
}

impl EntityKind {
    pub fn is_static(self) -> bool {
        matches!(self, EntityKind::Static)
    }

    pub fn is_fluent(self) -> bool {
        matches!(self, EntityKind::Fluent)
    }

    pub fn is_derived(self) -> bool {
        matches!(self, EntityKind::Derived)
    }
}
