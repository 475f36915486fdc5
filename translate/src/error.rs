use thiserror::Error;

/// A source coordinate an external parser could attach; this crate has no
/// parser of its own, so it's always `None` here and left for a future
/// front end to populate.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SourceSpan {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("unbound variable `{name}`{span:?}")]
    UnboundVariable { name: String, span: Option<SourceSpan> },

    #[error("unknown predicate `{name}`{span:?}")]
    UnknownPredicate { name: String, span: Option<SourceSpan> },

    #[error("unknown function `{name}`{span:?}")]
    UnknownFunction { name: String, span: Option<SourceSpan> },

    #[error("wrong arity for `{name}`: expected {expected}, got {actual}{span:?}")]
    ArityMismatch { name: String, expected: u32, actual: u32, span: Option<SourceSpan> },

    #[error("unknown object `{name}`{span:?}")]
    UnknownObject { name: String, span: Option<SourceSpan> },

    #[error(transparent)]
    KindMismatch(#[from] KindMismatch),
}

/// A predicate or function used in a position inconsistent with its
/// inferred classification, e.g. a static predicate appearing in an
/// effect's add list.
#[derive(Debug, Error)]
#[error("`{name}` was classified as {classified:?} but used as {used_as:?}{span:?}")]
pub struct KindMismatch {
    pub name: String,
    pub classified: formalism::EntityKind,
    pub used_as: formalism::EntityKind,
    pub span: Option<SourceSpan>,
}
