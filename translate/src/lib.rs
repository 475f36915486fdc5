//! Turns an abstract `RawDomain`/`RawProblem` tree into a hash-consed
//! [`formalism::Repository`]: classification, then bottom-up translation
//! with a stack-scoped parameter binding, exactly as SPEC_FULL §12/§4.2
//! describe.

pub mod build;
pub mod classify;
pub mod error;
pub mod raw;
pub mod tree;

pub use build::{translate, Builder};
pub use classify::{classify, Classification};
pub use error::{KindMismatch, SourceSpan, TranslationError};
