//! Small index-typed containers used throughout the workspace to give every
//! interned entity kind its own dense identifier space, in the style of
//! `aries_collections::ref_store` (`RefVec`, `RefMap`) and the hand-rolled
//! `SvId`/`Op` newtypes of the classical-planning state representation.

mod bitset;
mod macros;
mod ref_map;
mod ref_vec;

pub use bitset::Bitset;
pub use ref_map::RefMap;
pub use ref_vec::RefVec;

/// A type that can serve as a dense key into a [`RefVec`]/[`RefMap`].
pub trait Ref: Copy + From<usize> + Into<usize> {}
impl<T: Copy + From<usize> + Into<usize>> Ref for T {}
