/// Declares a newtype wrapping a dense `u32` index, with the `From`/`Into<usize>`
/// conversions that [`crate::RefVec`] and [`crate::RefMap`] require.
///
/// Mirrors the hand-written pattern of `SvId`/`Op` in the classical-planning
/// state representation, generated here because the formalism has dozens of
/// entity kinds that each need one such identifier.
#[macro_export]
macro_rules! new_id_type {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        $vis struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn to_u32(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn to_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(x: usize) -> Self {
                $name(x as u32)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(x: $name) -> Self {
                x.0 as usize
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(x: u32) -> Self {
                $name(x)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(x: $name) -> Self {
                x.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}
