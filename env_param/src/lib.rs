//! Typed, environment-variable-backed configuration knobs.
//!
//! Usage mirrors `planning/planners/src/encode.rs`'s
//! `EnvParam<SymmetryBreakingType>`: a `static` declares the variable name and
//! its default, and the value is parsed and cached on first access.
//!
//! ```
//! use env_param::EnvParam;
//! static MAX_ARITY: EnvParam<usize> = EnvParam::new("GROUNDING_MAX_ARITY", "16");
//! assert_eq!(MAX_ARITY.get(), 16);
//! ```

use std::fmt::Debug;
use std::str::FromStr;
use std::sync::OnceLock;

pub struct EnvParam<T: 'static> {
    var_name: &'static str,
    default: &'static str,
    cached: OnceLock<T>,
}

impl<T> EnvParam<T>
where
    T: FromStr + Copy,
    T::Err: Debug,
{
    pub const fn new(var_name: &'static str, default: &'static str) -> Self {
        EnvParam { var_name, default, cached: OnceLock::new() }
    }

    /// Reads and parses the value, consulting the environment only on first access.
    pub fn get(&self) -> T {
        *self.cached.get_or_init(|| {
            let raw = std::env::var(self.var_name).unwrap_or_else(|_| self.default.to_string());
            raw.parse()
                .unwrap_or_else(|e| panic!("invalid value for env var {}: {raw:?} ({e:?})", self.var_name))
        })
    }

    /// Overrides the cached value, ignoring the environment. Intended for tests.
    pub fn set(&self, value: T) {
        // OnceLock has no "force reset" outside of tests; re-creating the lock
        // would require interior mutability we do not need in production code.
        let _ = self.cached.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_used_when_unset() {
        static P: EnvParam<usize> = EnvParam::new("ENV_PARAM_TEST_UNSET_VAR", "7");
        assert_eq!(P.get(), 7);
    }
}
