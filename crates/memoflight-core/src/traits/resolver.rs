//! Key resolution: mapping call arguments to a two-level key tuple

use std::fmt::Display;
use std::sync::Arc;

/// A resolved key tuple: `group` partitions independent cache slots, `key`
/// distinguishes which version of the slot's input produced the cached
/// value. Changing `key` within a group invalidates the existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolvedKey {
    /// Top-level cache partition; one entry slot per group
    pub group: String,
    /// Secondary discriminator within the group
    pub key: String,
}

impl ResolvedKey {
    /// Build a key tuple from explicit components
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
        }
    }

    /// A scalar key used as both group and key-within-group, making the
    /// slot behave as a single-version cache keyed purely by group
    pub fn single(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            group: key.clone(),
            key,
        }
    }
}

/// Values a resolver closure may return
///
/// A scalar is duplicated into both components; a pair maps to
/// `(group, key)`. Every component is stringified, so the tuple is always a
/// well-formed pair of strings usable as storage lookup keys.
pub trait ResolveKey {
    /// Convert into the canonical key tuple
    fn resolve_key(self) -> ResolvedKey;
}

impl ResolveKey for ResolvedKey {
    fn resolve_key(self) -> ResolvedKey {
        self
    }
}

impl ResolveKey for String {
    fn resolve_key(self) -> ResolvedKey {
        ResolvedKey::single(self)
    }
}

impl ResolveKey for &str {
    fn resolve_key(self) -> ResolvedKey {
        ResolvedKey::single(self)
    }
}

impl<G: Display, K: Display> ResolveKey for (G, K) {
    fn resolve_key(self) -> ResolvedKey {
        ResolvedKey::new(self.0.to_string(), self.1.to_string())
    }
}

/// Absent key: the empty tuple, for resolvers that opt out of keying
impl ResolveKey for () {
    fn resolve_key(self) -> ResolvedKey {
        ResolvedKey::default()
    }
}

macro_rules! impl_resolve_key_scalar {
    ($($ty:ty),*) => {
        $(
            impl ResolveKey for $ty {
                fn resolve_key(self) -> ResolvedKey {
                    ResolvedKey::single(self.to_string())
                }
            }
        )*
    };
}

impl_resolve_key_scalar!(bool, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, isize);

/// Boxed resolver closure attached to a wrapped function
pub type KeyResolver<A> = Arc<dyn Fn(&A) -> ResolvedKey + Send + Sync>;

/// The default resolver: ignores all arguments and returns the constant
/// empty group, so the wrapped function evaluates as a global singleton
/// ("load once globally").
pub fn singleton_resolver<A>() -> KeyResolver<A> {
    Arc::new(|_| ResolvedKey::default())
}
