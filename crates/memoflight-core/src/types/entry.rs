//! Cache slot entry type

use std::fmt;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::time::Instant;

use crate::error::{CacheError, Result};

/// Handle to the (possibly still outstanding) producer result for one entry.
///
/// Every caller deduplicated onto the same entry awaits a clone of this
/// future and receives a clone of the settled output, success or failure.
pub type SharedPromise<T> = Shared<BoxFuture<'static, Result<T>>>;

/// Build a promise that is already resolved with `value`.
pub fn resolved_promise<T>(value: T) -> SharedPromise<T>
where
    T: Clone + Send + Sync + 'static,
{
    let fut: BoxFuture<'static, Result<T>> = Box::pin(futures::future::ready(Ok(value)));
    fut.shared()
}

/// Build a promise that is already rejected with `error`.
pub fn rejected_promise<T>(error: CacheError) -> SharedPromise<T>
where
    T: Clone + Send + Sync + 'static,
{
    let fut: BoxFuture<'static, Result<T>> = Box::pin(futures::future::ready(Err(error)));
    fut.shared()
}

/// Expiry state of a slot entry.
///
/// Replaces the numeric sentinel scheme (`-1` never expires, `0` already
/// expired, negative while pending) with explicit states. `At` an instant in
/// the past means already expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Entry installed, settlement not yet recorded.
    ///
    /// Excluded from freshness and treated as not-expired: a pending entry
    /// never triggers a reload but is never reported fresh either.
    Pending,
    /// Never expires
    Never,
    /// Expires at the given instant
    At(Instant),
}

impl Expiry {
    /// Expiry for a successful settlement under the given TTL.
    ///
    /// `None` means unlimited.
    pub fn after(ttl: Option<Duration>) -> Self {
        match ttl {
            None => Expiry::Never,
            Some(d) => Instant::now()
                .checked_add(d)
                .map_or(Expiry::Never, Expiry::At),
        }
    }

    /// Expiry for a failed settlement: already expired.
    pub fn elapsed() -> Self {
        Expiry::At(Instant::now())
    }

    /// Whether this expiry is still in the future (strict) or unlimited.
    pub fn is_live(&self, now: Instant) -> bool {
        match self {
            Expiry::Pending => false,
            Expiry::Never => true,
            Expiry::At(t) => *t > now,
        }
    }
}

/// The stored record for one group: at most one exists per group at a time.
#[derive(Clone)]
pub struct SlotEntry<T: Clone> {
    /// Key-within-group this entry was created for
    pub key: String,
    /// Shared handle to the producer result; one per entry, never reused
    pub promise: SharedPromise<T>,
    /// True once the settlement continuation has recorded the outcome
    pub settled: bool,
    /// Last known successful result, if any
    pub value: Option<T>,
    /// Expiry state
    pub expire_at: Expiry,
    /// Install token compared by the settlement continuation; a mismatch
    /// means this entry was superseded and the write is discarded
    pub generation: u64,
}

impl<T: Clone> SlotEntry<T> {
    /// A freshly installed entry whose producer call is still outstanding.
    ///
    /// `carried` is the value snapshot inherited from the entry this one
    /// replaces, so stale reads can keep serving it during the reload.
    pub fn pending(
        key: impl Into<String>,
        promise: SharedPromise<T>,
        carried: Option<T>,
        generation: u64,
    ) -> Self {
        Self {
            key: key.into(),
            promise,
            settled: false,
            value: carried,
            expire_at: Expiry::Pending,
            generation,
        }
    }

    /// An entry settled at install time (manual `set`, or a recorded outcome).
    pub fn settled(
        key: impl Into<String>,
        promise: SharedPromise<T>,
        value: Option<T>,
        expire_at: Expiry,
        generation: u64,
    ) -> Self {
        Self {
            key: key.into(),
            promise,
            settled: true,
            value,
            expire_at,
            generation,
        }
    }

    /// Whether this entry answers for the given key-within-group.
    pub fn matches(&self, key: &str) -> bool {
        self.key == key
    }

    /// Settled, and not expired at `now` (strictly).
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.settled && self.expire_at.is_live(now)
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for SlotEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotEntry")
            .field("key", &self.key)
            .field("settled", &self.settled)
            .field("value", &self.value)
            .field("expire_at", &self.expire_at)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
