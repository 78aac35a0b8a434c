//! Producer seam: the wrapped asynchronous function

use std::future::Future;

use async_trait::async_trait;

use crate::error::Result;

/// The asynchronous function being wrapped
///
/// Any `Fn(A) -> impl Future<Output = Result<T>>` closure implements this
/// automatically; implement it by hand when the producer carries its own
/// state (connection pools, clients).
///
/// Retry policy belongs here, not in the cache: the lifecycle engine
/// records a failed settlement and moves on.
#[async_trait]
pub trait Producer<A, T>: Send + Sync {
    /// Produce the result for one invocation's arguments
    async fn produce(&self, args: A) -> Result<T>;
}

#[async_trait]
impl<A, T, F, Fut> Producer<A, T> for F
where
    A: Send + 'static,
    T: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T>> + Send,
{
    async fn produce(&self, args: A) -> Result<T> {
        (self)(args).await
    }
}
