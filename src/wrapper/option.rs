//! [`OptionAsync`]: a pending `Option`.

use super::result::ResultAsync;
use crate::bridge::IntoOptionAsync;
use crate::combinator;
use crate::pending::{CatchPanic, Settle};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A handle to a pending computation of an `Option<T>`.
///
/// Static constructors start the computation immediately: the producer is
/// polled once before the constructor returns. Chaining methods never run
/// user code at call time; they return a new handle whose work happens when
/// it is awaited. Awaiting yields the resolved `Option<T>`.
///
/// ```
/// use asum::OptionAsync;
/// use futures_lite::future::block_on;
///
/// let doubled = OptionAsync::from_future(async { 21 })
///     .map(|n| n * 2)
///     .filter(|n| *n > 40);
/// assert_eq!(block_on(doubled), Some(42));
/// ```
#[must_use = "futures do nothing unless polled"]
pub struct OptionAsync<T> {
    cell: Settle<Option<T>>,
}

impl<T: Send + 'static> OptionAsync<T> {
    /// Starts `future` and wraps its `Option` result.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Option<T>> + Send + 'static,
    {
        Self {
            cell: Settle::eager(Box::pin(future)),
        }
    }

    /// Starts `future` and wraps its value in `Some`.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::new(async move { Some(future.await) })
    }

    /// Like [`new`](Self::new), but a panic in `future` resolves to `None`.
    pub fn try_new<F>(future: F) -> Self
    where
        F: Future<Output = Option<T>> + Send + 'static,
    {
        let guarded = CatchPanic::new(future);
        Self::new(async move { guarded.await.ok().flatten() })
    }

    /// Like [`from_future`](Self::from_future), but a panic in `future`
    /// resolves to `None`.
    pub fn try_from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let guarded = CatchPanic::new(future);
        Self::new(async move { guarded.await.ok() })
    }

    /// An already-resolved `Some(value)`.
    pub fn some(value: T) -> Self {
        Self::from_option(Some(value))
    }

    /// An already-resolved `None`.
    pub fn none() -> Self {
        Self::from_option(None)
    }

    /// An already-resolved handle to `option`.
    pub fn from_option(option: Option<T>) -> Self {
        Self {
            cell: Settle::resolved(option),
        }
    }

    /// Continuation handle; the producer runs on first poll.
    pub(crate) fn chain<F>(future: F) -> Self
    where
        F: Future<Output = Option<T>> + Send + 'static,
    {
        Self {
            cell: Settle::lazy(Box::pin(future)),
        }
    }

    /// Returns `true` once the underlying computation has resolved.
    pub fn is_settled(&self) -> bool {
        self.cell.is_settled()
    }

    // ---- aggregation --------------------------------------------------------

    /// `Some` of every value in input order, or `None` as soon as the lowest
    /// indexed handle resolves to `None`.
    ///
    /// An empty input resolves to `Some(vec![])`.
    pub fn all<I>(handles: I) -> OptionAsync<Vec<T>>
    where
        I: IntoIterator<Item = Self>,
    {
        let all = combinator::all(handles);
        OptionAsync::new(async move { all.await.ok() })
    }

    /// Waits for every handle; `Some` of every value if none was `None`.
    pub fn all_settled<I>(handles: I) -> OptionAsync<Vec<T>>
    where
        I: IntoIterator<Item = Self>,
    {
        let settled = combinator::all_settled(handles);
        OptionAsync::new(async move { settled.await.ok() })
    }

    /// The first `Some` by input index; `None` if every handle was `None`.
    pub fn any<I>(handles: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let any = combinator::any(handles);
        Self::new(async move { any.await.ok() })
    }

    // ---- chaining -----------------------------------------------------------

    /// Maps the present value with `f`.
    pub fn map<U, F>(self, f: F) -> OptionAsync<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        OptionAsync::chain(async move { self.await.map(f) })
    }

    /// Maps the present value with an asynchronous `f`.
    pub fn map_async<U, F, Fut>(self, f: F) -> OptionAsync<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send,
    {
        OptionAsync::chain(async move {
            match self.await {
                Some(value) => Some(f(value).await),
                None => None,
            }
        })
    }

    /// Chains `f` on the present value. `f` may return an `Option` or an
    /// `OptionAsync`.
    pub fn and_then<R, F>(self, f: F) -> OptionAsync<R::Value>
    where
        R: IntoOptionAsync,
        F: FnOnce(T) -> R + Send + 'static,
    {
        OptionAsync::chain(async move {
            match self.await {
                Some(value) => f(value).into_option_async().await,
                None => None,
            }
        })
    }

    /// Chains an asynchronous `f` on the present value.
    pub fn and_then_async<U, F, Fut>(self, f: F) -> OptionAsync<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Option<U>> + Send,
    {
        OptionAsync::chain(async move {
            match self.await {
                Some(value) => f(value).await,
                None => None,
            }
        })
    }

    /// Recovers from `None` with `f`. `f` may return an `Option` or an
    /// `OptionAsync`.
    pub fn or_else<R, F>(self, f: F) -> Self
    where
        R: IntoOptionAsync<Value = T>,
        F: FnOnce() -> R + Send + 'static,
    {
        Self::chain(async move {
            match self.await {
                Some(value) => Some(value),
                None => f().into_option_async().await,
            }
        })
    }

    /// Recovers from `None` with an asynchronous `f`.
    pub fn or_else_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Option<T>> + Send,
    {
        Self::chain(async move {
            match self.await {
                Some(value) => Some(value),
                None => f().await,
            }
        })
    }

    /// `other` if this is `Some`, otherwise `None`.
    ///
    /// `other` is already running; it is only awaited when needed.
    pub fn and<U: Send + 'static>(self, other: OptionAsync<U>) -> OptionAsync<U> {
        OptionAsync::chain(async move {
            match self.await {
                Some(_) => other.await,
                None => None,
            }
        })
    }

    /// This if `Some`, otherwise `other`.
    pub fn or(self, other: Self) -> Self {
        Self::chain(async move {
            match self.await {
                Some(value) => Some(value),
                None => other.await,
            }
        })
    }

    /// Whichever of the two is `Some`; `None` if both or neither are.
    pub fn xor(self, other: Self) -> Self {
        Self::chain(async move {
            let left = self.await;
            left.xor(other.await)
        })
    }

    /// Keeps the present value only if `predicate` holds.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool + Send + 'static,
    {
        Self::chain(async move { self.await.filter(predicate) })
    }

    /// Keeps the present value only if the asynchronous `predicate` holds.
    pub fn filter_async<P, Fut>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send,
    {
        Self::chain(async move {
            let value = self.await?;
            predicate(&value).await.then_some(value)
        })
    }

    /// Pairs both present values. `other` is not awaited if this is `None`.
    pub fn zip<U: Send + 'static>(self, other: OptionAsync<U>) -> OptionAsync<(T, U)> {
        self.zip_with(other, |left, right| (left, right))
    }

    /// Combines both present values with `f`.
    pub fn zip_with<U, R, F>(self, other: OptionAsync<U>, f: F) -> OptionAsync<R>
    where
        U: Send + 'static,
        R: Send + 'static,
        F: FnOnce(T, U) -> R + Send + 'static,
    {
        OptionAsync::chain(async move {
            let left = self.await?;
            let right = other.await?;
            Some(f(left, right))
        })
    }

    /// Calls `f` with the present value once it resolves, passing the value on
    /// unchanged.
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Self::chain(async move { self.await.inspect(f) })
    }

    /// `Ok(value)` if present, otherwise `Err(error)`.
    pub fn ok_or<E: Send + 'static>(self, error: E) -> ResultAsync<T, E> {
        ResultAsync::chain(async move { self.await.ok_or(error) })
    }

    /// `Ok(value)` if present, otherwise `Err(error())`.
    pub fn ok_or_else<E, F>(self, error: F) -> ResultAsync<T, E>
    where
        E: Send + 'static,
        F: FnOnce() -> E + Send + 'static,
    {
        ResultAsync::chain(async move { self.await.ok_or_else(error) })
    }

    // ---- terminal -----------------------------------------------------------

    /// Awaits and returns the present value.
    ///
    /// # Panics
    ///
    /// Panics if the resolved value is `None`.
    pub async fn unwrap(self) -> T {
        self.await.unwrap()
    }

    /// Awaits and returns the present value.
    ///
    /// # Panics
    ///
    /// Panics with `message` if the resolved value is `None`.
    pub async fn expect(self, message: &str) -> T {
        self.await.expect(message)
    }

    /// Awaits and returns the present value or `default`.
    pub async fn unwrap_or(self, default: T) -> T {
        self.await.unwrap_or(default)
    }

    /// Awaits and returns the present value or `default()`.
    pub async fn unwrap_or_else<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.await.unwrap_or_else(default)
    }

    /// Awaits and returns the present value or `T::default()`.
    pub async fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.await.unwrap_or_default()
    }

    /// Awaits and reports whether the value is present.
    pub async fn is_some(self) -> bool {
        self.await.is_some()
    }

    /// Awaits and reports whether the value is absent.
    pub async fn is_none(self) -> bool {
        self.await.is_none()
    }

    /// Awaits and reports whether the value is present and satisfies
    /// `predicate`. The predicate is not called on `None`.
    pub async fn is_some_and<P>(self, predicate: P) -> bool
    where
        P: FnOnce(T) -> bool,
    {
        self.await.is_some_and(predicate)
    }

    /// Awaits, then applies `f` to the present value or returns `default`.
    pub async fn map_or<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        self.await.map_or(default, f)
    }

    /// Awaits, then applies `f` to the present value or calls `default`.
    pub async fn map_or_else<U, D, F>(self, default: D, f: F) -> U
    where
        D: FnOnce() -> U,
        F: FnOnce(T) -> U,
    {
        self.await.map_or_else(default, f)
    }

    /// Awaits once and dispatches to exactly one handler.
    pub async fn match_with<U, S, N>(self, some: S, none: N) -> U
    where
        S: FnOnce(T) -> U,
        N: FnOnce() -> U,
    {
        match self.await {
            Some(value) => some(value),
            None => none(),
        }
    }

    /// Awaits once, dispatches to exactly one asynchronous handler and awaits
    /// its result.
    pub async fn match_with_async<U, S, SFut, N, NFut>(self, some: S, none: N) -> U
    where
        S: FnOnce(T) -> SFut,
        SFut: Future<Output = U>,
        N: FnOnce() -> NFut,
        NFut: Future<Output = U>,
    {
        match self.await {
            Some(value) => some(value).await,
            None => none().await,
        }
    }
}

impl<T: Send + 'static> OptionAsync<Option<T>> {
    /// Removes one level of nesting.
    pub fn flatten(self) -> OptionAsync<T> {
        OptionAsync::chain(async move { self.await.flatten() })
    }
}

impl<T: Send + 'static> OptionAsync<OptionAsync<T>> {
    /// Awaits the inner handle when present.
    pub fn flatten(self) -> OptionAsync<T> {
        OptionAsync::chain(async move {
            match self.await {
                Some(inner) => inner.await,
                None => None,
            }
        })
    }
}

impl<T: Send + 'static, E: Send + 'static> OptionAsync<Result<T, E>> {
    /// `Option<Result<T, E>>` to `Result<Option<T>, E>`.
    pub fn transpose(self) -> ResultAsync<Option<T>, E> {
        ResultAsync::chain(async move { self.await.transpose() })
    }
}

impl<T> Future for OptionAsync<T> {
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().cell).poll(cx)
    }
}

impl<T: Clone> Clone for OptionAsync<T> {
    /// Adds another observer of the same computation. Cloning a handle that
    /// was already polled to completion yields a completed handle.
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Send + 'static> Default for OptionAsync<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for OptionAsync<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionAsync")
            .field("cell", &self.cell)
            .finish()
    }
}
