//! [`ResultAsync`]: a pending `Result`.

use super::option::OptionAsync;
use crate::bridge::IntoResultAsync;
use crate::combinator;
use crate::error::Error;
use crate::pending::{CatchPanic, Settle};
use crate::types::PanicPayload;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A handle to a pending computation of a `Result<T, E>`.
///
/// Same resolution model as [`OptionAsync`]: constructors start the producer,
/// chaining is deferred until the new handle is awaited, and the computation
/// resolves at most once however many handles observe it.
///
/// ```
/// use asum::ResultAsync;
/// use futures_lite::future::block_on;
///
/// let parsed = ResultAsync::from_result("42".parse::<u32>())
///     .map_err(|err| err.to_string())
///     .and_then(|n| if n > 40 { Ok(n) } else { Err("too small".to_string()) });
/// assert_eq!(block_on(parsed), Ok(42));
/// ```
#[must_use = "futures do nothing unless polled"]
pub struct ResultAsync<T, E> {
    cell: Settle<Result<T, E>>,
}

impl<T: Send + 'static, E: Send + 'static> ResultAsync<T, E> {
    /// Starts `future` and wraps its `Result`.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            cell: Settle::eager(Box::pin(future)),
        }
    }

    /// Starts `future` and wraps its value in `Ok`.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::new(async move { Ok(future.await) })
    }

    /// Like [`new`](Self::new), but a panic in `future` resolves to
    /// `Err(map_panic(payload))`.
    pub fn try_new<F, M>(future: F, map_panic: M) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        M: FnOnce(PanicPayload) -> E + Send + 'static,
    {
        let guarded = CatchPanic::new(future);
        Self::new(async move {
            guarded
                .await
                .unwrap_or_else(|payload| Err(map_panic(payload)))
        })
    }

    /// An already-resolved `Ok(value)`.
    pub fn ok(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    /// An already-resolved `Err(error)`.
    pub fn err(error: E) -> Self {
        Self::from_result(Err(error))
    }

    /// An already-resolved handle to `result`.
    pub fn from_result(result: Result<T, E>) -> Self {
        Self {
            cell: Settle::resolved(result),
        }
    }

    /// Continuation handle; the producer runs on first poll.
    pub(crate) fn chain<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            cell: Settle::lazy(Box::pin(future)),
        }
    }

    /// Returns `true` once the underlying computation has resolved.
    pub fn is_settled(&self) -> bool {
        self.cell.is_settled()
    }

    /// `Ok` of every value in input order, or the error of the lowest indexed
    /// handle that failed. Later handles are not awaited once it is known.
    ///
    /// An empty input resolves to `Ok(vec![])`.
    pub fn all<I>(handles: I) -> ResultAsync<Vec<T>, E>
    where
        I: IntoIterator<Item = Self>,
    {
        let all = combinator::all(handles);
        ResultAsync::new(all)
    }

    /// Waits for every handle; `Ok` of every value if none failed, otherwise
    /// `Err` of every error in input order.
    pub fn all_settled<I>(handles: I) -> ResultAsync<Vec<T>, Vec<E>>
    where
        I: IntoIterator<Item = Self>,
    {
        ResultAsync::new(combinator::all_settled(handles))
    }

    /// The first `Ok` by input index, or every error in input order.
    pub fn any<I>(handles: I) -> ResultAsync<T, Vec<E>>
    where
        I: IntoIterator<Item = Self>,
    {
        ResultAsync::new(combinator::any(handles))
    }

    /// Maps the success value with `f`.
    pub fn map<U, F>(self, f: F) -> ResultAsync<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        ResultAsync::chain(async move { self.await.map(f) })
    }

    /// Maps the success value with an asynchronous `f`.
    pub fn map_async<U, F, Fut>(self, f: F) -> ResultAsync<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send,
    {
        ResultAsync::chain(async move {
            match self.await {
                Ok(value) => Ok(f(value).await),
                Err(error) => Err(error),
            }
        })
    }

    /// Maps the error with `f`.
    pub fn map_err<G, F>(self, f: F) -> ResultAsync<T, G>
    where
        G: Send + 'static,
        F: FnOnce(E) -> G + Send + 'static,
    {
        ResultAsync::chain(async move { self.await.map_err(f) })
    }

    /// Maps the error with an asynchronous `f`.
    pub fn map_err_async<G, F, Fut>(self, f: F) -> ResultAsync<T, G>
    where
        G: Send + 'static,
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = G> + Send,
    {
        ResultAsync::chain(async move {
            match self.await {
                Ok(value) => Ok(value),
                Err(error) => Err(f(error).await),
            }
        })
    }

    /// Chains `f` on the success value. `f` may return a `Result` or a
    /// `ResultAsync` with the same error type.
    pub fn and_then<R, F>(self, f: F) -> ResultAsync<R::Value, E>
    where
        R: IntoResultAsync<Error = E>,
        F: FnOnce(T) -> R + Send + 'static,
    {
        ResultAsync::chain(async move {
            match self.await {
                Ok(value) => f(value).into_result_async().await,
                Err(error) => Err(error),
            }
        })
    }

    /// Chains an asynchronous `f` on the success value.
    pub fn and_then_async<U, F, Fut>(self, f: F) -> ResultAsync<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<U, E>> + Send,
    {
        ResultAsync::chain(async move {
            match self.await {
                Ok(value) => f(value).await,
                Err(error) => Err(error),
            }
        })
    }

    /// Recovers from the error with `f`. `f` may return a `Result` or a
    /// `ResultAsync` with the same success type.
    pub fn or_else<R, F>(self, f: F) -> ResultAsync<T, R::Error>
    where
        R: IntoResultAsync<Value = T>,
        F: FnOnce(E) -> R + Send + 'static,
    {
        ResultAsync::chain(async move {
            match self.await {
                Ok(value) => Ok(value),
                Err(error) => f(error).into_result_async().await,
            }
        })
    }

    /// Recovers from the error with an asynchronous `f`.
    pub fn or_else_async<G, F, Fut>(self, f: F) -> ResultAsync<T, G>
    where
        G: Send + 'static,
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, G>> + Send,
    {
        ResultAsync::chain(async move {
            match self.await {
                Ok(value) => Ok(value),
                Err(error) => f(error).await,
            }
        })
    }

    /// `other` if this is `Ok`, otherwise this error.
    pub fn and<U: Send + 'static>(self, other: ResultAsync<U, E>) -> ResultAsync<U, E> {
        ResultAsync::chain(async move {
            match self.await {
                Ok(_) => other.await,
                Err(error) => Err(error),
            }
        })
    }

    /// This if `Ok`, otherwise `other`.
    pub fn or<G: Send + 'static>(self, other: ResultAsync<T, G>) -> ResultAsync<T, G> {
        ResultAsync::chain(async move {
            match self.await {
                Ok(value) => Ok(value),
                Err(_) => other.await,
            }
        })
    }

    /// Pairs both success values. `other` is not awaited if this failed.
    pub fn zip<U: Send + 'static>(self, other: ResultAsync<U, E>) -> ResultAsync<(T, U), E> {
        self.zip_with(other, |left, right| (left, right))
    }

    /// Combines both success values with `f`; the first error wins.
    pub fn zip_with<U, R, F>(self, other: ResultAsync<U, E>, f: F) -> ResultAsync<R, E>
    where
        U: Send + 'static,
        R: Send + 'static,
        F: FnOnce(T, U) -> R + Send + 'static,
    {
        ResultAsync::chain(async move {
            let left = self.await?;
            let right = other.await?;
            Ok(f(left, right))
        })
    }

    /// Calls `f` with the success value once it resolves.
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Self::chain(async move { self.await.inspect(f) })
    }

    /// Calls `f` with the error once it resolves.
    pub fn inspect_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        Self::chain(async move { self.await.inspect_err(f) })
    }

    /// Discards the error channel, like [`Result::ok`].
    pub fn into_ok(self) -> OptionAsync<T> {
        OptionAsync::chain(async move { self.await.ok() })
    }

    /// Discards the success channel, like [`Result::err`].
    pub fn into_err(self) -> OptionAsync<E> {
        OptionAsync::chain(async move { self.await.err() })
    }

    /// Awaits and returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with the error's `Debug` form if the resolved value is `Err`.
    pub async fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        self.await.unwrap()
    }

    /// Awaits and returns the error.
    ///
    /// # Panics
    ///
    /// Panics with the value's `Debug` form if the resolved value is `Ok`.
    pub async fn unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        self.await.unwrap_err()
    }

    /// Awaits and returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with `message` and the error if the resolved value is `Err`.
    pub async fn expect(self, message: &str) -> T
    where
        E: fmt::Debug,
    {
        self.await.expect(message)
    }

    /// Awaits and returns the error.
    ///
    /// # Panics
    ///
    /// Panics with `message` and the value if the resolved value is `Ok`.
    pub async fn expect_err(self, message: &str) -> E
    where
        T: fmt::Debug,
    {
        self.await.expect_err(message)
    }

    /// Awaits and returns the success value or `default`.
    pub async fn unwrap_or(self, default: T) -> T {
        self.await.unwrap_or(default)
    }

    /// Awaits and returns the success value or `default(error)`.
    pub async fn unwrap_or_else<F>(self, default: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        self.await.unwrap_or_else(default)
    }

    /// Awaits and returns the success value or `T::default()`.
    pub async fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.await.unwrap_or_default()
    }

    /// Awaits and reports whether the computation succeeded.
    pub async fn is_ok(self) -> bool {
        self.await.is_ok()
    }

    /// Awaits and reports whether the computation failed.
    pub async fn is_err(self) -> bool {
        self.await.is_err()
    }

    /// Awaits and reports whether the computation succeeded with a value
    /// satisfying `predicate`.
    pub async fn is_ok_and<P>(self, predicate: P) -> bool
    where
        P: FnOnce(T) -> bool,
    {
        self.await.is_ok_and(predicate)
    }

    /// Awaits and reports whether the computation failed with an error
    /// satisfying `predicate`.
    pub async fn is_err_and<P>(self, predicate: P) -> bool
    where
        P: FnOnce(E) -> bool,
    {
        self.await.is_err_and(predicate)
    }

    /// Awaits, then applies `f` to the success value or returns `default`.
    pub async fn map_or<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        self.await.map_or(default, f)
    }

    /// Awaits, then applies `f` to the success value or `default` to the error.
    pub async fn map_or_else<U, D, F>(self, default: D, f: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        self.await.map_or_else(default, f)
    }

    /// Awaits once and dispatches to exactly one handler.
    pub async fn match_with<U, O, X>(self, ok: O, err: X) -> U
    where
        O: FnOnce(T) -> U,
        X: FnOnce(E) -> U,
    {
        match self.await {
            Ok(value) => ok(value),
            Err(error) => err(error),
        }
    }

    /// Awaits once, dispatches to exactly one asynchronous handler and awaits
    /// its result.
    pub async fn match_with_async<U, O, OFut, X, XFut>(self, ok: O, err: X) -> U
    where
        O: FnOnce(T) -> OFut,
        OFut: Future<Output = U>,
        X: FnOnce(E) -> XFut,
        XFut: Future<Output = U>,
    {
        match self.await {
            Ok(value) => ok(value).await,
            Err(error) => err(error).await,
        }
    }
}

impl<T: Send + 'static> ResultAsync<T, Error> {
    /// Starts `future`; a panic in it resolves to `Err(Error::Panicked)`.
    pub fn try_from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let guarded = CatchPanic::new(future);
        Self::new(async move { guarded.await.map_err(Error::Panicked) })
    }
}

impl<T: Send + 'static, E: Send + 'static> ResultAsync<Result<T, E>, E> {
    /// Removes one level of nesting.
    pub fn flatten(self) -> ResultAsync<T, E> {
        ResultAsync::chain(async move { self.await.and_then(|inner| inner) })
    }
}

impl<T: Send + 'static, E: Send + 'static> ResultAsync<ResultAsync<T, E>, E> {
    /// Awaits the inner handle on success.
    pub fn flatten(self) -> ResultAsync<T, E> {
        ResultAsync::chain(async move {
            match self.await {
                Ok(inner) => inner.await,
                Err(error) => Err(error),
            }
        })
    }
}

impl<T: Send + 'static, E: Send + 'static> ResultAsync<Option<T>, E> {
    /// `Result<Option<T>, E>` to `Option<Result<T, E>>`.
    pub fn transpose(self) -> OptionAsync<Result<T, E>> {
        OptionAsync::chain(async move { self.await.transpose() })
    }
}

impl<T, E> Future for ResultAsync<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().cell).poll(cx)
    }
}

impl<T: Clone, E: Clone> Clone for ResultAsync<T, E> {
    /// Adds another observer of the same computation. Cloning a handle that
    /// was already polled to completion yields a completed handle.
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T, E> fmt::Debug for ResultAsync<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultAsync")
            .field("cell", &self.cell)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_lite::future::{self, block_on};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn err_short_circuits_and_then() {
        init_test("err_short_circuits_and_then");
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let chained = ResultAsync::<u8, &str>::err("early").and_then(move |n| {
            flag.store(true, Ordering::SeqCst);
            Ok(n + 1)
        });
        let value = block_on(chained);
        crate::assert_with_log!(value == Err("early"), "error kept", "Err(early)", value);
        let called = called.load(Ordering::SeqCst);
        crate::assert_with_log!(!called, "callback skipped", false, called);
        crate::test_complete!("err_short_circuits_and_then");
    }

    #[test]
    fn or_else_may_change_error_type() {
        init_test("or_else_may_change_error_type");
        let recovered = ResultAsync::<u8, &str>::err("bad")
            .or_else(|error| Err::<u8, usize>(error.len()));
        let value = block_on(recovered);
        crate::assert_with_log!(value == Err(3), "new error", Err::<u8, usize>(3), value);

        let recovered = ResultAsync::<u8, &str>::err("bad")
            .or_else(|_| ResultAsync::<u8, ()>::from_future(async { 9 }));
        let value = block_on(recovered);
        crate::assert_with_log!(value == Ok(9), "recovered", Ok::<u8, ()>(9), value);
        crate::test_complete!("or_else_may_change_error_type");
    }

    #[test]
    fn try_new_maps_panic() {
        init_test("try_new_maps_panic");
        let handle = ResultAsync::try_new(
            async {
                future::yield_now().await;
                if true {
                    panic!("disk on fire");
                }
                Ok::<u8, String>(1)
            },
            |payload| format!("caught: {payload}"),
        );
        let value = block_on(handle);
        let expected: Result<u8, String> = Err("caught: disk on fire".to_string());
        crate::assert_with_log!(value == expected, "mapped panic", expected, value);

        let handle = ResultAsync::try_from_future(async {
            if true {
                panic!("no value");
            }
            1_u8
        });
        let value = block_on(handle);
        let panicked = value.as_ref().is_err_and(Error::is_panicked);
        crate::assert_with_log!(panicked, "panicked error", "Err(Panicked)", value);
        crate::test_complete!("try_new_maps_panic");
    }

    #[test]
    fn transpose_and_flatten() {
        init_test("transpose_and_flatten");
        let transposed = block_on(ResultAsync::<Option<u8>, &str>::ok(Some(5)).transpose());
        crate::assert_with_log!(transposed == Some(Ok(5)), "ok-some", "Some(Ok(5))", transposed);
        let transposed = block_on(ResultAsync::<Option<u8>, &str>::ok(None).transpose());
        crate::assert_with_log!(transposed.is_none(), "ok-none", "None", transposed);

        let nested = ResultAsync::<ResultAsync<u8, &str>, &str>::ok(ResultAsync::err("inner"));
        let flat = block_on(nested.flatten());
        crate::assert_with_log!(flat == Err("inner"), "async nested", "Err(inner)", flat);
        crate::test_complete!("transpose_and_flatten");
    }
}
