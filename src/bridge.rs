//! Lifting between the synchronous sum types and their async wrappers.
//!
//! - [`IntoAsync`]: `into_async()` on any `Option` or `Result`, returning an
//!   already-resolved wrapper
//! - [`IntoOptionAsync`] / [`IntoResultAsync`]: "anything that resolves to an
//!   `Option` / a `Result`", the return bound of `and_then` and `or_else`
//!   callbacks
//!
//! The reverse direction is `.await`.

use crate::wrapper::{OptionAsync, ResultAsync};

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for Option<T> {}
    impl<T, E> Sealed for Result<T, E> {}
}

/// Lifts a synchronous sum-type value into its async wrapper.
///
/// ```
/// use asum::IntoAsync;
/// use futures_lite::future::block_on;
///
/// let lifted = Ok::<u8, ()>(5).into_async();
/// assert!(lifted.is_settled());
/// assert_eq!(block_on(lifted), Ok(5));
/// ```
pub trait IntoAsync: sealed::Sealed {
    /// The wrapper type.
    type Async;

    /// Wraps `self` in an already-resolved wrapper.
    fn into_async(self) -> Self::Async;
}

impl<T: Send + 'static> IntoAsync for Option<T> {
    type Async = OptionAsync<T>;

    fn into_async(self) -> OptionAsync<T> {
        OptionAsync::from_option(self)
    }
}

impl<T: Send + 'static, E: Send + 'static> IntoAsync for Result<T, E> {
    type Async = ResultAsync<T, E>;

    fn into_async(self) -> ResultAsync<T, E> {
        ResultAsync::from_result(self)
    }
}

/// A value that resolves to an `Option`.
pub trait IntoOptionAsync {
    /// The present payload.
    type Value: Send + 'static;

    /// Converts into a pending `Option`.
    fn into_option_async(self) -> OptionAsync<Self::Value>;
}

impl<T: Send + 'static> IntoOptionAsync for Option<T> {
    type Value = T;

    fn into_option_async(self) -> OptionAsync<T> {
        OptionAsync::from_option(self)
    }
}

impl<T: Send + 'static> IntoOptionAsync for OptionAsync<T> {
    type Value = T;

    fn into_option_async(self) -> Self {
        self
    }
}

/// A value that resolves to a `Result`.
pub trait IntoResultAsync {
    /// The success payload.
    type Value: Send + 'static;
    /// The error payload.
    type Error: Send + 'static;

    /// Converts into a pending `Result`.
    fn into_result_async(self) -> ResultAsync<Self::Value, Self::Error>;
}

impl<T: Send + 'static, E: Send + 'static> IntoResultAsync for Result<T, E> {
    type Value = T;
    type Error = E;

    fn into_result_async(self) -> ResultAsync<T, E> {
        ResultAsync::from_result(self)
    }
}

impl<T: Send + 'static, E: Send + 'static> IntoResultAsync for ResultAsync<T, E> {
    type Value = T;
    type Error = E;

    fn into_result_async(self) -> Self {
        self
    }
}

impl<T: Send + 'static> From<Option<T>> for OptionAsync<T> {
    fn from(option: Option<T>) -> Self {
        Self::from_option(option)
    }
}

impl<T: Send + 'static, E: Send + 'static> From<Result<T, E>> for ResultAsync<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_lite::future::block_on;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn lifted_values_are_already_settled() {
        init_test("lifted_values_are_already_settled");
        let some = Some(3).into_async();
        let settled = some.is_settled();
        crate::assert_with_log!(settled, "some settled", true, settled);
        let value = block_on(some);
        crate::assert_with_log!(value == Some(3), "some", Some(3), value);

        let err = Err::<u8, _>("e").into_async();
        let value = block_on(err);
        crate::assert_with_log!(value == Err("e"), "err", "Err(e)", value);
        crate::test_complete!("lifted_values_are_already_settled");
    }

    #[test]
    fn from_impls_match_into_async() {
        init_test("from_impls_match_into_async");
        let option: OptionAsync<u8> = None.into();
        let value = block_on(option);
        crate::assert_with_log!(value.is_none(), "none", None::<u8>, value);
        let result: ResultAsync<u8, ()> = Ok(1).into();
        let value = block_on(result);
        crate::assert_with_log!(value == Ok(1), "ok", Ok::<u8, ()>(1), value);
        crate::test_complete!("from_impls_match_into_async");
    }
}
