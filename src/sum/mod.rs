//! Synchronous sum-type core.
//!
//! The present/absent types are `std`'s own [`Option`] and [`Result`]; this
//! module only adds what their inherent API lacks:
//!
//! - [`OptionExt`]: `zip_map`, and `replace_value`, which leaves `None` empty
//! - [`ResultExt`]: same-type `flatten_result`
//! - [`SuccessExt`] / [`FailureExt`]: widening a `Result` whose other channel
//!   is uninhabited
//! - [`option::catch`], [`result::catch`], [`result::catch_with`]: run a
//!   closure and turn a panic into the absent variant
//!
//! `take`, `replace` and `replace_value` act on `&mut Option<T>`, so mutation
//! always needs an exclusive borrow.

pub mod option;
pub mod result;

pub use option::OptionExt;
pub use result::{FailureExt, ResultExt, SuccessExt};

mod sealed {
    use std::convert::Infallible;

    pub trait Sealed {}

    impl<T> Sealed for Option<T> {}
    impl<T, E> Sealed for Result<Result<T, E>, E> {}

    pub trait SealedSuccess {}
    impl<T> SealedSuccess for Result<T, Infallible> {}

    pub trait SealedFailure {}
    impl<E> SealedFailure for Result<Infallible, E> {}
}
