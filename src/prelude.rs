//! Glob import for the wrappers and every extension trait.
//!
//! ```
//! use asum::prelude::*;
//!
//! let lifted = Some(1).into_async();
//! let paired = Some(2).zip_map(Some(3), |a, b| a * b);
//! assert_eq!(paired, Some(6));
//! # drop(lifted);
//! ```

pub use crate::bridge::{IntoAsync, IntoOptionAsync, IntoResultAsync};
pub use crate::sum::{FailureExt, OptionExt, ResultExt, SuccessExt};
pub use crate::wrapper::{OptionAsync, ResultAsync};
