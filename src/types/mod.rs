//! Core value types shared by the sum-type core and the async layer.
//!
//! - [`panic`]: [`PanicPayload`], the cloneable record of a caught panic

pub mod panic;

pub use panic::PanicPayload;
