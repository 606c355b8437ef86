//! # Value Model Types
//!
//! The closed tagged union every compliance check operates on, plus the
//! configuration-error type raised when an external document cannot be
//! translated into it.

pub mod error;
pub mod value;

pub use error::ValueError;
pub use value::{Mapping, Scalar, Value, ValueKind};
