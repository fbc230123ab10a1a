//! Convenience re-exports for common usage patterns.
//!
//! Import everything with:
//!
//! ```
//! use error_kin::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`family!`], [`make_error!`], [`make_error_with!`], [`raise!`],
//!   [`raise_with!`]
//! - **Types**: [`Fault`], [`Outcome`], [`Protected`], [`Frame`]
//! - **Traits**: [`Kind`], [`Payload`]
//! - **Functions**: [`protect`], [`decorate`], [`raise_error`], [`run_main`],
//!   [`set_debug`], [`set_uncaught_hook`]
//!
//! # Examples
//!
//! ```
//! use error_kin::prelude::*;
//!
//! family! {
//!     /// Anything the parser rejects.
//!     pub ParseError;
//! }
//!
//! fn parse(input: &str) -> Outcome {
//!     if input.is_empty() {
//!         return Err(ParseError::make("empty input"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(parse("x").is_ok());
//! assert!(parse("").is_err());
//! ```

// Macros
pub use crate::{family, make_error, make_error_with, raise, raise_with};

// Core types
pub use crate::protect::Protected;
pub use crate::trace::Frame;
pub use crate::types::{Fault, Outcome};

// Traits
pub use crate::hierarchy::Kind;
pub use crate::types::Payload;

// Functions
pub use crate::debug::{debug_enabled, set_debug};
pub use crate::hook::{run_main, set_uncaught_hook};
pub use crate::protect::{protect, silence_raised_panics};
pub use crate::standard::{decorate, decorate_with, raise_error, StandardError};
