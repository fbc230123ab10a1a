//! The standard error kind and foreign-error conveniences.
//!
//! [`StandardError`] is the generic, root-parented kind used when no richer
//! kind applies: anonymous errors built with
//! [`make_error!`](crate::make_error), and foreign errors pulled into the
//! hierarchy by [`decorate`].
//!
//! # Examples
//!
//! ```
//! use std::io;
//! use error_kin::standard::{decorate, source_of};
//!
//! error_kin::set_debug(false);
//!
//! let io_err = io::Error::other("disk on fire");
//! let fault = decorate(io_err);
//! assert!(fault.message().is_empty());
//! assert!(source_of(&fault).is_some());
//! assert!(fault.to_string().contains("disk on fire"));
//! ```

use std::error::Error;

use crate::family;
use crate::types::Fault;

family! {
    /// Generic kind for anonymous and decorated foreign errors.
    pub StandardError;
}

/// Pulls a foreign error into the hierarchy.
///
/// The foreign error becomes the cause of an empty-message
/// [`StandardError`] fault; its rendition therefore shows the identity
/// prefix followed by the foreign error's own text. A boxed [`Fault`] is
/// passed through unwrapped rather than double-wrapped.
pub fn decorate<E: Error + Send + Sync + 'static>(err: E) -> Fault {
    decorate_boxed(Box::new(err))
}

/// [`decorate`] for already-boxed errors.
pub fn decorate_boxed(err: Box<dyn Error + Send + Sync>) -> Fault {
    match err.downcast::<Fault>() {
        Ok(fault) => *fault,
        Err(foreign) => Fault::of::<StandardError>("").with_cause_arc(foreign.into()),
    }
}

/// [`decorate`] with a message and error code of the wrapper's own.
///
/// Unlike plain decoration the fault carries its own text; the foreign
/// error still renders in the `Source:` block.
pub fn decorate_with<E: Error + Send + Sync + 'static>(
    err: E,
    code: i64,
    message: impl Into<String>,
) -> Fault {
    Fault::of::<StandardError>(message)
        .set_code(code)
        .with_cause(err)
}

/// Raises `err` as an abrupt exit, decorating foreign errors first.
pub fn raise_error<E: Error + Send + Sync + 'static>(err: E) -> ! {
    decorate(err).raise()
}

/// The wrapped cause of `err`, or `None` when `err` is not a [`Fault`].
pub fn source_of<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a (dyn Error + 'static)> {
    err.downcast_ref::<Fault>().and_then(Fault::cause)
}
