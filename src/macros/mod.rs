//! Declarative macros: kind declaration and anonymous-error shorthands.
//!
//! - [`macro@crate::family`] - Declares error kinds and the kinds they
//!   derive from, building the static shape table behind
//!   [`Kind`](crate::hierarchy::Kind).
//! - [`macro@crate::make_error`] - Builds a [`StandardError`](crate::standard::StandardError)
//!   fault from a format string.
//! - [`macro@crate::make_error_with`] - Like `make_error!` with a code and a
//!   payload.
//! - [`macro@crate::raise`] - Builds and immediately raises an anonymous
//!   fault.
//!
//! # Examples
//!
//! ```
//! use error_kin::family;
//!
//! family! {
//!     /// Anything wrong with the storage layer.
//!     pub StorageError;
//!     /// A query that the database rejected.
//!     pub QueryError: StorageError;
//! }
//!
//! let fault = QueryError::make("syntax error near SELECT");
//! assert!(fault.derives_from::<StorageError>());
//! ```

/// Declares one or more error kinds.
///
/// Each entry is a marker type plus a [`Kind`](crate::hierarchy::Kind) impl
/// whose qualified name is the declaring module path joined with the type
/// name. Parents are listed after a colon, in declaration order; an entry
/// without parents derives directly from [`Fault`](crate::Fault), the root
/// of every hierarchy.
///
/// # Syntax
///
/// ```text
/// family! {
///     pub KindA;                    // derives from Fault
///     pub KindB: KindA;             // derives from KindA
///     pub KindC: KindA, OtherKind;  // multiple parents, declaration order
/// }
/// ```
///
/// # Examples
///
/// ```
/// use error_kin::{family, Kind};
///
/// family! {
///     /// Root of this app's network failures.
///     pub NetError;
///     /// DNS resolution failed.
///     pub DnsError: NetError;
/// }
///
/// let chain = DnsError::lineage();
/// assert_eq!(chain.len(), 3); // DnsError, NetError, Fault
/// assert!(NetError::make("offline").is_parent_of(&DnsError::make("nxdomain")));
/// ```
#[macro_export]
macro_rules! family {
    () => {};

    (
        $(#[$meta:meta])*
        $vis:vis $name:ident ;
        $($rest:tt)*
    ) => {
        $crate::family!(@declare $(#[$meta])* $vis $name [$crate::Fault]);
        $crate::family!($($rest)*);
    };

    (
        $(#[$meta:meta])*
        $vis:vis $name:ident : $($parent:ty),+ $(,)? ;
        $($rest:tt)*
    ) => {
        $crate::family!(@declare $(#[$meta])* $vis $name [$($parent),+]);
        $crate::family!($($rest)*);
    };

    (@declare $(#[$meta:meta])* $vis:vis $name:ident [$($parent:ty),+]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name;

        impl $crate::hierarchy::Kind for $name {
            fn shape() -> &'static $crate::hierarchy::Shape {
                static SHAPE: $crate::hierarchy::Shape = $crate::hierarchy::Shape {
                    name: concat!(module_path!(), "::", stringify!($name)),
                    embeds: &[$(<$parent as $crate::hierarchy::Kind>::shape),+],
                };
                &SHAPE
            }
        }

        impl $name {
            /// Constructs a fault of this kind.
            $vis fn make(message: impl Into<String>) -> $crate::Fault {
                $crate::Fault::of::<Self>(message)
            }
        }
    };
}

/// Builds an anonymous [`StandardError`](crate::standard::StandardError)
/// fault from a format string.
///
/// # Examples
///
/// ```
/// error_kin::set_debug(false);
/// let fault = error_kin::make_error!("bad input: {}", 42);
/// assert_eq!(fault.message(), "bad input: 42");
/// assert!(fault.trace().is_empty());
/// ```
#[macro_export]
macro_rules! make_error {
    ($($arg:tt)*) => {
        $crate::Fault::of::<$crate::standard::StandardError>(format!($($arg)*))
    };
}

/// [`make_error!`](crate::make_error) with an error code and a payload.
///
/// # Examples
///
/// ```
/// let fault = error_kin::make_error_with!(503, "upstream=db-3", "pool exhausted");
/// assert_eq!(fault.code(), Some(503));
/// assert!(fault.payload().is_some());
/// ```
#[macro_export]
macro_rules! make_error_with {
    ($code:expr, $payload:expr, $($arg:tt)*) => {
        $crate::Fault::of::<$crate::standard::StandardError>(format!($($arg)*))
            .set_code($code)
            .with_payload($payload)
    };
}

/// Builds an anonymous fault and raises it immediately.
///
/// When debug mode is on, the captured trace starts at the raise site.
///
/// # Examples
///
/// ```
/// use error_kin::{protect, raise};
///
/// error_kin::silence_raised_panics();
/// let result = protect(|| raise!("nothing to read")).run();
/// assert_eq!(result.unwrap_err().message(), "nothing to read");
/// ```
#[macro_export]
macro_rules! raise {
    ($($arg:tt)*) => {
        $crate::make_error!($($arg)*).raise()
    };
}

/// [`raise!`](crate::raise) with an error code attached first.
///
/// # Examples
///
/// ```
/// use error_kin::{protect, raise_with};
///
/// error_kin::silence_raised_panics();
/// let result = protect(|| raise_with!(1042, "pool exhausted")).run();
/// assert_eq!(result.unwrap_err().code(), Some(1042));
/// ```
#[macro_export]
macro_rules! raise_with {
    ($code:expr, $($arg:tt)*) => {
        $crate::make_error!($($arg)*).set_code($code).raise()
    };
}
