//! The outermost protected boundary and the uncaught-error hook.
//!
//! [`run_main`] wraps a program's fallible entry point: any fault that
//! propagates past it, whether raised, returned, or a foreign panic payload
//! auto-wrapped into a fault, is handed to the process-wide uncaught-error
//! hook. A hook that returns `Some` makes the error fatal: it is reported
//! and the process exits with status 1. This boundary is the only place the
//! crate ever terminates the process.
//!
//! # Examples
//!
//! ```
//! use error_kin::{run_main, set_uncaught_hook};
//!
//! error_kin::silence_raised_panics();
//!
//! // A hook that swallows everything keeps the process alive.
//! let previous = set_uncaught_hook(|fault| {
//!     eprintln!("recovered: {}", fault.identity());
//!     None
//! });
//!
//! run_main(|| error_kin::raise!("startup failed"));
//!
//! // Hooks are process-wide; put the old one back.
//! error_kin::hook::restore_uncaught_hook(previous);
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::process;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::protect::{classify, Caught};
use crate::standard::StandardError;
use crate::types::{Fault, Outcome};

/// The process-wide uncaught-error handler. Returning `Some` is fatal;
/// returning `None` lets the process continue.
pub type UncaughtHook = Arc<dyn Fn(Fault) -> Option<Fault> + Send + Sync>;

/// Default behavior: every uncaught error is fatal, unchanged.
fn fatal_hook(fault: Fault) -> Option<Fault> {
    Some(fault)
}

static UNCAUGHT: Lazy<RwLock<UncaughtHook>> = Lazy::new(|| RwLock::new(Arc::new(fatal_hook)));

/// Replaces the uncaught-error hook, returning the previous one.
pub fn set_uncaught_hook(
    hook: impl Fn(Fault) -> Option<Fault> + Send + Sync + 'static,
) -> UncaughtHook {
    restore_uncaught_hook(Arc::new(hook))
}

/// Reinstalls a hook previously returned by [`set_uncaught_hook`].
pub fn restore_uncaught_hook(hook: UncaughtHook) -> UncaughtHook {
    match UNCAUGHT.write() {
        Ok(mut slot) => std::mem::replace(&mut *slot, hook),
        Err(_) => hook,
    }
}

fn uncaught_hook() -> UncaughtHook {
    match UNCAUGHT.read() {
        Ok(slot) => Arc::clone(&slot),
        Err(_) => Arc::new(fatal_hook),
    }
}

/// Runs a fallible entry point under the outermost protected boundary.
///
/// An `Ok` completion never touches the hook. A returned `Err`, a raised
/// fault, or a foreign abrupt exit (auto-wrapped into a [`StandardError`]
/// fault, stray string payloads becoming the message) is classified and
/// handed to the hook; the hook's `Some` return terminates the process
/// after reporting.
pub fn run_main<F: FnOnce() -> Outcome>(main: F) {
    let fault = match panic::catch_unwind(AssertUnwindSafe(main)) {
        Ok(Ok(())) => return,
        Ok(Err(fault)) => fault,
        Err(payload) => match classify(payload, None) {
            Caught::Matched(fault) => fault,
            Caught::Unmatched(payload) => wrap_foreign(payload),
        },
    };

    let hook = uncaught_hook();
    if let Some(fatal) = (*hook)(fault) {
        report_fatal(&fatal);
        process::exit(1);
    }
}

/// Foreign abrupt-exit payloads are never classifiable; at this boundary
/// they are wrapped so the hook always sees a fault.
fn wrap_foreign(payload: Box<dyn Any + Send>) -> Fault {
    let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unhandled abrupt exit".to_string()
    };

    Fault::of::<StandardError>(message)
}

fn report_fatal(fault: &Fault) {
    #[cfg(feature = "tracing")]
    tracing::error!(%fault, "uncaught error, terminating");

    #[cfg(not(feature = "tracing"))]
    eprintln!("uncaught error: {fault}");
}
