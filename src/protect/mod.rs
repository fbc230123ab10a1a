//! Try/catch/finally emulation over the panic machinery.
//!
//! [`Fault::raise`] performs an abrupt exit by panicking with a [`Raised`]
//! payload; a [`Protected`] scope intercepts that exit, classifies it
//! against an optional guard kind, and dispatches handlers:
//!
//! - **Matched**: the fault's derivation chain contains the guard kind (or
//!   no guard was declared): the catch handler consumes the fault.
//! - **Unmatched**: an unrelated fault, or a stray panic payload that is
//!   not a fault at all: the finally handler still runs, then the original
//!   unwind resumes and keeps propagating.
//!
//! The finally handler runs on every path and its return value replaces the
//! final result.
//!
//! # Examples
//!
//! ```
//! use error_kin::{family, Fault, Protected};
//!
//! family! {
//!     /// Any I/O-layer failure.
//!     pub IoFault;
//!     /// Connection loss, a specific I/O failure.
//!     pub ConnLost: IoFault;
//! }
//!
//! error_kin::silence_raised_panics();
//!
//! let result = Protected::new(|| {
//!     Fault::of::<ConnLost>("peer went away").raise();
//! })
//! .guard::<IoFault>()
//! .catch(|fault| {
//!     assert!(fault.derives_from::<IoFault>());
//!     None // handled, suppress it
//! })
//! .run();
//!
//! assert!(result.is_ok());
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::hierarchy::{Kind, Shape};
use crate::types::{Fault, Outcome};

/// Panic payload used for every raised fault.
///
/// This is the one abrupt-exit vehicle of the crate: protected scopes only
/// ever convert `Raised` payloads back into faults; anything else keeps
/// unwinding untouched.
pub struct Raised(pub Fault);

/// Performs the abrupt exit for a fault. See [`Fault::raise`].
pub(crate) fn raise_fault(fault: Fault) -> ! {
    panic::panic_any(Raised(fault))
}

/// Classification of an intercepted abrupt-exit payload.
pub enum Caught {
    /// A fault whose chain satisfies the guard; ready for a catch handler.
    Matched(Fault),
    /// Anything else; must be re-raised via `resume_unwind`.
    Unmatched(Box<dyn Any + Send>),
}

/// Classifies a raw `catch_unwind` payload against an optional guard kind.
///
/// This is the standalone counterpart of [`Protected::run`]'s dispatch for
/// callers that manage their own `catch_unwind`: identical semantics,
/// different call shape. A payload that is not a [`Raised`] fault is
/// returned intact in [`Caught::Unmatched`].
pub fn classify(payload: Box<dyn Any + Send>, guard: Option<&'static Shape>) -> Caught {
    match payload.downcast::<Raised>() {
        Ok(raised) => {
            let fault = raised.0;
            let matched = match guard {
                None => true,
                Some(shape) => fault.lineage().iter().any(|name| *name == shape.name),
            };
            if matched {
                Caught::Matched(fault)
            } else {
                Caught::Unmatched(Box::new(Raised(fault)))
            }
        }
        Err(other) => Caught::Unmatched(other),
    }
}

/// A protected scope: a block plus optional guard, catch and finally
/// handlers, run with [`Protected::run`].
///
/// The catch handler receives the matched fault and returns `None` to
/// suppress it or `Some` replacement to propagate. The finally handler
/// receives the current error state and its return value becomes the final
/// result unconditionally. A panic inside either handler supersedes the
/// original error and propagates.
pub struct Protected<'a, B> {
    block: B,
    guard: Option<&'static Shape>,
    catch: Option<Box<dyn FnOnce(Fault) -> Option<Fault> + 'a>>,
    finally: Option<Box<dyn FnOnce(Option<Fault>) -> Option<Fault> + 'a>>,
}

impl<'a, B> Protected<'a, B>
where
    B: FnOnce() -> Outcome,
{
    /// Wraps a protected block. Nothing runs until [`run`](Protected::run).
    pub fn new(block: B) -> Self {
        Self {
            block,
            guard: None,
            catch: None,
            finally: None,
        }
    }

    /// Declares the error family this scope catches. Without a guard the
    /// scope catches every fault.
    #[must_use]
    pub fn guard<K: Kind>(mut self) -> Self {
        self.guard = Some(K::shape());
        self
    }

    /// Installs the catch handler, invoked only for matched faults.
    #[must_use]
    pub fn catch(mut self, handler: impl FnOnce(Fault) -> Option<Fault> + 'a) -> Self {
        self.catch = Some(Box::new(handler));
        self
    }

    /// Installs the finally handler, invoked on every path.
    #[must_use]
    pub fn finally(mut self, handler: impl FnOnce(Option<Fault>) -> Option<Fault> + 'a) -> Self {
        self.finally = Some(Box::new(handler));
        self
    }

    /// Runs the block, intercepting and classifying any abrupt exit.
    ///
    /// A block that completes normally (with `Ok` or `Err`) bypasses the
    /// catch handler; its own error state flows into finally. Unmatched
    /// faults and non-fault panics resume unwinding after finally has run.
    pub fn run(self) -> Outcome {
        let Self {
            block,
            guard,
            catch,
            finally,
        } = self;

        match panic::catch_unwind(AssertUnwindSafe(block)) {
            Ok(returned) => finish(returned.err(), finally),
            Err(payload) => match classify(payload, guard) {
                Caught::Matched(fault) => {
                    let current = match catch {
                        Some(handler) => handler(fault),
                        None => Some(fault),
                    };
                    finish(current, finally)
                }
                Caught::Unmatched(payload) => {
                    if let Some(handler) = finally {
                        let _ = handler(None);
                    }
                    panic::resume_unwind(payload)
                }
            },
        }
    }
}

type FinallyHandler<'a> = Box<dyn FnOnce(Option<Fault>) -> Option<Fault> + 'a>;

fn finish(current: Option<Fault>, finally: Option<FinallyHandler<'_>>) -> Outcome {
    let final_state = match finally {
        Some(handler) => handler(current),
        None => current,
    };
    match final_state {
        Some(fault) => Err(fault),
        None => Ok(()),
    }
}

/// Shorthand for [`Protected::new`].
pub fn protect<'a, B: FnOnce() -> Outcome>(block: B) -> Protected<'a, B> {
    Protected::new(block)
}

/// Suppresses the default panic report for [`Raised`] control-flow payloads.
///
/// Raised faults are expected to be intercepted; the default hook's stderr
/// report for them is noise. Every other panic is delegated to the
/// previously installed hook. Installs at most once per process.
pub fn silence_raised_panics() {
    static INSTALL: Once = Once::new();

    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if info.payload().downcast_ref::<Raised>().is_none() {
                previous(info);
            }
        }));
    });
}
