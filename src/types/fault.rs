//! The [`Fault`] error value.
//!
//! A `Fault` carries the identity of its concrete kind, a message, an
//! optional opaque payload, an optional shared cause and a stack trace
//! captured at construction when debug mode is on. Identity is fixed at
//! construction and never changes for the lifetime of the value.
//!
//! # Examples
//!
//! ```
//! use error_kin::{family, Fault};
//!
//! family! {
//!     /// Configuration could not be loaded.
//!     pub ConfigError;
//! }
//!
//! error_kin::set_debug(false);
//! let fault = Fault::of::<ConfigError>("missing key").set_code(404);
//! assert!(fault.identity().ends_with("ConfigError"));
//! assert_eq!(fault.code(), Some(404));
//! assert!(fault.trace().is_empty());
//! ```

use core::any::Any;
use core::fmt;
use std::error::Error;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::debug::debug_enabled;
use crate::hierarchy::{self, Kind, Shape};
use crate::trace::{self, Frame};

/// Separator printed after a non-empty trace block.
const TRACE_SEPARATOR: &str =
    "------------------------------------------------------------------------------";

/// Opaque payload attached to a fault by its creator.
///
/// The core never interprets payloads; it only renders them through
/// `Display` and hands them back for caller-side downcasting via
/// [`as_any`](Payload::as_any). Blanket-implemented for every
/// `Display + Send + Sync + 'static` type.
pub trait Payload: fmt::Display + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: fmt::Display + Send + Sync + 'static> Payload for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A structured, hierarchical error value.
///
/// Construct with [`Fault::of`] naming a kind declared via
/// [`family!`](crate::family), then chain builder methods for the optional
/// parts. `Fault` implements `std::error::Error`; the cause is exposed
/// through `source()`.
pub struct Fault {
    shape: &'static Shape,
    message: String,
    code: Option<i64>,
    infos: SmallVec<[String; 2]>,
    payload: Option<Box<dyn Payload>>,
    cause: Option<Arc<dyn Error + Send + Sync>>,
    trace: Vec<Frame>,
}

static FAULT_SHAPE: Shape = Shape {
    name: "error_kin::Fault",
    embeds: &[],
};

/// `Fault` is the root of every kind hierarchy, the terminal entry of every
/// derivation chain.
impl Kind for Fault {
    #[inline]
    fn shape() -> &'static Shape {
        &FAULT_SHAPE
    }
}

impl Fault {
    /// Constructs a fault of kind `K` with the given message.
    ///
    /// The stack trace is captured here, once, iff the global debug flag is
    /// on. The kind identity is resolved from `K` at this point and is
    /// immutable afterwards.
    pub fn of<K: Kind>(message: impl Into<String>) -> Self {
        Self {
            shape: K::shape(),
            message: message.into(),
            code: None,
            infos: SmallVec::new(),
            payload: None,
            cause: None,
            trace: trace::capture(0),
        }
    }

    /// Attaches an opaque payload. Rendered after the message, otherwise
    /// uninterpreted.
    #[inline]
    pub fn with_payload(mut self, payload: impl Payload) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    /// Attaches a cause (the wrapped original error), taking sole ownership.
    #[inline]
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Attaches an already-shared cause. The fault never mutates it.
    #[inline]
    pub fn with_cause_arc(mut self, cause: Arc<dyn Error + Send + Sync>) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Sets a numeric error code.
    #[inline]
    pub fn set_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Appends one line of additional information, rendered after the
    /// message in insertion order.
    #[inline]
    pub fn push_info(mut self, info: impl Into<String>) -> Self {
        self.infos.push(info.into());
        self
    }

    /// The qualified name of this fault's concrete kind.
    #[inline]
    pub fn identity(&self) -> &'static str {
        self.shape.name
    }

    /// The error message; may be empty.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The numeric error code, if one was set.
    #[inline]
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    /// Additional information lines, in insertion order.
    #[inline]
    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    /// The attached payload, if any.
    #[inline]
    pub fn payload(&self) -> Option<&dyn Payload> {
        self.payload.as_deref()
    }

    /// The wrapped cause, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }

    /// The stack trace captured at construction; empty unless debug mode was
    /// on at that time.
    #[inline]
    pub fn trace(&self) -> &[Frame] {
        &self.trace
    }

    /// This fault's resolved derivation chain, most-derived kind first,
    /// root last.
    #[inline]
    pub fn lineage(&self) -> Arc<[&'static str]> {
        hierarchy::resolve(self.shape, Fault::shape())
    }

    /// Whether this fault's kind derives from `K` (or is `K` itself).
    #[inline]
    pub fn derives_from<K: Kind>(&self) -> bool {
        hierarchy::is_ancestor(K::qualified_name(), self.shape)
    }

    /// Tests whether this fault's kind is an ancestor of (or equal to)
    /// `other`'s concrete kind.
    ///
    /// Values that are not `Fault`s are never matched: the answer for a
    /// foreign error is always `false`.
    pub fn is_parent_of(&self, other: &(dyn Error + 'static)) -> bool {
        match other.downcast_ref::<Fault>() {
            Some(fault) => fault.lineage().iter().any(|name| *name == self.identity()),
            None => false,
        }
    }

    /// Raises this fault as an abrupt exit, to be intercepted by a
    /// [`Protected`](crate::protect::Protected) scope or the
    /// [`run_main`](crate::hook::run_main) boundary.
    ///
    /// Re-captures the stack trace first (debug mode only) so the trace
    /// reflects the raise site rather than the construction site.
    pub fn raise(self) -> ! {
        self.raise_pruned(0)
    }

    /// Like [`raise`](Fault::raise), pruning `prune` leading frames from the
    /// re-captured trace to hide raising helpers.
    pub fn raise_pruned(mut self, prune: usize) -> ! {
        if debug_enabled() {
            self.trace = trace::capture(prune);
        }
        crate::protect::raise_fault(self)
    }

    /// Renders the cause with its trailing newlines stripped; the caller
    /// adds exactly one.
    fn cause_text(cause: &(dyn Error + 'static)) -> String {
        let mut text = cause.to_string();
        while text.ends_with('\n') {
            text.pop();
        }
        text
    }
}

impl fmt::Display for Fault {
    /// Renders `<identity>: <message>` followed by info lines, payload and a
    /// `Source:` block for the cause; with an empty message the cause comes
    /// first, then the payload. A non-empty trace is appended, one frame per
    /// line with a three-space indent, closed by a separator line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.identity())?;

        if !self.message.is_empty() {
            writeln!(f, "{}", self.message)?;

            for info in &self.infos {
                writeln!(f, "{info}")?;
            }

            if let Some(payload) = &self.payload {
                writeln!(f, "{payload}")?;
            }

            if let Some(cause) = self.cause() {
                writeln!(f)?;
                writeln!(f, "Source: {}", Self::cause_text(cause))?;
            }
        } else {
            if let Some(cause) = self.cause() {
                writeln!(f, "{}", Self::cause_text(cause))?;
            }

            if let Some(payload) = &self.payload {
                writeln!(f, "{payload}")?;
            }
        }

        if !self.trace.is_empty() {
            for frame in &self.trace {
                writeln!(f, "   {frame}")?;
            }
            writeln!(f, "{TRACE_SEPARATOR}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("identity", &self.identity())
            .field("message", &self.message)
            .field("code", &self.code)
            .field("infos", &self.infos)
            .field("payload", &self.payload.as_ref().map(|p| p.to_string()))
            .field("cause", &self.cause.as_ref().map(|c| c.to_string()))
            .field("trace_len", &self.trace.len())
            .finish()
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fault {
    /// Serializes a summary view: identity, message, code, lineage, the
    /// cause's rendition and the captured frames. The payload is opaque and
    /// deliberately omitted.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Fault", 6)?;
        state.serialize_field("identity", self.identity())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("lineage", &*self.lineage())?;
        state.serialize_field("cause", &self.cause.as_ref().map(|c| c.to_string()))?;
        state.serialize_field("trace", &self.trace)?;
        state.end()
    }
}
