//! Error-kind hierarchy resolution.
//!
//! Every error kind declares the kinds it derives from as a static [`Shape`]
//! table (built by the [`family!`](crate::family) macro). [`resolve`] walks
//! that table depth-first and produces the kind's *derivation chain*: the
//! ordered list of qualified names from the most-derived kind down to the
//! root. Chains are memoized process-wide since shapes are `'static` and
//! never change after program start.
//!
//! # Examples
//!
//! ```
//! use error_kin::{family, Fault};
//! use error_kin::hierarchy::{resolve, Kind};
//!
//! family! {
//!     /// Any storage-layer failure.
//!     pub StorageError;
//!     /// A failed database call.
//!     pub DbError: StorageError;
//! }
//!
//! let chain = resolve(DbError::shape(), Fault::shape());
//! assert_eq!(&chain[..2], &[DbError::qualified_name(), StorageError::qualified_name()]);
//! assert_eq!(chain.last(), Some(&Fault::qualified_name()));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use smallvec::SmallVec;

/// Inline-capacity vector for derivation chains; most hierarchies are short.
pub(crate) type NameChain = SmallVec<[&'static str; 8]>;

/// Static description of one error kind: its qualified name and the shapes
/// it directly derives from, in declaration order.
///
/// Shapes live in `static` storage, one per kind, and form an immutable
/// acyclic graph. Parents are stored as `fn() -> &'static Shape` thunks so a
/// shape table can be initialized in a `static` without calling into other
/// statics.
#[derive(Debug)]
pub struct Shape {
    pub name: &'static str,
    pub embeds: &'static [fn() -> &'static Shape],
}

/// An error kind: a marker type carrying its [`Shape`].
///
/// Implemented by the [`family!`](crate::family) macro; the root impl lives
/// on [`Fault`](crate::Fault) itself.
pub trait Kind: 'static {
    /// The kind's static shape entry.
    fn shape() -> &'static Shape;

    /// The kind's qualified name, e.g. `my_app::errors::DbError`.
    #[inline]
    fn qualified_name() -> &'static str {
        Self::shape().name
    }

    /// The kind's resolved derivation chain, most-derived first.
    #[inline]
    fn lineage() -> Arc<[&'static str]> {
        resolve(Self::shape(), crate::Fault::shape())
    }
}

/// Process-wide memo of resolved chains, keyed by qualified kind name.
///
/// Concurrent resolvers may race on the same key; both compute the identical
/// chain (resolution is pure) so the lost update is harmless.
static HIERARCHIES: Lazy<RwLock<HashMap<&'static str, Arc<[&'static str]>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Resolves the derivation chain of `shape`, terminated by `root`.
///
/// Pre-order walk: the shape's own name comes first; unless the shape *is*
/// the root, each directly embedded shape's sub-walk follows, in declaration
/// order. A shape that declares no parents and is not the root degrades to a
/// single-element chain rather than an error; parent tests against such a
/// kind simply answer `false`.
pub fn resolve(shape: &'static Shape, root: &'static Shape) -> Arc<[&'static str]> {
    if let Ok(cache) = HIERARCHIES.read() {
        if let Some(chain) = cache.get(shape.name) {
            return Arc::clone(chain);
        }
    }

    let mut names = NameChain::new();
    walk(shape, root, &mut names);
    let chain: Arc<[&'static str]> = Arc::from(names.as_slice());

    if let Ok(mut cache) = HIERARCHIES.write() {
        cache.insert(shape.name, Arc::clone(&chain));
    }

    chain
}

fn walk(shape: &'static Shape, root: &'static Shape, out: &mut NameChain) {
    out.push(shape.name);

    if shape.name == root.name {
        return;
    }

    for embed in shape.embeds {
        walk(embed(), root, out);
    }
}

/// Tests whether `ancestor` appears in `shape`'s resolved chain.
///
/// True for `shape` itself: every kind is its own ancestor, matching the
/// "instance of or derived from" contract.
pub fn is_ancestor(ancestor: &'static str, shape: &'static Shape) -> bool {
    resolve(shape, crate::Fault::shape())
        .iter()
        .any(|name| *name == ancestor)
}
