//! Process-wide debug switch gating stack-trace capture.
//!
//! The flag defaults to off so that production error construction never pays
//! for walking the call stack. Toggling it only affects faults constructed
//! afterwards; traces already captured are kept as-is.
//!
//! # Examples
//!
//! ```
//! error_kin::set_debug(true);
//! assert!(error_kin::debug_enabled());
//! error_kin::set_debug(false);
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

static DEBUG: AtomicBool = AtomicBool::new(false);

/// Enables or disables stack-trace capture for newly constructed faults.
///
/// The flag is read with relaxed ordering: it only gates a diagnostic
/// feature, so eventual consistency across threads is sufficient.
#[inline]
pub fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::Relaxed);
}

/// Returns whether stack-trace capture is currently enabled.
#[inline]
pub fn debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed)
}
