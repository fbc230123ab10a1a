//! Debug-gated stack capture.
//!
//! [`capture`] walks the active call stack and renders each frame as a
//! human-readable descriptor. The walk only happens when the global debug
//! flag is on; otherwise it returns an empty trace at negligible cost.
//!
//! Frame contents (paths, line numbers, symbol names) are inherently
//! environment-specific. Tests should only assert on presence, absence and
//! count, never on exact frame text.

use core::fmt;

use crate::debug::debug_enabled;

/// Hard cap on captured frames; deeper stacks are truncated, never an error.
pub const MAX_FRAMES: usize = 256;

/// One resolved stack frame: `function (file:line)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.function, self.file, self.line)
    }
}

/// Captures the current call stack, skipping `skip` user frames.
///
/// Returns an empty trace when the debug flag is off. Frames belonging to
/// the capture machinery itself (this module, the `backtrace` crate, the
/// panic runtime) are filtered out first, so the first reported frame is
/// attributable to user code, then `skip` additional frames are dropped.
///
/// # Examples
///
/// ```
/// error_kin::set_debug(false);
/// assert!(error_kin::trace::capture(0).is_empty());
/// ```
pub fn capture(skip: usize) -> Vec<Frame> {
    if !debug_enabled() {
        return Vec::new();
    }

    let backtrace = backtrace::Backtrace::new();
    let mut frames = Vec::new();

    'walk: for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            let function = match symbol.name() {
                Some(name) => strip_disambiguators(&name.to_string()),
                None => continue,
            };

            if is_internal(&function) {
                continue;
            }

            let file = symbol
                .filename()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            let line = symbol.lineno().unwrap_or(0);

            frames.push(Frame { function, file, line });

            if frames.len() >= MAX_FRAMES.saturating_add(skip) {
                break 'walk;
            }
        }
    }

    frames.into_iter().skip(skip).take(MAX_FRAMES).collect()
}

/// Symbols mangled under the v0 scheme carry `[hash]` crate disambiguators,
/// e.g. `std[e28293b1aa0f68bd]::panicking::try`. Prefix filtering and the
/// rendered frames want the plain path, so those segments are removed. Type
/// brackets in generic arguments, like `<[u8; 32] as ...>`, are kept: only a
/// bracketed run of at least eight hex digits counts as a disambiguator.
fn strip_disambiguators(symbol: &str) -> String {
    if !symbol.contains('[') {
        return symbol.to_string();
    }

    let mut out = String::with_capacity(symbol.len());
    let mut rest = symbol;
    while let Some(open) = rest.find('[') {
        let tail = &rest[open + 1..];
        match tail.find(']') {
            Some(len) if len >= 8 && tail[..len].bytes().all(|b| b.is_ascii_hexdigit()) => {
                out.push_str(&rest[..open]);
                rest = &tail[len + 1..];
            }
            _ => {
                out.push_str(&rest[..open + 1]);
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Frames from this crate's own construction/raise machinery and from the
/// runtime support code are never reported; the trace starts at user code.
fn is_internal(function: &str) -> bool {
    const INTERNAL_PREFIXES: &[&str] = &[
        "error_kin::",
        "backtrace::",
        "std::panicking",
        "std::panic",
        "std::rt::",
        "std::sys::",
        "core::ops::function",
        "rust_begin_unwind",
        "__rust_",
        "_start",
    ];

    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| function.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machinery_frames_are_filtered() {
        assert!(is_internal("error_kin::trace::capture"));
        assert!(is_internal("error_kin::types::fault::Fault::of"));
        assert!(is_internal("backtrace::backtrace::trace"));
        assert!(is_internal("std::panicking::try"));
        assert!(is_internal("core::ops::function::FnOnce::call_once"));
        assert!(!is_internal("my_app::load_config"));
        assert!(!is_internal("error_kin_tests::raises"));
    }

    #[test]
    fn disambiguated_machinery_frames_are_filtered() {
        assert_eq!(
            strip_disambiguators("std[e28293b1aa0f68bd]::panicking::try"),
            "std::panicking::try"
        );
        assert!(is_internal(&strip_disambiguators(
            "std[e28293b1aa0f68bd]::panicking::catch_unwind::do_call"
        )));
        assert!(is_internal(&strip_disambiguators(
            "core[53cdbb2fc4968dab]::ops::function::FnOnce::call_once"
        )));
    }

    #[test]
    fn stripping_keeps_type_brackets_and_plain_symbols() {
        assert_eq!(
            strip_disambiguators("<[u8; 32] as core::fmt::Debug>::fmt"),
            "<[u8; 32] as core::fmt::Debug>::fmt"
        );
        assert_eq!(
            strip_disambiguators("my_app::load_config"),
            "my_app::load_config"
        );
    }

    #[test]
    fn frame_renders_function_file_line() {
        let frame = Frame {
            function: "my_app::run".into(),
            file: "src/main.rs".into(),
            line: 42,
        };
        assert_eq!(frame.to_string(), "my_app::run (src/main.rs:42)");
    }
}
