use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use error_kin::{
    classify, family, protect, set_debug, silence_raised_panics, Caught, Kind, Protected,
};

family! {
    /// The guarded family in these tests.
    pub Base;
    /// Derived member of the guarded family.
    pub Derived: Base;
    /// A fault outside the guarded family.
    pub Stranger;
}

#[test]
fn normal_completion_skips_catch_and_runs_finally() {
    silence_raised_panics();
    let catch_ran = AtomicBool::new(false);
    let finally_ran = AtomicBool::new(false);

    let result = protect(|| Ok(()))
        .catch(|fault| {
            catch_ran.store(true, Ordering::SeqCst);
            Some(fault)
        })
        .finally(|current| {
            finally_ran.store(true, Ordering::SeqCst);
            current
        })
        .run();

    assert!(result.is_ok());
    assert!(!catch_ran.load(Ordering::SeqCst));
    assert!(finally_ran.load(Ordering::SeqCst));
}

#[test]
fn finally_override_replaces_the_result() {
    silence_raised_panics();

    let result = protect(|| Ok(()))
        .finally(|_| Some(Base::make("injected")))
        .run();
    assert_eq!(result.unwrap_err().message(), "injected");

    // ...and a None override clears a block's own error.
    let result = protect(|| Err(Base::make("from block")))
        .finally(|current| {
            assert_eq!(current.expect("block error flows in").message(), "from block");
            None
        })
        .run();
    assert!(result.is_ok());
}

#[test]
fn block_returned_error_bypasses_catch() {
    silence_raised_panics();
    let catch_ran = AtomicBool::new(false);

    let result = protect(|| Err(Derived::make("returned, not raised")))
        .guard::<Base>()
        .catch(|fault| {
            catch_ran.store(true, Ordering::SeqCst);
            Some(fault)
        })
        .run();

    assert_eq!(result.unwrap_err().message(), "returned, not raised");
    assert!(!catch_ran.load(Ordering::SeqCst));
}

#[test]
fn descendant_fault_matches_ancestor_guard() {
    silence_raised_panics();
    let caught = AtomicBool::new(false);

    let result = protect(|| Derived::make("dropped connection").raise())
        .guard::<Base>()
        .catch(|fault| {
            assert!(fault.derives_from::<Base>());
            assert_eq!(fault.identity(), Derived::qualified_name());
            caught.store(true, Ordering::SeqCst);
            None
        })
        .run();

    assert!(result.is_ok());
    assert!(caught.load(Ordering::SeqCst));
}

#[test]
fn matched_fault_without_catch_becomes_the_result() {
    silence_raised_panics();

    let result = protect(|| Derived::make("unhandled").raise())
        .guard::<Base>()
        .run();

    assert_eq!(result.unwrap_err().message(), "unhandled");
}

#[test]
fn bare_guard_catches_any_fault() {
    silence_raised_panics();

    let result = protect(|| Stranger::make("anything fault-shaped").raise())
        .catch(|_| None)
        .run();

    assert!(result.is_ok());
}

#[test]
fn unmatched_fault_keeps_propagating() {
    silence_raised_panics();
    let inner_catch_ran = AtomicBool::new(false);
    let inner_finally_ran = AtomicBool::new(false);

    let outer = protect(|| {
        let _ = protect(|| Stranger::make("not yours").raise())
            .guard::<Base>()
            .catch(|fault| {
                inner_catch_ran.store(true, Ordering::SeqCst);
                Some(fault)
            })
            .finally(|current| {
                inner_finally_ran.store(true, Ordering::SeqCst);
                current
            })
            .run();
        Ok(())
    })
    .catch(|fault| {
        assert_eq!(fault.identity(), Stranger::qualified_name());
        None
    })
    .run();

    assert!(outer.is_ok());
    assert!(!inner_catch_ran.load(Ordering::SeqCst));
    assert!(inner_finally_ran.load(Ordering::SeqCst));
}

#[test]
fn non_fault_panic_passes_through_untouched() {
    silence_raised_panics();
    let catch_ran = AtomicBool::new(false);
    let finally_ran = AtomicBool::new(false);

    let unwound = panic::catch_unwind(|| {
        let _ = protect(|| panic::panic_any("raw payload"))
            .catch(|fault| {
                catch_ran.store(true, Ordering::SeqCst);
                Some(fault)
            })
            .finally(|current| {
                finally_ran.store(true, Ordering::SeqCst);
                current
            })
            .run();
    });

    let payload = unwound.expect_err("panic must keep propagating");
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"raw payload"));
    assert!(!catch_ran.load(Ordering::SeqCst));
    assert!(finally_ran.load(Ordering::SeqCst));
}

#[test]
fn catch_replacement_propagates_as_result() {
    silence_raised_panics();

    let result = protect(|| Derived::make("original").raise())
        .guard::<Base>()
        .catch(|_| Some(Base::make("replacement")))
        .run();

    assert_eq!(result.unwrap_err().message(), "replacement");
}

#[test]
fn handler_abrupt_exit_supersedes_original() {
    silence_raised_panics();

    let unwound = panic::catch_unwind(|| {
        let _ = protect(|| Derived::make("original").raise())
            .guard::<Base>()
            .catch(|_| Stranger::make("from handler").raise())
            .run();
    });

    let payload = unwound.expect_err("handler raise must propagate");
    match classify(payload, None) {
        Caught::Matched(fault) => {
            assert_eq!(fault.identity(), Stranger::qualified_name());
            assert_eq!(fault.message(), "from handler");
        }
        Caught::Unmatched(_) => panic!("handler fault should classify as matched"),
    }
}

#[test]
fn classify_leaves_foreign_payloads_intact() {
    match classify(Box::new("zap"), None) {
        Caught::Matched(_) => panic!("a raw string is never fault-shaped"),
        Caught::Unmatched(payload) => {
            assert_eq!(payload.downcast_ref::<&str>(), Some(&"zap"));
        }
    }
}

#[test]
fn classify_applies_guard_to_raised_faults() {
    silence_raised_panics();

    let unwound = panic::catch_unwind(|| Derived::make("classified").raise());
    let payload = unwound.expect_err("raise unwinds");

    match classify(payload, Some(Base::shape())) {
        Caught::Matched(fault) => assert_eq!(fault.message(), "classified"),
        Caught::Unmatched(_) => panic!("descendant must match ancestor guard"),
    }
}

#[test]
fn traces_captured_under_protect_exclude_unwind_machinery() {
    silence_raised_panics();

    set_debug(true);
    let result = protect(|| Base::make("traced").raise()).run();
    set_debug(false);

    let fault = result.unwrap_err();
    assert!(!fault.trace().is_empty());
    for frame in fault.trace() {
        assert!(
            !frame.function.contains("panicking") && !frame.function.contains("catch_unwind"),
            "unwind machinery leaked into the trace: {frame}"
        );
    }
}

#[test]
fn builder_runs_nothing_until_run() {
    silence_raised_panics();
    let block_ran = AtomicBool::new(false);

    let scope = Protected::new(|| {
        block_ran.store(true, Ordering::SeqCst);
        Ok(())
    });
    assert!(!block_ran.load(Ordering::SeqCst));

    assert!(scope.run().is_ok());
    assert!(block_ran.load(Ordering::SeqCst));
}
