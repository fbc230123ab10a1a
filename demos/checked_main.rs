//! The outermost protected boundary: `run_main` plus the uncaught-error hook.
//!
//! Run with `cargo run --example checked_main`.

use error_kin::prelude::*;

family! {
    /// Fatal startup problems.
    pub BootError;
}

fn boot() -> Outcome {
    // Anything raised below propagates to the run_main boundary.
    BootError::make("listen address already in use")
        .set_code(98)
        .raise()
}

fn main() {
    silence_raised_panics();

    // Downgrade uncaught errors to a log line instead of terminating.
    // Returning Some(fault) here would exit the process with status 1.
    set_uncaught_hook(|fault| {
        eprintln!("uncaught ({}): {}", fault.code().unwrap_or(0), fault.message());
        None
    });

    run_main(boot);
    println!("still alive: the hook swallowed the boot failure");
}
