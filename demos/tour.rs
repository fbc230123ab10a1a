//! A tour of the crate: kind hierarchies, protected scopes and debug traces.
//!
//! Run with `cargo run --example tour`.

use error_kin::prelude::*;

family! {
    /// Anything wrong at the storage layer.
    pub StorageError;
    /// The database rejected or lost a query.
    pub DbError: StorageError;
    /// The connection dropped mid-flight.
    pub ConnError: DbError;
    /// Completely unrelated to storage.
    pub UiError;
}

fn flaky_query(attempt: u32) -> Outcome {
    if attempt < 2 {
        ConnError::make("connection reset by peer")
            .set_code(1042)
            .push_info(format!("attempt {attempt}"))
            .raise()
    }
    Ok(())
}

fn main() {
    silence_raised_panics();

    // Hierarchy answers "is-a" questions without dynamic type comparison.
    let conn = ConnError::make("probe");
    println!("lineage: {:?}", conn.lineage());
    println!(
        "ConnError is-a StorageError: {}",
        conn.derives_from::<StorageError>()
    );

    // Catch a whole family: the guard names the ancestor.
    for attempt in 0..3 {
        let result = protect(|| flaky_query(attempt))
            .guard::<StorageError>()
            .catch(|fault| {
                println!("caught: {fault}");
                None // recovered
            })
            .finally(|current| {
                println!("finally (attempt {attempt})");
                current
            })
            .run();
        println!("attempt {attempt}: {result:?}");
    }

    // A UiError would sail straight past that guard; a bare protect stops it.
    let result = protect(|| {
        let _ = protect(|| UiError::make("widget exploded").raise())
            .guard::<StorageError>()
            .run();
        Ok(())
    })
    .catch(|fault| {
        println!("outer scope caught the stranger: {}", fault.identity());
        None
    })
    .run();
    println!("outer: {result:?}");

    // Debug mode adds a stack trace to every new fault.
    set_debug(true);
    let traced = make_error!("with trace");
    println!("{} frames captured", traced.trace().len());
    set_debug(false);

    // Foreign errors join the hierarchy via decorate.
    let fault = decorate(std::io::Error::other("disk on fire"));
    print!("{fault}");
}
