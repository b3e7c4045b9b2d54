//! Mutual-exclusion behavior under concurrent matching attempts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pool_core::concurrency::{SectionLock, MATCHING_SECTION};
use pool_core::error::PoolError;

#[test]
fn at_most_one_holder_at_any_instant() {
    const ATTEMPTS: usize = 8;

    let lock = Arc::new(SectionLock::new());
    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let successes = Arc::new(AtomicUsize::new(0));
    let contended = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..ATTEMPTS)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let inside = Arc::clone(&inside);
            let peak = Arc::clone(&peak);
            let successes = Arc::clone(&successes);
            let contended = Arc::clone(&contended);
            std::thread::spawn(move || {
                let outcome =
                    lock.run_exclusive(MATCHING_SECTION, Duration::from_secs(5), || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_millis(20));
                        inside.fetch_sub(1, Ordering::SeqCst);
                        Ok(())
                    });
                match outcome {
                    Ok(()) => {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(PoolError::SectionBusy(key)) => {
                        assert_eq!(key, MATCHING_SECTION);
                        contended.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(other) => panic!("unexpected error: {other}"),
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread");
    }

    assert_eq!(peak.load(Ordering::SeqCst), 1, "two attempts ran at once");
    assert!(successes.load(Ordering::SeqCst) >= 1);
    assert_eq!(
        successes.load(Ordering::SeqCst) + contended.load(Ordering::SeqCst),
        ATTEMPTS
    );
}

#[test]
fn contention_is_surfaced_not_retried() {
    let lock = Arc::new(SectionLock::new());
    let guard = lock
        .acquire(MATCHING_SECTION, Duration::from_secs(5))
        .expect("claim");

    let attempt = {
        let lock = Arc::clone(&lock);
        std::thread::spawn(move || {
            lock.run_exclusive(MATCHING_SECTION, Duration::from_secs(5), || Ok(42))
        })
    };

    // The concurrent attempt fails immediately while the section is held.
    let outcome = attempt.join().expect("thread");
    assert_eq!(
        outcome.unwrap_err(),
        PoolError::SectionBusy(MATCHING_SECTION.to_string())
    );

    drop(guard);
    let retried = lock.run_exclusive(MATCHING_SECTION, Duration::from_secs(5), || Ok(42));
    assert_eq!(retried.unwrap(), 42);
}
