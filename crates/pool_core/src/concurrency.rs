//! Named, time-boxed critical sections.
//!
//! Acquisition claims a key with a fresh token and an expiry; a held,
//! unexpired key fails fast with no retry and no queueing. Release clears
//! the key only while the stored token still matches, so a holder that
//! outlived its lease cannot clobber a successor's claim. The time-to-live
//! is the crash-safety net: an abandoned section self-expires and a later
//! acquisition proceeds even though release never ran.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use log::debug;
use uuid::Uuid;

use crate::error::PoolError;

/// Section key serializing all matching computations system-wide.
pub const MATCHING_SECTION: &str = "matching:global";

#[derive(Debug)]
struct Holder {
    token: Uuid,
    expires_at: Instant,
}

/// In-process lease registry for named critical sections.
#[derive(Debug, Default)]
pub struct SectionLock {
    sections: Mutex<HashMap<String, Holder>>,
}

impl SectionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` for at most `ttl`.
    ///
    /// Fails immediately with [`PoolError::SectionBusy`] while another
    /// unexpired holder exists.
    pub fn acquire(&self, key: &str, ttl: Duration) -> Result<SectionGuard<'_>, PoolError> {
        let mut sections = self
            .sections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();

        if let Some(holder) = sections.get(key) {
            if now < holder.expires_at {
                debug!("section `{key}` already held");
                return Err(PoolError::SectionBusy(key.to_string()));
            }
        }

        let token = Uuid::new_v4();
        sections.insert(
            key.to_string(),
            Holder {
                token,
                expires_at: now + ttl,
            },
        );
        Ok(SectionGuard {
            lock: self,
            key: key.to_string(),
            token,
        })
    }

    /// Run `action` while holding `key`. Release is attempted whether the
    /// action succeeds or fails.
    pub fn run_exclusive<T>(
        &self,
        key: &str,
        ttl: Duration,
        action: impl FnOnce() -> Result<T, PoolError>,
    ) -> Result<T, PoolError> {
        let _guard = self.acquire(key, ttl)?;
        action()
    }

    fn release(&self, key: &str, token: Uuid) {
        let mut sections = self
            .sections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(holder) = sections.get(key) {
            if holder.token == token {
                sections.remove(key);
            }
        }
    }
}

/// A live claim on a section. Dropping it releases the section if the token
/// still matches.
#[derive(Debug)]
pub struct SectionGuard<'a> {
    lock: &'a SectionLock,
    key: String,
    token: Uuid,
}

impl Drop for SectionGuard<'_> {
    fn drop(&mut self) {
        self.lock.release(&self.key, self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(5);

    #[test]
    fn second_acquire_fails_while_held() {
        let lock = SectionLock::new();
        let guard = lock.acquire("matching:test", TTL).expect("first claim");
        let err = lock.acquire("matching:test", TTL).unwrap_err();
        assert_eq!(err, PoolError::SectionBusy("matching:test".to_string()));
        drop(guard);
        assert!(lock.acquire("matching:test", TTL).is_ok());
    }

    #[test]
    fn different_keys_do_not_contend() {
        let lock = SectionLock::new();
        let _a = lock.acquire("a", TTL).expect("claim a");
        assert!(lock.acquire("b", TTL).is_ok());
    }

    #[test]
    fn action_error_still_releases() {
        let lock = SectionLock::new();
        let result: Result<(), PoolError> = lock.run_exclusive("matching:test", TTL, || {
            Err(PoolError::InvalidPassengerCount)
        });
        assert_eq!(result.unwrap_err(), PoolError::InvalidPassengerCount);
        assert!(lock.acquire("matching:test", TTL).is_ok());
    }

    #[test]
    fn abandoned_section_expires_after_ttl() {
        let lock = SectionLock::new();
        let guard = lock
            .acquire("matching:test", Duration::from_millis(30))
            .expect("claim");
        // Simulate a holder dying without releasing.
        std::mem::forget(guard);

        assert!(lock.acquire("matching:test", TTL).is_err());
        std::thread::sleep(Duration::from_millis(60));
        assert!(lock.acquire("matching:test", TTL).is_ok());
    }

    #[test]
    fn stale_release_does_not_clear_a_successor() {
        let lock = SectionLock::new();
        let stale = lock
            .acquire("matching:test", Duration::from_millis(30))
            .expect("first claim");
        std::thread::sleep(Duration::from_millis(60));

        // The lease expired, so a successor can claim the section.
        let successor = lock.acquire("matching:test", TTL).expect("successor claim");
        // The stale holder releasing now must not clear the successor.
        drop(stale);
        assert!(lock.acquire("matching:test", TTL).is_err());

        drop(successor);
        assert!(lock.acquire("matching:test", TTL).is_ok());
    }
}
