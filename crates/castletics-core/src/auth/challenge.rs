//! Issued sign-in challenges.

use chrono::{DateTime, Duration, Utc};

use super::nonce::generate_nonce;
use crate::error::{AuthError, Result};
use crate::storage::{Config, NonceStore};

/// Hands out nonces and accepts each one back exactly once within its
/// lifetime.
pub struct ChallengeManager<S> {
    store: S,
    nonce_length: usize,
    ttl: Duration,
}

impl<S: NonceStore> ChallengeManager<S> {
    pub fn new(store: S, nonce_length: usize, ttl_secs: i64) -> Self {
        Self {
            store,
            nonce_length,
            ttl: Duration::seconds(ttl_secs.clamp(1, i64::from(u32::MAX))),
        }
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(store, config.nonce_length(), config.auth.nonce_ttl_secs)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn issue(&self) -> Result<String> {
        self.issue_at(Utc::now())
    }

    pub fn issue_at(&self, now: DateTime<Utc>) -> Result<String> {
        let nonce = generate_nonce(self.nonce_length)?;
        self.store.insert_nonce(&nonce, now)?;
        tracing::debug!(len = nonce.len(), "issued sign-in challenge");
        Ok(nonce)
    }

    pub fn consume(&self, nonce: &str) -> Result<()> {
        self.consume_at(nonce, Utc::now())
    }

    /// Accept `nonce` once. Unknown, already-used and expired nonces are
    /// all rejected; the caller has to ask for a new challenge.
    pub fn consume_at(&self, nonce: &str, now: DateTime<Utc>) -> Result<()> {
        let record = self
            .store
            .load_nonce(nonce)?
            .ok_or(AuthError::UnknownNonce)?;

        if record.consumed_at.is_some() {
            return Err(AuthError::NonceReused.into());
        }
        if now - record.issued_at > self.ttl {
            return Err(AuthError::NonceExpired {
                ttl_secs: self.ttl.num_seconds(),
            }
            .into());
        }
        // Lost a race with another consumer.
        if !self.store.mark_nonce_consumed(nonce, now)? {
            return Err(AuthError::NonceReused.into());
        }
        Ok(())
    }

    /// Drop challenges that can no longer be consumed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let purged = self.store.purge_nonces_before(now - self.ttl)?;
        if purged > 0 {
            tracing::debug!(purged, "purged expired challenges");
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::Database;
    use chrono::TimeZone;

    fn manager(db: &Database) -> ChallengeManager<&Database> {
        ChallengeManager::new(db, 16, 600)
    }

    fn auth_err(result: Result<()>) -> AuthError {
        match result {
            Err(CoreError::Auth(e)) => e,
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn nonce_is_accepted_once() {
        let db = Database::open_memory().unwrap();
        let m = manager(&db);
        let nonce = m.issue().unwrap();
        assert_eq!(nonce.len(), 16);
        m.consume(&nonce).unwrap();
        assert!(matches!(auth_err(m.consume(&nonce)), AuthError::NonceReused));
    }

    #[test]
    fn unknown_nonce_is_rejected() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(auth_err(manager(&db).consume("neverissued")), AuthError::UnknownNonce));
    }

    #[test]
    fn expired_nonce_is_rejected() {
        let db = Database::open_memory().unwrap();
        let m = manager(&db);
        let issued = Utc::now();
        let nonce = m.issue_at(issued).unwrap();
        let err = auth_err(m.consume_at(&nonce, issued + Duration::seconds(601)));
        assert!(matches!(err, AuthError::NonceExpired { ttl_secs: 600 }));
    }

    #[test]
    fn nonce_at_exact_ttl_is_accepted() {
        let db = Database::open_memory().unwrap();
        let m = manager(&db);
        // Sub-microsecond part must survive storage.
        let issued = Utc.timestamp_opt(1_700_000_000, 999_999_999).unwrap();
        let nonce = m.issue_at(issued).unwrap();
        m.consume_at(&nonce, issued + Duration::seconds(600)).unwrap();
    }

    #[test]
    fn issued_nonces_are_distinct() {
        let db = Database::open_memory().unwrap();
        let m = manager(&db);
        let a = m.issue().unwrap();
        let b = m.issue().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn purge_keeps_live_challenges() {
        let db = Database::open_memory().unwrap();
        let m = manager(&db);
        let now = Utc::now();
        let old = m.issue_at(now - Duration::hours(1)).unwrap();
        let fresh = m.issue_at(now).unwrap();
        assert_eq!(m.purge_expired(now).unwrap(), 1);
        assert!(matches!(auth_err(m.consume_at(&old, now)), AuthError::UnknownNonce));
        m.consume_at(&fresh, now).unwrap();
    }
}
