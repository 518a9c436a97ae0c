//! Sign-in: challenge nonces, signed messages and verification.
//!
//! A client asks for a nonce, embeds it in a message, signs the message
//! and sends both back. [`SignInFlow::verify`] checks the signature first
//! and only then burns the nonce, so a forged request cannot use up a
//! legitimate challenge.

mod challenge;
mod message;
mod nonce;
mod verifier;

pub use challenge::ChallengeManager;
pub use message::SignInMessage;
pub use nonce::{generate_nonce, MIN_NONCE_LENGTH};
pub use verifier::{HmacSignInVerifier, SignInVerifier};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::storage::NonceStore;

pub struct SignInFlow<S, V> {
    challenges: ChallengeManager<S>,
    verifier: V,
}

impl<S: NonceStore, V: SignInVerifier> SignInFlow<S, V> {
    pub fn new(challenges: ChallengeManager<S>, verifier: V) -> Self {
        Self {
            challenges,
            verifier,
        }
    }

    pub fn challenges(&self) -> &ChallengeManager<S> {
        &self.challenges
    }

    pub fn issue_nonce(&self) -> Result<String> {
        self.challenges.issue()
    }

    /// Verify a signed message and return the signer's fid.
    pub fn verify(&self, message: &str, signature: &str) -> Result<u64> {
        self.verify_at(message, signature, Utc::now())
    }

    pub fn verify_at(&self, message: &str, signature: &str, now: DateTime<Utc>) -> Result<u64> {
        let signed = self.verifier.verify(message, signature).map_err(|e| {
            tracing::warn!(error = %e, "sign-in rejected");
            e
        })?;

        if let Err(e) = self.challenges.consume_at(&signed.nonce, now) {
            tracing::warn!(fid = signed.fid, error = %e, "sign-in challenge rejected");
            return Err(e);
        }

        tracing::info!(fid = signed.fid, "sign-in verified");
        Ok(signed.fid)
    }
}
