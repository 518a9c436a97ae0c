//! Signature verification for sign-in messages.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::message::SignInMessage;
use crate::error::AuthError;
use crate::storage::Config;

type HmacSha256 = Hmac<Sha256>;

/// Checks a signed sign-in message and returns its parsed contents.
///
/// Implementations must reject before parsing is trusted: a message whose
/// signature does not verify is never returned.
pub trait SignInVerifier {
    fn verify(&self, message: &str, signature: &str) -> Result<SignInMessage, AuthError>;
}

impl<V: SignInVerifier + ?Sized> SignInVerifier for &V {
    fn verify(&self, message: &str, signature: &str) -> Result<SignInMessage, AuthError> {
        (**self).verify(message, signature)
    }
}

/// HMAC-SHA256 verifier with a shared secret. Signatures are lowercase hex.
#[derive(Clone)]
pub struct HmacSignInVerifier {
    key: Vec<u8>,
}

impl std::fmt::Debug for HmacSignInVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSignInVerifier").finish_non_exhaustive()
    }
}

impl HmacSignInVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let key = secret.as_ref().to_vec();
        if key.is_empty() {
            return Err(AuthError::VerifierNotConfigured);
        }
        Ok(Self { key })
    }

    /// Uses `auth.signing_secret`.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        match config.auth.signing_secret.as_deref() {
            Some(secret) => Self::new(secret),
            None => Err(AuthError::VerifierNotConfigured),
        }
    }

    pub fn sign(&self, message: &str) -> Result<String, AuthError> {
        let mut mac = self.mac()?;
        mac.update(message.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| AuthError::VerifierNotConfigured)
    }
}

impl SignInVerifier for HmacSignInVerifier {
    fn verify(&self, message: &str, signature: &str) -> Result<SignInMessage, AuthError> {
        let expected = hex::decode(signature.trim()).map_err(|_| AuthError::InvalidSignature)?;
        let mut mac = self.mac()?;
        mac.update(message.as_bytes());
        // Constant-time comparison.
        mac.verify_slice(&expected)
            .map_err(|_| AuthError::InvalidSignature)?;
        SignInMessage::parse(message)
    }
}
