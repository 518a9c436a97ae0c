//! Challenge nonce generation from the OS random source.

use crate::error::AuthError;

/// Shortest nonce ever handed out.
pub const MIN_NONCE_LENGTH: usize = 8;

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest multiple of 62 that fits in a byte. Bytes at or above it are
/// rejected so every character is equally likely.
const ACCEPT_BELOW: u8 = 248;

/// Generate an alphanumeric nonce of `len` characters (at least
/// [`MIN_NONCE_LENGTH`]).
///
/// # Errors
/// Returns [`AuthError::RandomUnavailable`] if the OS random source fails.
pub fn generate_nonce(len: usize) -> Result<String, AuthError> {
    let len = len.max(MIN_NONCE_LENGTH);
    let mut nonce = String::with_capacity(len);
    let mut bytes = [0u8; 64];

    while nonce.len() < len {
        getrandom::getrandom(&mut bytes).map_err(|e| AuthError::RandomUnavailable(e.to_string()))?;
        for b in bytes.iter().copied().filter(|b| *b < ACCEPT_BELOW) {
            nonce.push(char::from(ALPHABET[usize::from(b % 62)]));
            if nonce.len() == len {
                break;
            }
        }
    }

    Ok(nonce)
}
