//! Credential hashing and verification.
//!
//! New credentials are stored as Argon2id PHC strings. Values that do not parse as a
//! PHC string are plaintext passwords left over from older documents; they are
//! compared in constant time and should be re-hashed by the caller.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Outcome of checking a candidate password against a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Valid,
    /// Matched a plaintext credential; it needs re-hashing.
    LegacyMatch,
    Invalid,
}

impl Verification {
    pub fn is_match(&self) -> bool {
        !matches!(self, Verification::Invalid)
    }
}

/// Hash a password into a PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check `candidate` against a stored credential.
pub fn verify_password(candidate: &str, stored: &str) -> Verification {
    match PasswordHash::new(stored) {
        Ok(parsed) => {
            if Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
            {
                Verification::Valid
            } else {
                Verification::Invalid
            }
        }
        Err(_) => {
            if constant_time_compare(candidate, stored) {
                Verification::LegacyMatch
            } else {
                Verification::Invalid
            }
        }
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
