//! Password hashing and verification.
//!
//! [`hash`] generates a random salt via [`OsRng`] and hashes the
//! plaintext with the default Argon2id parameters, returning a
//! PHC-format string (`$argon2id$v=19$...`) which is what the store
//! persists. [`verify`] parses a stored PHC string and checks a
//! candidate plaintext against it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("Invalid password hash: {0}")]
    Parse(argon2::password_hash::Error),
}

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Verify a password against a stored PHC-format hash. `Ok(false)`
/// means the password didn't match; `Err` means the stored hash is
/// malformed.
pub fn verify(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(PasswordError::Parse)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext() {
        let hashed = hash("pw").unwrap();
        assert_ne!(hashed, "pw");
        assert!(hashed.starts_with("$argon2"));
    }

    #[test]
    fn verify_round_trip() {
        let hashed = hash("correct horse").unwrap();
        assert!(verify("correct horse", &hashed).unwrap());
        assert!(!verify("wrong horse", &hashed).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify("pw", "not-a-phc-string").is_err());
    }
}
