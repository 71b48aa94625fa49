//! Password hashing, session tokens and registration field checks
//!
//! Pure functions only; persistence lives in `db::users` and the HTTP
//! middleware lives in the server crate.
//!
//! # Password storage
//!
//! - Passwords are hashed with bcrypt at cost [`PASSWORD_HASH_COST`]
//! - The stored string is the full bcrypt hash (`$2b$10$...`), salt included
//! - Session tokens are random v4 UUIDs

use uuid::Uuid;

use crate::{Error, Result};

/// bcrypt work factor
pub const PASSWORD_HASH_COST: u32 = 10;

/// Hash a password with a fresh random salt
///
/// CPU-bound; async callers should run it on a blocking thread.
///
/// # Examples
///
/// ```
/// use closet_common::api::auth::{hash_password, verify_password};
///
/// let hash = hash_password("hunter2").unwrap();
/// assert!(hash.starts_with("$2b$10$"));
/// assert!(verify_password("hunter2", &hash));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, PASSWORD_HASH_COST)
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
}

/// Check a password against a stored bcrypt hash
///
/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}

/// Generate an opaque bearer token
pub fn generate_session_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Validate registration fields
///
/// Username and password must be non-blank and the email must look like
/// an address.
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::Validation("Username is required".to_string()));
    }
    validate_email(email)?;
    if password.is_empty() {
        return Err(Error::Validation("Password is required".to_string()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(Error::Validation(format!("Invalid email address: {}", email))),
    }
}
