//! Secret generation.
//!
//! # Usage
//!
//! ```bash
//! sm-cli secret generate            # 48 characters
//! sm-cli secret generate --length 64
//! ```
//!
//! Output is suitable for `ADMIN_SECRET_KEY` and `SITE_SESSION_SECRET`.

use rand::Rng;
use rand::distr::Alphanumeric;
use thiserror::Error;

/// Shortest secret accepted for `SITE_SESSION_SECRET`.
pub const MIN_LENGTH: usize = 32;

/// Errors from secret generation.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret length must be at least {MIN_LENGTH} (got {0})")]
    TooShort(usize),
}

/// Random alphanumeric string of `length` characters.
///
/// # Errors
///
/// Returns `SecretError::TooShort` below [`MIN_LENGTH`].
pub fn generate(length: usize) -> Result<String, SecretError> {
    if length < MIN_LENGTH {
        return Err(SecretError::TooShort(length));
    }

    Ok(rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect())
}

/// Print a new secret to stdout.
///
/// # Errors
///
/// See [`generate`].
#[allow(clippy::print_stdout)]
pub fn print(length: usize) -> Result<(), SecretError> {
    println!("{}", generate(length)?);
    Ok(())
}
