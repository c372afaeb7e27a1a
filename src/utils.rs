pub mod error;

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;
/// bcrypt reads 72 bytes, the last of which is the password's NUL terminator.
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Fails with `BcryptError::Truncation` instead of hashing a password bcrypt
/// would cut short.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
  bcrypt::non_truncating_hash(password, cost)
}

/// Returns false for a mismatch, an over-long password and a malformed
/// stored hash alike.
pub fn verify_password(password: &str, hash: &str) -> bool {
  bcrypt::non_truncating_verify(password, hash).unwrap_or(false)
}
