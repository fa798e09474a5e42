use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use password_hash::SaltString;
use rand_core::OsRng;

use super::Password;

/// A well formed hash using the default Argon2 parameters whose digest is not
/// derived from any password.
const UNMATCHABLE: &str =
    "$argon2id$v=19$m=4096,t=3,p=1$Y0ea1poJCyWCd+yPum+ZQQ$kVwPYOgIVfZFWlIdTT3556X5x4RSM1s96zMtv/I5tZQ";

/// The Argon2 hash of a user's password, stored in PHC string format.
#[derive(Clone, Debug)]
pub struct Hash(String);

impl Hash {
    /// Hash a password with a freshly generated salt.
    ///
    /// # Returns
    ///
    /// An [`Err`] only if the salt could not be generated or the hashing
    /// library failed internally.
    pub fn new(password: &Password) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), salt.as_ref())?
            .to_string();

        Ok(Self(password_hash))
    }

    /// Load a hash that was previously persisted.
    ///
    /// Fails if the stored value is not a valid PHC string.
    pub fn from_hash_str(hash: &str) -> Result<Self> {
        Ok(Self(PasswordHash::new(hash)?.to_string()))
    }

    /// Check a candidate password against the hash.
    ///
    /// A mismatch is reported as `Ok(false)`. The comparison itself is
    /// performed in constant time by [`argon2`].
    pub fn matches_raw_password(&self, candidate: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(&self.0)?;

        match Argon2::default().verify_password(candidate.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }

    /// A hash to verify against when there is no stored hash, so that a
    /// failed lookup costs as much as a failed comparison.
    pub fn unmatchable() -> Self {
        Self(UNMATCHABLE.to_owned())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
