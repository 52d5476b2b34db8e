//! Argon2id implementation of the `PasswordHasher` port.

use argon2::{Algorithm, Argon2, Params, Version};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Plain text behind [`Argon2PasswordHasher::dummy_hash`]; never a real password.
const DUMMY_PASSWORD: &str = "blog-backend-dummy-password";

/// Argon2id hasher with the crate's default parameters.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    dummy: PasswordHash,
}

impl Argon2PasswordHasher {
    /// Build the hasher and precompute the dummy hash.
    ///
    /// # Errors
    /// Returns [`PasswordHasherError::Hash`] if hashing the dummy fails.
    pub fn new() -> Result<Self, PasswordHasherError> {
        Self::with_params(Params::default())
    }

    /// Build an Argon2id hasher with explicit cost parameters.
    ///
    /// Hashes made with other parameters still verify: the PHC string carries
    /// its own cost settings.
    ///
    /// # Errors
    /// Returns [`PasswordHasherError::Hash`] if hashing the dummy fails.
    pub fn with_params(params: Params) -> Result<Self, PasswordHasherError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy = hash_with(&argon2, DUMMY_PASSWORD)?;
        Ok(Self { argon2, dummy })
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<PasswordHash, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|err| PasswordHasherError::hash(err.to_string()))
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        hash_with(&self.argon2, password)
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::hash(err.to_string())),
        }
    }

    fn dummy_hash(&self) -> &PasswordHash {
        &self.dummy
    }
}
