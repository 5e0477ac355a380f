use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use crate::config::Argon2Config;

/// Argon2id password hasher
///
/// Hashes are stored in PHC string format, e.g.
/// `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`, so the salt and cost
/// parameters travel with each stored password. Both operations are CPU
/// bound; call them from `web::block` inside request handlers.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &Argon2Config) -> Result<Self, argon2::password_hash::Error> {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(config.hash_length as usize),
        )?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes `password` with a freshly generated salt.
    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }

    /// `Ok(false)` on mismatch, `Err` only when `hash` is not a valid PHC string.
    #[tracing::instrument(skip(self, password, hash))]
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed = PasswordHash::new(hash)?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
