use crate::error::Error;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use log::warn;
use ring::rand::{SecureRandom, SystemRandom};

const SALT_LEN: usize = 16;

lazy_static! {
    pub static ref RNG: SystemRandom = SystemRandom::new();
}

/// Generate a random 16-byte salt value.
fn random_salt(rng: &SystemRandom) -> Result<SaltString, Error> {
    let mut salt = [0; SALT_LEN];
    rng.fill(&mut salt).map_err(|_| Error::Rng)?;
    SaltString::encode_b64(&salt).map_err(|e| Error::Hash(e.to_string()))
}

/// Salt and hash the password with argon2id at the library's default cost.
///
/// The result is a PHC string, so the algorithm parameters are stored next to
/// the hash and older hashes keep verifying after the defaults change.
pub fn hash_password(rng: &SystemRandom, password: &str) -> Result<String, Error> {
    let salt = random_salt(rng)?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string. An unparsable hash never
/// verifies.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let parsed = match PasswordHash::new(encoded) {
        Ok(p) => p,
        Err(e) => {
            warn!("Stored password hash is unreadable: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
