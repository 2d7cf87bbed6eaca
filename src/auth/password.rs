use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{rngs::OsRng, RngCore};
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
#[error("argon2: {0}")]
pub struct HashError(pub(crate) String);

/// One-way password hashing with embedded salt and parameters.
pub trait PasswordHasher: Send + Sync {
    /// Hash `plain` with a fresh random salt into a PHC string.
    fn hash(&self, plain: &str) -> Result<String, HashError>;

    /// Check `plain` against a stored PHC string. Malformed hashes never match.
    fn verify(&self, plain: &str, hash: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String, HashError> {
        let salt = generate_salt(&mut OsRng)?;
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                HashError(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "argon2 parse hash error");
                return false;
            }
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }
}

fn generate_salt(rng: &mut impl RngCore) -> Result<SaltString, HashError> {
    let mut bytes = [0u8; argon2::password_hash::Salt::RECOMMENDED_LENGTH];
    rng.try_fill_bytes(&mut bytes).map_err(|e| {
        error!(error = %e, "os rng failure");
        HashError(e.to_string())
    })?;
    SaltString::encode_b64(&bytes).map_err(|e| HashError(e.to_string()))
}
