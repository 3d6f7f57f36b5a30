//! Argon2id implementation of the [`SecretHasher`] port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so the
//! cost parameters and the 16-byte random salt travel with every stored value.
//! Verification reads the parameters back from the stored hash, which lets the
//! configured cost change without invalidating existing accounts.

use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use crate::domain::ports::{SecretHashError, SecretHasher};
use crate::domain::{PlaintextSecret, SecretHash};

/// Argon2id cost parameters.
///
/// The default is the OWASP baseline: 19 MiB of memory, two passes, one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Cost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for Argon2Cost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id secret hasher.
///
/// # Examples
/// ```
/// use accounts::domain::PlaintextSecret;
/// use accounts::domain::ports::SecretHasher;
/// use accounts::outbound::hashing::{Argon2Cost, Argon2SecretHasher};
///
/// let cost = Argon2Cost { memory_kib: 8, iterations: 1, parallelism: 1 };
/// let hasher = Argon2SecretHasher::new(cost).expect("valid cost");
/// let secret = PlaintextSecret::new("pw123");
/// let hash = hasher.hash(&secret).expect("hash");
/// assert!(hasher.verify(&secret, &hash).expect("verify"));
/// ```
#[derive(Clone)]
pub struct Argon2SecretHasher {
    argon2: Argon2<'static>,
}

impl Argon2SecretHasher {
    /// Build a hasher with the given cost.
    ///
    /// # Errors
    ///
    /// Returns [`SecretHashError::Hashing`] when the parameters are outside
    /// the ranges Argon2 accepts (for example memory below 8 KiB per lane).
    pub fn new(cost: Argon2Cost) -> Result<Self, SecretHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|err| SecretHashError::hashing(format!("invalid argon2 cost: {err}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl SecretHasher for Argon2SecretHasher {
    fn hash(&self, secret: &PlaintextSecret) -> Result<SecretHash, SecretHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(secret.expose().as_bytes(), &salt)
            .map_err(|err| SecretHashError::hashing(err.to_string()))?
            .to_string();
        SecretHash::new(encoded).map_err(|err| SecretHashError::hashing(err.to_string()))
    }

    fn verify(&self, secret: &PlaintextSecret, hash: &SecretHash) -> Result<bool, SecretHashError> {
        let parsed = PasswordHash::new(hash.as_str())
            .map_err(|err| SecretHashError::malformed_hash(err.to_string()))?;
        match self
            .argon2
            .verify_password(secret.expose().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(SecretHashError::malformed_hash(err.to_string())),
        }
    }
}
