//! Port for turning secrets into storable hashes and checking them later.
//!
//! Implementations must use a slow, adaptive-cost password hashing function
//! with a random salt embedded in the output, and must compare in constant
//! time. General-purpose digests (SHA-2 and friends) do not qualify.

use crate::domain::{PlaintextSecret, SecretHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by secret hashing adapters.
    pub enum SecretHashError {
        /// The hash could not be computed (bad parameters, RNG failure).
        Hashing { message: String } => "secret hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored secret hash is malformed: {message}",
    }
}

/// Hashing and verification contract for user secrets.
#[cfg_attr(test, mockall::automock)]
pub trait SecretHasher: Send + Sync {
    /// Produce a fresh salted hash. Two calls with the same secret must return
    /// different values that both verify.
    fn hash(&self, secret: &PlaintextSecret) -> Result<SecretHash, SecretHashError>;

    /// Re-derive the hash of `secret` using the parameters and salt embedded
    /// in `hash` and compare. A mismatch is `Ok(false)`, not an error.
    fn verify(&self, secret: &PlaintextSecret, hash: &SecretHash) -> Result<bool, SecretHashError>;
}
