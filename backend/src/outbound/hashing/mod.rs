//! Secret hashing adapters.

mod argon2_secret_hasher;

pub use argon2_secret_hasher::{Argon2Cost, Argon2SecretHasher};
