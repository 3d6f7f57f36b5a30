//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL `UserRepository` via Diesel.
//! - **memory**: volatile `UserRepository` for database-less runs and tests.
//! - **hashing**: Argon2id `SecretHasher`.
//!
//! Adapters translate between domain types and infrastructure types and hold
//! no business rules.

pub mod hashing;
pub mod memory;
pub mod persistence;
