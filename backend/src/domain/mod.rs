//! Domain primitives, ports and the account service.
//!
//! Purpose: define strongly typed account entities and the use-cases that
//! operate on them. Adapters in `inbound` and `outbound` depend on this module;
//! it depends on neither.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - User and its components: the registered account record.
//! - Registration / LoginCredentials: inbound use-case payloads.
//! - AccountServiceImpl: registration and login over the driven ports.

pub mod account_service;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountServiceImpl;
pub use self::credentials::{LoginCredentials, PlaintextSecret, Registration};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    ContactHandle, DisplayName, SecretHash, User, UserId, UserValidationError,
};

