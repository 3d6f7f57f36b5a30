//! HTTP inbound adapter exposing the account REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;
