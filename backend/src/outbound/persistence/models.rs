//! Internal Diesel row structs.
//!
//! These never leave the persistence adapter; the repository converts them to
//! and from domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::users;

/// Row read back from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub contact_handle: String,
    pub display_name: String,
    pub secret_hash: String,
    #[expect(dead_code, reason = "selected for parity with the table; not surfaced in the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new accounts. `created_at` is filled by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub contact_handle: &'a str,
    pub display_name: &'a str,
    pub secret_hash: &'a str,
}
