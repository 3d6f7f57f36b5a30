//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 assigned at registration.
        id -> Uuid,
        /// Login key; unique via `users_contact_handle_key`.
        contact_handle -> Varchar,
        /// Name shown back to the user.
        display_name -> Varchar,
        /// PHC-encoded secret hash, never empty.
        secret_hash -> Varchar,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}
