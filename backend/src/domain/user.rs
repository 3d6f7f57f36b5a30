//! User record and its component types.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Validation errors returned by the user component constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The stored secret hash was empty.
    #[error("secret hash must not be empty")]
    EmptySecretHash,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its hyphenated string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

/// Unique login key for an account, typically an email address.
///
/// Stored exactly as supplied; lookups are byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactHandle(String);

impl ContactHandle {
    /// Wrap a contact handle.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }
}

impl AsRef<str> for ContactHandle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ContactHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Free-form name shown back to the user; not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Wrap a display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self(display_name.into())
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// One-way, salted transform of a user's secret in PHC string format.
///
/// ## Invariants
/// - Never empty.
/// - Never the plaintext; only [`crate::domain::ports::SecretHasher`]
///   implementations produce values for new accounts.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    /// Wrap an encoded hash, rejecting empty input.
    ///
    /// # Examples
    /// ```
    /// use accounts::domain::SecretHash;
    ///
    /// assert!(SecretHash::new("").is_err());
    /// assert!(SecretHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA").is_ok());
    /// ```
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.is_empty() {
            return Err(UserValidationError::EmptySecretHash);
        }
        Ok(Self(encoded))
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretHash(..)")
    }
}

/// Registered account.
///
/// ## Invariants
/// - `id` is assigned once at registration and never changes.
/// - `contact_handle` is unique across the store.
/// - `secret_hash` is non-empty and is never serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    contact_handle: ContactHandle,
    display_name: DisplayName,
    #[serde(skip)]
    secret_hash: SecretHash,
}

impl User {
    /// Assemble a user from validated components.
    pub fn new(
        id: UserId,
        contact_handle: ContactHandle,
        display_name: DisplayName,
        secret_hash: SecretHash,
    ) -> Self {
        Self {
            id,
            contact_handle,
            display_name,
            secret_hash,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login key.
    pub fn contact_handle(&self) -> &ContactHandle {
        &self.contact_handle
    }

    /// Name shown to the user.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Stored secret hash used for login verification.
    pub fn secret_hash(&self) -> &SecretHash {
        &self.secret_hash
    }
}
