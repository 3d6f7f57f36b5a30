//! Inbound credential payloads: registration and login requests.
//!
//! Plaintext secrets only ever live inside [`PlaintextSecret`], which wipes
//! its buffer on drop and never prints its contents.

use std::fmt;

use zeroize::Zeroizing;

use super::{ContactHandle, DisplayName};

/// A secret exactly as the caller supplied it.
///
/// Whitespace is preserved so the verified value is the one the user typed.
///
/// # Examples
/// ```
/// use accounts::domain::PlaintextSecret;
///
/// let secret = PlaintextSecret::new("pw123");
/// assert_eq!(secret.expose(), "pw123");
/// assert_eq!(format!("{secret:?}"), "PlaintextSecret(..)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextSecret(Zeroizing<String>);

impl PlaintextSecret {
    /// Wrap a plaintext secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Borrow the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlaintextSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlaintextSecret(..)")
    }
}

/// Everything needed to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    contact_handle: ContactHandle,
    display_name: DisplayName,
    secret: PlaintextSecret,
}

impl Registration {
    /// Build a registration request from raw inputs.
    pub fn new(
        contact_handle: impl Into<String>,
        display_name: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            contact_handle: ContactHandle::new(contact_handle),
            display_name: DisplayName::new(display_name),
            secret: PlaintextSecret::new(secret),
        }
    }

    /// Requested login key.
    pub fn contact_handle(&self) -> &ContactHandle {
        &self.contact_handle
    }

    /// Requested display name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Chosen secret.
    pub fn secret(&self) -> &PlaintextSecret {
        &self.secret
    }
}

/// Login attempt credentials.
///
/// # Examples
/// ```
/// use accounts::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("a@x.com", "pw123");
/// assert_eq!(creds.contact_handle().as_ref(), "a@x.com");
/// assert_eq!(creds.secret().expose(), "pw123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    contact_handle: ContactHandle,
    secret: PlaintextSecret,
}

impl LoginCredentials {
    /// Build login credentials from raw inputs.
    pub fn new(contact_handle: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            contact_handle: ContactHandle::new(contact_handle),
            secret: PlaintextSecret::new(secret),
        }
    }

    /// Login key to look up.
    pub fn contact_handle(&self) -> &ContactHandle {
        &self.contact_handle
    }

    /// Secret to verify.
    pub fn secret(&self) -> &PlaintextSecret {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  padded  ")]
    #[case("correct horse battery staple")]
    fn secrets_keep_caller_whitespace(#[case] raw: &str) {
        let creds = LoginCredentials::new("a@x.com", raw);
        assert_eq!(creds.secret().expose(), raw);
    }

    #[rstest]
    fn registration_debug_never_prints_the_secret() {
        let registration = Registration::new("a@x.com", "Ada", "pw123");
        let rendered = format!("{registration:?}");
        assert!(!rendered.contains("pw123"));
        assert!(rendered.contains("a@x.com"));
    }
}
