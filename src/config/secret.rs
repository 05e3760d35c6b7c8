//! Secure credential handling using the secrecy crate
//!
//! Database connection strings embed passwords, so they are held in
//! `Secret` wrappers that zero their memory on drop and redact Debug output.
//!
//! # Example
//!
//! ```rust
//! use marketing_loader::config::{secret_string, SecretString};
//! use secrecy::ExposeSecret;
//!
//! let dsn: SecretString = secret_string("postgresql://root:pw@localhost/olist".to_string());
//! assert!(dsn.expose_secret().starts_with("postgresql://"));
//!
//! // Debug output is redacted
//! assert!(!format!("{dsn:?}").contains("pw"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the secret value starts with a prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Parse the secret value into another type
    pub fn parse<F: std::str::FromStr>(&self) -> Result<F, F::Err> {
        self.0.parse()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Redacts the credentials of a connection string for logging
///
/// ```rust
/// use marketing_loader::config::secret::redact_connection_string;
///
/// assert_eq!(
///     redact_connection_string("postgresql://root:pw@db:5432/olist"),
///     "postgresql://***@db:5432/olist"
/// );
/// ```
pub fn redact_connection_string(connection_string: &str) -> String {
    let scheme = connection_string
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .unwrap_or("postgresql");

    match connection_string.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => format!("{scheme}://***"),
    }
}
