//! Table specifications
//!
//! A [`TableSpec`] names one table to copy and derives the source and
//! destination relation names from it. Names are validated on construction
//! so they can be interpolated into SQL safely.

use super::errors::LoaderError;
use super::result::Result;
use serde::{Serialize, Serializer};
use std::fmt;

/// One configured table to copy from the source schema to the warehouse
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableSpec {
    name: String,
    source_schema: String,
    target_schema: String,
}

impl TableSpec {
    /// Creates a new table spec
    ///
    /// # Errors
    ///
    /// Returns a validation error if the table or either schema name is not a
    /// plain lowercase SQL identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use marketing_loader::domain::TableSpec;
    ///
    /// let spec = TableSpec::new("closed_deal", "marketing", "m_data").unwrap();
    /// assert_eq!(spec.source_relation(), "marketing.closed_deals");
    /// assert_eq!(spec.destination_relation(), "m_data.closed_deal");
    /// ```
    pub fn new(
        name: impl Into<String>,
        source_schema: impl Into<String>,
        target_schema: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let source_schema = source_schema.into();
        let target_schema = target_schema.into();

        validate_identifier("table name", &name)?;
        validate_identifier("source schema", &source_schema)?;
        validate_identifier("target schema", &target_schema)?;

        Ok(Self {
            name,
            source_schema,
            target_schema,
        })
    }

    /// Table identifier as configured
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema holding the destination relation
    pub fn target_schema(&self) -> &str {
        &self.target_schema
    }

    /// Source relation, pluralised: `<schema>.<name>s`
    pub fn source_relation(&self) -> String {
        format!("{}.{}s", self.source_schema, self.name)
    }

    /// Destination relation: `<dest_schema>.<name>`
    pub fn destination_relation(&self) -> String {
        format!("{}.{}", self.target_schema, self.name)
    }
}

impl fmt::Display for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// Summaries and events carry the bare table name.
impl Serialize for TableSpec {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

/// Checks that `value` is a lowercase SQL identifier (`[a-z_][a-z0-9_]*`)
pub fn validate_identifier(kind: &str, value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first == '_' || first.is_ascii_lowercase() => {
            chars.all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        _ => false,
    };

    if !valid || value.len() > 63 {
        return Err(LoaderError::Validation(format!(
            "Invalid {kind} '{value}': must match [a-z_][a-z0-9_]* and be at most 63 characters"
        )));
    }

    Ok(())
}
