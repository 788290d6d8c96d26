//! Validation rule, field and report types.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::CoreError;

/// Field key to the message of the first rule that failed for that field.
///
/// Iteration order follows field declaration order. An empty report means
/// every field passed.
pub type ValidationReport = IndexMap<String, String>;

/// A single validation predicate with its failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Fails when the normalized value is empty.
    Required { message: &'static str },
    /// Fails when a non-empty value is longer than `limit` characters.
    MaxLength { limit: usize, message: &'static str },
    /// Fails when a non-empty value is not a comma-separated list of
    /// well-formed email addresses.
    EmailList { message: &'static str },
}

impl Rule {
    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required { message }
            | Rule::MaxLength { message, .. }
            | Rule::EmailList { message } => message,
        }
    }
}

/// One input slot of a form and its ordered rules.
///
/// Rules are evaluated in slice order and the first failure wins, so the
/// order decides which message the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub key: &'static str,
    pub param_name: &'static str,
    pub rules: &'static [Rule],
}

/// A named, ordered set of field definitions for one form.
#[derive(Debug, Clone, Copy)]
pub struct FieldRegistry {
    pub id: &'static str,
    pub fields: &'static [FieldDefinition],
}

impl FieldRegistry {
    /// Verify the registry metadata is usable.
    ///
    /// Rejects blank keys or parameter names, duplicate keys, and
    /// `MaxLength` rules with a zero limit.
    pub fn check(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();

        for field in self.fields {
            if field.key.trim().is_empty() || field.param_name.trim().is_empty() {
                return Err(CoreError::Misconfigured(format!(
                    "registry '{}' has a field with a blank key or parameter name",
                    self.id
                )));
            }
            if !seen.insert(field.key) {
                return Err(CoreError::Misconfigured(format!(
                    "registry '{}' declares field '{}' more than once",
                    self.id, field.key
                )));
            }
            for rule in field.rules {
                if let Rule::MaxLength { limit: 0, .. } = rule {
                    return Err(CoreError::Misconfigured(format!(
                        "field '{}' in registry '{}' has a zero max_length",
                        field.key, self.id
                    )));
                }
            }
        }

        Ok(())
    }
}
