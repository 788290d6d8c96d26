//! Declarative form validation.
//!
//! Provides rule and field-definition types, the static form registries,
//! and a pure-logic evaluator that turns raw request input into a
//! field-keyed error report.

pub mod evaluator;
pub mod mail_send;
pub mod rules;

pub use evaluator::{validate, validate_registry};
pub use rules::{FieldDefinition, FieldRegistry, Rule, ValidationReport};

/// All form registries known to the application, looked up by id.
pub static REGISTRIES: &[&FieldRegistry] = &[&mail_send::MAIL_SEND];

/// Resolve a registry by its id.
///
/// An unknown id is a wiring mistake on the server side, so it surfaces as
/// [`CoreError::Misconfigured`](crate::error::CoreError::Misconfigured)
/// rather than as a field error.
pub fn registry(id: &str) -> Result<&'static FieldRegistry, crate::error::CoreError> {
    REGISTRIES
        .iter()
        .copied()
        .find(|r| r.id == id)
        .ok_or_else(|| {
            crate::error::CoreError::Misconfigured(format!("unknown field registry '{id}'"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use assert_matches::assert_matches;

    #[test]
    fn resolves_mail_send_registry() {
        let reg = registry("mail_send").unwrap();
        assert_eq!(reg.fields.len(), 7);
    }

    #[test]
    fn unknown_registry_is_misconfiguration() {
        assert_matches!(registry("nope"), Err(CoreError::Misconfigured(_)));
    }

    #[test]
    fn every_static_registry_passes_its_own_check() {
        for reg in REGISTRIES {
            reg.check().unwrap();
        }
    }
}
