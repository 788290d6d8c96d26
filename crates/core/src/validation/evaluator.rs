//! Rule evaluator. Pure logic, no database access.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::{FieldDefinition, FieldRegistry, Rule, ValidationReport};
use crate::error::CoreError;
use crate::types::RawInput;

/// Pattern every token of an email list must match.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Evaluate every field against the raw input.
///
/// Fields are visited in declaration order; within a field the first failing
/// rule is recorded and the remaining rules for that field are skipped.
/// Absent parameters are treated as empty values.
pub fn validate(fields: &[FieldDefinition], input: &RawInput) -> ValidationReport {
    let mut report = ValidationReport::new();

    for field in fields {
        let value = normalize(input.get(field.param_name).map(String::as_str));

        if let Some(rule) = field.rules.iter().find(|rule| !passes(rule, value)) {
            report.insert(field.key.to_string(), rule.message().to_string());
        }
    }

    report
}

/// Check the registry metadata, then evaluate it against the raw input.
///
/// `Err` means validation could not run at all; `Ok` with an empty report
/// means every field passed.
pub fn validate_registry(
    registry: &FieldRegistry,
    input: &RawInput,
) -> Result<ValidationReport, CoreError> {
    registry.check()?;
    Ok(validate(registry.fields, input))
}

/// Missing values become empty strings; present values are trimmed.
fn normalize(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or("")
}

fn passes(rule: &Rule, value: &str) -> bool {
    match rule {
        Rule::Required { .. } => !value.is_empty(),
        Rule::MaxLength { limit, .. } => value.is_empty() || value.chars().count() <= *limit,
        Rule::EmailList { .. } => value.is_empty() || is_email_list(value),
    }
}

/// Every comma-separated token must be a well-formed address.
///
/// Empty tokens fail, so a trailing comma (`"a@b.com,"`) is rejected, unlike
/// splitters that discard trailing empty tokens.
fn is_email_list(value: &str) -> bool {
    value
        .split(',')
        .map(str::trim)
        .all(|token| !token.is_empty() && EMAIL_RE.is_match(token))
}
