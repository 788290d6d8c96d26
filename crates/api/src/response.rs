//! Shared response envelope types for API handlers.

use mailadmin_core::validation::ValidationReport;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Wraps any serializable payload in the project's standard response format.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Outcome of a send-mail form submission.
///
/// Field errors are ordinary data here: a rejected form is a successful
/// HTTP exchange with `success: false`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailSendResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "ValidationReport::is_empty")]
    pub field_errors: ValidationReport,
}

impl MailSendResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            field_errors: ValidationReport::new(),
        }
    }

    pub fn failure(message: impl Into<String>, field_errors: ValidationReport) -> Self {
        Self {
            success: false,
            message: message.into(),
            field_errors,
        }
    }
}
