//! Mail log entity models and DTOs.

use mailadmin_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A full row from the `mail_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailLog {
    pub id: DbId,
    pub to_address: String,
    pub reply_to: Option<String>,
    pub cc_address: Option<String>,
    pub bcc_address: Option<String>,
    pub subject: String,
    pub body: String,
    pub is_html: bool,
    pub status: String,
    pub error_message: Option<String>,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: i32,
}

/// One row of the search result list (no body).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailLogSummary {
    pub id: DbId,
    pub to_address: String,
    pub cc_address: Option<String>,
    pub bcc_address: Option<String>,
    pub subject: String,
    pub status: String,
    pub is_html: bool,
    pub error_message: Option<String>,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new mail log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMailLog {
    pub to_address: String,
    pub reply_to: Option<String>,
    pub cc_address: Option<String>,
    pub bcc_address: Option<String>,
    pub subject: String,
    pub body: String,
    pub is_html: bool,
    pub status: String,
    pub error_message: Option<String>,
    pub sent_at: Timestamp,
}

/// Status recorded for a send request that was accepted.
pub const STATUS_SUCCESS: &str = "SUCCESS";
