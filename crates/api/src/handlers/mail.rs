//! Handlers for the mail-log list, detail and send-mail form.
//!
//! Search flow: raw query map -> normalize -> count -> assemble page.
//! Send flow: raw form map -> validate -> insert only when the report is empty.

use axum::extract::{Path, Query, State};
use axum::{Form, Json};
use chrono::Utc;
use mailadmin_core::error::CoreError;
use mailadmin_core::pagination::{self, PageEnvelope};
use mailadmin_core::search;
use mailadmin_core::types::{DbId, RawInput, Timestamp};
use mailadmin_core::validation::{self, mail_send::MailSendField, mail_send::MAIL_SEND_REGISTRY_ID};
use mailadmin_db::models::mail_log::{CreateMailLog, MailLog, MailLogSummary, STATUS_SUCCESS};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MailSendResponse};
use crate::state::AppState;

const SEND_ACCEPTED: &str = "Mail send request accepted.";
const SEND_REJECTED: &str = "The form contains errors.";

// ── Search ───────────────────────────────────────────────────────────

/// GET /admin/api/mail/list
///
/// Paged mail-log search. Malformed dates and integers are ignored.
pub async fn list(
    State(state): State<AppState>,
    Query(raw): Query<RawInput>,
) -> AppResult<Json<PageEnvelope<MailLogSummary>>> {
    run_search(&state, &raw).await.map(Json)
}

/// GET /api/admin/mail/logs
///
/// Same search as [`list`], but a malformed `sentAtFrom` / `sentAtTo`
/// is rejected with 400 before any filter is built.
pub async fn search_logs(
    State(state): State<AppState>,
    Query(raw): Query<RawInput>,
) -> AppResult<Json<PageEnvelope<MailLogSummary>>> {
    search::check_date_format(&raw)?;
    run_search(&state, &raw).await.map(Json)
}

async fn run_search(state: &AppState, raw: &RawInput) -> AppResult<PageEnvelope<MailLogSummary>> {
    let policy = &state.config.paging;
    let condition = search::normalize(raw, policy);

    let total = state.store.count_by_condition(&condition).await?;
    let page = pagination::assemble(total, &condition, policy, |offset, limit| {
        state.store.find_by_condition(&condition, offset, limit)
    })
    .await?;

    tracing::debug!(
        total,
        requested_page = condition.page,
        page = page.page,
        size = page.size,
        returned = page.items.len(),
        "Mail log search"
    );

    Ok(page)
}

// ── Detail ───────────────────────────────────────────────────────────

/// GET /admin/api/mail/logs/{id}
pub async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MailLog>>> {
    let log = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MailLog",
            id,
        }))?;
    Ok(Json(DataResponse { data: log }))
}

// ── Send ─────────────────────────────────────────────────────────────

/// POST /admin/api/mail/send
///
/// Validates the form against the `mail_send` registry. Field errors come
/// back as `success: false` with `fieldErrors`; only a clean form is
/// recorded. Sending itself is not performed, the request is logged with
/// status `SUCCESS`.
pub async fn send(
    State(state): State<AppState>,
    Form(raw): Form<RawInput>,
) -> AppResult<Json<MailSendResponse>> {
    let registry = validation::registry(MAIL_SEND_REGISTRY_ID)?;
    let report = validation::validate_registry(registry, &raw)?;

    if !report.is_empty() {
        tracing::info!(
            fields = ?report.keys().collect::<Vec<_>>(),
            "Mail send rejected by validation"
        );
        return Ok(Json(MailSendResponse::failure(SEND_REJECTED, report)));
    }

    let input = build_mail_log(&raw, Utc::now());
    let affected = state.store.insert(&input).await?;
    if affected != 1 {
        return Err(AppError::InternalError(format!(
            "mail log insert affected {affected} rows, expected 1"
        )));
    }

    tracing::info!(to = %input.to_address, "Mail send request accepted");
    Ok(Json(MailSendResponse::success(SEND_ACCEPTED)))
}

/// Map a validated form onto an insert DTO.
fn build_mail_log(raw: &RawInput, now: Timestamp) -> CreateMailLog {
    let text = |field: MailSendField| {
        raw.get(field.param_name())
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };
    let optional = |field: MailSendField| Some(text(field)).filter(|v| !v.is_empty());

    CreateMailLog {
        to_address: text(MailSendField::To),
        reply_to: optional(MailSendField::ReplyTo),
        cc_address: optional(MailSendField::Cc),
        bcc_address: optional(MailSendField::Bcc),
        subject: text(MailSendField::Subject),
        body: text(MailSendField::Body),
        is_html: text(MailSendField::IsHtml).eq_ignore_ascii_case("true"),
        status: STATUS_SUCCESS.to_string(),
        error_message: None,
        sent_at: now,
    }
}
