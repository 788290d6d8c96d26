//! Route definitions for the mail-log console.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mail;
use crate::state::AppState;

/// Mail routes.
///
/// ```text
/// GET    /admin/api/mail/list        -> list        (lenient dates)
/// GET    /api/admin/mail/logs        -> search_logs (strict dates)
/// GET    /admin/api/mail/logs/{id}   -> get_log
/// POST   /admin/api/mail/send        -> send
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/api/mail/list", get(mail::list))
        .route("/api/admin/mail/logs", get(mail::search_logs))
        .route("/admin/api/mail/logs/{id}", get(mail::get_log))
        .route("/admin/api/mail/send", post(mail::send))
}
