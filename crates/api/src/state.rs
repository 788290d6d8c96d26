use std::sync::Arc;

use mailadmin_db::store::MailLogStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Mail log storage (Postgres in production, in-memory in tests).
    pub store: Arc<dyn MailLogStore>,
    /// Server configuration, including the paging policy.
    pub config: Arc<ServerConfig>,
}
