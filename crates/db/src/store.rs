//! The storage collaborator used by the search and send flows.
//!
//! Handlers depend on [`MailLogStore`] rather than on the pool directly so
//! the HTTP layer can be exercised without a database.

use async_trait::async_trait;
use mailadmin_core::search::SearchCondition;
use mailadmin_core::types::DbId;

use crate::models::mail_log::{CreateMailLog, MailLog, MailLogSummary};
use crate::repositories::MailLogRepo;
use crate::DbPool;

/// Count/find/insert access to mail logs.
///
/// Failures are returned as-is; implementations must not retry.
#[async_trait]
pub trait MailLogStore: Send + Sync {
    async fn count_by_condition(&self, condition: &SearchCondition) -> Result<i64, sqlx::Error>;

    /// Only meaningful after `count_by_condition` returned a positive total.
    async fn find_by_condition(
        &self,
        condition: &SearchCondition,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MailLogSummary>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<MailLog>, sqlx::Error>;

    /// Returns the number of rows affected.
    async fn insert(&self, input: &CreateMailLog) -> Result<u64, sqlx::Error>;

    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// [`MailLogStore`] backed by a Postgres pool.
#[derive(Clone)]
pub struct PgMailLogStore {
    pool: DbPool,
}

impl PgMailLogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MailLogStore for PgMailLogStore {
    async fn count_by_condition(&self, condition: &SearchCondition) -> Result<i64, sqlx::Error> {
        MailLogRepo::count_by_condition(&self.pool, condition).await
    }

    async fn find_by_condition(
        &self,
        condition: &SearchCondition,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MailLogSummary>, sqlx::Error> {
        MailLogRepo::find_by_condition(&self.pool, condition, offset, limit).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<MailLog>, sqlx::Error> {
        MailLogRepo::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, input: &CreateMailLog) -> Result<u64, sqlx::Error> {
        let affected = MailLogRepo::insert(&self.pool, input).await?;
        tracing::debug!(affected, to = %input.to_address, "Inserted mail log");
        Ok(affected)
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
