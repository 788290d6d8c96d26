//! Repository for the `mail_logs` table.

use mailadmin_core::search::SearchCondition;
use mailadmin_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::mail_log::{CreateMailLog, MailLog, MailLogSummary};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for full-row SELECT queries.
const COLUMNS: &str = "\
    id, to_address, reply_to, cc_address, bcc_address, subject, body, \
    is_html, status, error_message, sent_at, created_at, updated_at, version";

/// Column list for search result rows.
const SUMMARY_COLUMNS: &str = "\
    id, to_address, cc_address, bcc_address, subject, status, \
    is_html, error_message, sent_at, created_at";

/// Column list for INSERT (excludes auto-generated `id`).
const INSERT_COLUMNS: &str = "\
    to_address, reply_to, cc_address, bcc_address, subject, body, \
    is_html, status, error_message, sent_at, created_at, updated_at, version";

// ---------------------------------------------------------------------------
// MailLogRepo
// ---------------------------------------------------------------------------

/// Provides search and insert operations for mail logs.
pub struct MailLogRepo;

impl MailLogRepo {
    /// Count mail logs matching the condition's filters.
    pub async fn count_by_condition(
        pool: &PgPool,
        condition: &SearchCondition,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_mail_log_filter(condition);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM mail_logs {where_clause}");

        let q = bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Fetch one page of matching mail logs, newest first.
    ///
    /// Paging is taken from `offset`/`limit`, not from the condition, so the
    /// caller decides which page is actually served.
    pub async fn find_by_condition(
        pool: &PgPool,
        condition: &SearchCondition,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MailLogSummary>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_mail_log_filter(condition);

        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM mail_logs {where_clause} \
             ORDER BY sent_at DESC NULLS LAST, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_values_as(sqlx::query_as::<_, MailLogSummary>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Find a single mail log by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MailLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mail_logs WHERE id = $1");
        sqlx::query_as::<_, MailLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new mail log. Returns the number of rows affected.
    ///
    /// `created_at` and `updated_at` are set to `sent_at`; `version` starts at 0.
    pub async fn insert(pool: &PgPool, input: &CreateMailLog) -> Result<u64, sqlx::Error> {
        let query = format!(
            "INSERT INTO mail_logs ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10, $10, 0)"
        );
        let result = sqlx::query(&query)
            .bind(&input.to_address)
            .bind(&input.reply_to)
            .bind(&input.cc_address)
            .bind(&input.bcc_address)
            .bind(&input.subject)
            .bind(&input.body)
            .bind(input.is_html)
            .bind(&input.status)
            .bind(&input.error_message)
            .bind(input.sent_at)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built mail log queries.
#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from the condition's filters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_mail_log_filter(condition: &SearchCondition) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    let substring_filters = [
        ("to_address", &condition.to_address),
        ("cc_address", &condition.cc_address),
        ("bcc_address", &condition.bcc_address),
        ("subject", &condition.subject_keyword),
    ];
    for (column, value) in substring_filters {
        if let Some(value) = value {
            conditions.push(format!("{column} ILIKE ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Text(like_pattern(value)));
        }
    }

    if let Some(ref status) = condition.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    if let Some(from) = condition.sent_at_from {
        conditions.push(format!("sent_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = condition.sent_at_to {
        conditions.push(format!("sent_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Wrap a user value in `%...%`, escaping LIKE metacharacters.
fn like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_values_as<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
