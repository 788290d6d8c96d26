#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use mailadmin_api::config::ServerConfig;
use mailadmin_api::router::build_app_router;
use mailadmin_api::state::AppState;
use mailadmin_core::search::{PagingPolicy, SearchCondition};
use mailadmin_core::types::{DbId, Timestamp};
use mailadmin_db::models::mail_log::{CreateMailLog, MailLog, MailLogSummary};
use mailadmin_db::store::MailLogStore;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        paging: PagingPolicy::default(),
    }
}

/// Build the full application router on top of the given store.
pub fn build_test_app(store: Arc<InMemoryStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<InMemoryStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// `MailLogStore` over a `Vec`, with call counters and a failure switch.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Vec<MailLog>>,
    pub count_calls: AtomicUsize,
    pub find_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub last_find: Mutex<Option<(i64, i64)>>,
    pub fail: AtomicBool,
    /// Rows reported as affected by `insert`; `None` means 1.
    pub insert_affected: Mutex<Option<u64>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A store pre-filled with `n` logs, id 1 oldest.
    pub fn with_logs(n: i64) -> Arc<Self> {
        let store = Self::default();
        {
            let mut rows = store.rows.lock().unwrap();
            for id in 1..=n {
                rows.push(sample_log(id, &format!("user{id}@example.com"), "SUCCESS"));
            }
        }
        Arc::new(store)
    }

    pub fn push(&self, log: MailLog) {
        self.rows.lock().unwrap().push(log);
    }

    pub fn rows(&self) -> Vec<MailLog> {
        self.rows.lock().unwrap().clone()
    }

    fn check_fail(&self) -> Result<(), sqlx::Error> {
        if self.fail.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }

    fn matching(&self, c: &SearchCondition) -> Vec<MailLog> {
        let contains = |field: &Option<String>, needle: &Option<String>| match needle {
            None => true,
            Some(n) => field
                .as_deref()
                .is_some_and(|f| f.to_lowercase().contains(&n.to_lowercase())),
        };

        let mut rows: Vec<MailLog> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| contains(&Some(r.to_address.clone()), &c.to_address))
            .filter(|r| contains(&r.cc_address, &c.cc_address))
            .filter(|r| contains(&r.bcc_address, &c.bcc_address))
            .filter(|r| contains(&Some(r.subject.clone()), &c.subject_keyword))
            .filter(|r| c.status.as_ref().is_none_or(|s| &r.status == s))
            .filter(|r| c.sent_at_from.is_none_or(|from| r.sent_at.is_some_and(|t| t >= from)))
            .filter(|r| c.sent_at_to.is_none_or(|to| r.sent_at.is_some_and(|t| t <= to)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.sent_at.cmp(&a.sent_at).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl MailLogStore for InMemoryStore {
    async fn count_by_condition(&self, condition: &SearchCondition) -> Result<i64, sqlx::Error> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.matching(condition).len() as i64)
    }

    async fn find_by_condition(
        &self,
        condition: &SearchCondition,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MailLogSummary>, sqlx::Error> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_find.lock().unwrap() = Some((offset, limit));
        self.check_fail()?;
        Ok(self
            .matching(condition)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(summary)
            .collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<MailLog>, sqlx::Error> {
        self.check_fail()?;
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, input: &CreateMailLog) -> Result<u64, sqlx::Error> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(MailLog {
            id,
            to_address: input.to_address.clone(),
            reply_to: input.reply_to.clone(),
            cc_address: input.cc_address.clone(),
            bcc_address: input.bcc_address.clone(),
            subject: input.subject.clone(),
            body: input.body.clone(),
            is_html: input.is_html,
            status: input.status.clone(),
            error_message: input.error_message.clone(),
            sent_at: Some(input.sent_at),
            created_at: input.sent_at,
            updated_at: input.sent_at,
            version: 0,
        });
        Ok(self.insert_affected.lock().unwrap().unwrap_or(1))
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        self.check_fail()
    }
}

fn summary(log: MailLog) -> MailLogSummary {
    MailLogSummary {
        id: log.id,
        to_address: log.to_address,
        cc_address: log.cc_address,
        bcc_address: log.bcc_address,
        subject: log.subject,
        status: log.status,
        is_html: log.is_html,
        error_message: log.error_message,
        sent_at: log.sent_at,
        created_at: log.created_at,
    }
}

/// A log sent `id` hours after 2024-01-01 00:00 UTC.
pub fn sample_log(id: DbId, to: &str, status: &str) -> MailLog {
    let sent_at: Timestamp =
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::hours(id);
    MailLog {
        id,
        to_address: to.to_string(),
        reply_to: None,
        cc_address: None,
        bcc_address: None,
        subject: format!("Subject {id}"),
        body: format!("Body {id}"),
        is_html: false,
        status: status.to_string(),
        error_message: None,
        sent_at: Some(sent_at),
        created_at: sent_at,
        updated_at: sent_at,
        version: 0,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> Response<Body> {
    let body = serde_urlencoded::to_string(pairs).unwrap();
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
