/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Raw request parameters: parameter name to untrimmed string value.
///
/// Both query strings and form bodies are collected into this shape by the
/// HTTP layer before reaching the validation engine or the normalizer.
pub type RawInput = std::collections::HashMap<String, String>;
