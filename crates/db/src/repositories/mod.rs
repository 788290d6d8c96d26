//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod mail_log_repo;

pub use mail_log_repo::MailLogRepo;
