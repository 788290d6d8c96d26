//! Domain logic for the mail-log admin console.
//!
//! Everything in this crate is pure: no database, no HTTP. The storage
//! collaborator lives in `mailadmin-db`, the HTTP boundary in
//! `mailadmin-api`.

pub mod error;
pub mod pagination;
pub mod search;
pub mod types;
pub mod validation;
