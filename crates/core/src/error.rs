use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Client input rejected by an explicit boundary pre-check.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Static rule or registry metadata is unusable; validation could not run.
    #[error("Misconfigured: {0}")]
    Misconfigured(String),
}
