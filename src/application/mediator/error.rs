//! Error types for request dispatch and handler registration.

use thiserror::Error;

use crate::application::repos::RepoError;

/// Error returned by a handler, or by the mediator when no handler exists.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this request type.
    #[error("no handler registered for request `{request}`")]
    Unregistered { request: &'static str },
    /// The addressed row does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    /// The request contradicts the stored state.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for HandlerError {
    fn from(err: RepoError) -> Self {
        HandlerError::Repo(err)
    }
}

/// Startup wiring problems detected by [`super::MediatorBuilder::build`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no handler registered for required request `{request}`")]
    MissingHandler { request: &'static str },
    #[error("request `{request}` was registered more than once")]
    DuplicateHandler { request: &'static str },
}
