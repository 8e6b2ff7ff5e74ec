use thiserror::Error;

/// Failures reported by the user directory collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Directory backend error: {0}")]
    Backend(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors surfaced by the list and edit flows. All of these recover at the
/// UI boundary as transient messages; none is fatal and none is retried
/// automatically.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FlowError {
    /// Detected locally, before any directory call is made.
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Failed to load data: {0}")]
    Retrieval(DirectoryError),
    #[error("Failed to save changes: {0}")]
    Mutation(DirectoryError),
}
