use validator::ValidationErrors;

/// Errors surfaced by the try-on client.
///
/// Every variant is terminal for the current job; none triggers an
/// automatic retry.
#[derive(Debug, thiserror::Error)]
pub enum TryOnError {
    /// The request was rejected before any network call was made.
    #[error("invalid try-on request: {0}")]
    Validation(#[from] ValidationErrors),

    /// The image service explicitly reported a failure.
    #[error("the image service reported an error: {0}")]
    Remote(String),

    /// A network call failed or a response could not be read.
    #[error("request to the image service failed: {0}")]
    Transport(String),

    /// The deadline elapsed before the job completed.
    #[error("the try-on job did not complete before the deadline")]
    Timeout,

    /// A newer submission displaced the session before it finished.
    #[error("the try-on session was canceled by a newer submission")]
    Canceled,
}
