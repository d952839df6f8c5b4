/// Outcome of one creation call. Exactly one variant is produced per
/// submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The service answered synchronously with a finished image.
    ImmediateImage(String),
    /// The job is queued; the url must be polled for the result.
    Pending(String),
    /// The service reported a failure. Polling must not start.
    RemoteError(String),
}
