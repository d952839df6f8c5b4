/// Result of a single poll against the fetch handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Success(String),
    StillPending,
    TransportError(String),
}
