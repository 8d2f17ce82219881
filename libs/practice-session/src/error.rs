use practice_common::types::Identifier;
use thiserror::Error;
use uuid::Uuid;

/// Failure talking to the judge service
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// The task running the call panicked or was cancelled
    #[error("backend call did not complete: {0}")]
    Interrupted(#[source] tokio::task::JoinError),
}

/// Session level failures
///
/// None of these reach the view; they are logged and, where the caller
/// awaits the underlying call, returned.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Catalog fetch or decode failed, the session stays `NotLoaded`
    #[error("catalog could not be loaded")]
    LoadFailure(#[source] BackendError),

    /// Selected id is absent from the loaded catalog
    #[error("practice {0} is not in the loaded catalog")]
    SelectionInconsistency(Identifier),

    /// Judge call failed or returned undecodable data
    #[error("submission {submission} for practice {practice} failed")]
    SubmissionFailure {
        submission: Uuid,
        practice: Identifier,
        #[source]
        source: BackendError,
    },
}
