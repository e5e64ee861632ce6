use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a `NodeService` round trip, split by origin: the request never
/// completed, or the server answered with a non-2xx status. The controller
/// treats both the same way; the split exists so reporters can log the
/// status/body pair when one is available.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("code {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

impl ServiceError {
    /// HTTP status of a server-side rejection, if there is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ControllerError {
    /// A previous submission has not finished; the call was rejected before
    /// touching the network.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("create node failed: {0}")]
    Create(#[source] ServiceError),
    #[error("node list refresh failed: {0}")]
    Refresh(#[source] ServiceError),
}
