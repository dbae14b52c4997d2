use peerchat_api::ApiError;
use thiserror::Error;

/// Errors surfaced by the controller.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The persisted token slot could not be written.
    #[error("token storage: {0}")]
    Storage(#[source] std::io::Error),

    /// An operation that needs an active session was invoked without one.
    #[error("not signed in")]
    NotSignedIn,
}

impl ClientError {
    /// True for failures the caller should treat as transient: prior
    /// state is retained and nothing was forcibly cleared.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Api(ApiError::Unreachable(_))
                | ClientError::Api(ApiError::Service(_))
                | ClientError::Api(ApiError::Decode(_))
        )
    }
}
