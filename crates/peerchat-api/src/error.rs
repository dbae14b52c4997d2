use thiserror::Error;

/// Failure taxonomy for remote calls.
///
/// `Auth` is recovered inline at the login/register form. `Unauthorized`
/// means a previously-valid token was rejected and forces a logout.
/// `Unreachable`, `Service`, and `Decode` are transient: the caller keeps
/// whatever state it already holds and retries manually if at all.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad credentials at login or register. Carries the service-provided
    /// message, or a generic fallback when the service gave none.
    #[error("{0}")]
    Auth(String),

    /// A token the service no longer recognizes (401/403 on an
    /// authenticated endpoint).
    #[error("session token was rejected by the server")]
    Unauthorized,

    /// Transport-level failure: the service never produced a response.
    #[error("service unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Non-2xx response outside the auth cases above.
    #[error("service error: {0}")]
    Service(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Extract the user-facing message from an error body. The service
    /// puts it in a JSON `error` field when it has one.
    pub(crate) fn message_from_body(body: &str, fallback: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| fallback.to_string())
    }
}
