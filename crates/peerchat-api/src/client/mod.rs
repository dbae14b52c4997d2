use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiError;
use peerchat_types::{AuthResponse, Message, User};

pub mod rest;

/// Request body for the register and login endpoints.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Request body for POST /chat/send_message/.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub receiver_id: i64,
    pub content: &'a str,
}

/// Remote chat service operations - a unified interface so the
/// controller can run against a test double as well as the live service.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Create an account and sign in as it in one step.
    async fn register(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// Exchange credentials for a bearer token and the owning identity.
    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// Resolve a bearer token to the identity it belongs to.
    async fn current_user(&self, token: &str) -> Result<User, ApiError>;

    /// Fetch the full peer list, in the service's order.
    async fn users(&self, token: &str) -> Result<Vec<User>, ApiError>;

    /// Fetch the full message history with one peer, in the service's order.
    async fn messages(&self, token: &str, peer_id: i64) -> Result<Vec<Message>, ApiError>;

    /// Send one message. The returned `Message` carries the
    /// server-assigned id and timestamp.
    async fn send_message(&self, token: &str, receiver_id: i64, content: &str)
        -> Result<Message, ApiError>;
}
