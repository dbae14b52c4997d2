//! Core types for peerchat
//!
//! This crate provides the data model shared by the API client, the
//! session/conversation state machine, and the terminal app.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A chat participant. The same wire shape serves as the signed-in
/// identity and as a peer in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// A single chat message as the server returns it. Ordering is the
/// server's; the client never reorders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender: String,
    pub content: String,
    /// Server-assigned ISO-8601 timestamp, kept verbatim.
    pub timestamp: String,
}

impl Message {
    /// Parse the server timestamp for display. Returns `None` when the
    /// string is not valid ISO-8601; callers fall back to the raw value.
    pub fn local_time(&self) -> Option<DateTime<Local>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Local))
    }
}

/// Bearer token together with the identity it belongs to.
///
/// A credential is only trusted while the remote service recognizes the
/// token; it is re-validated once per process start, never assumed valid
/// across restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub user: User,
}

/// Success body of the register and login endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
