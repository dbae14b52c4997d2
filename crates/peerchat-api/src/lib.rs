//! REST client for the peerchat messaging service
//!
//! This crate provides the `ChatApi` trait consumed by the session and
//! conversation state machine, the reqwest-backed `RestClient`
//! implementation, and the error taxonomy shared by both.

pub mod client;
pub mod error;
pub mod request_logger;

pub use client::rest::RestClient;
pub use client::{ChatApi, SendMessageRequest};
pub use error::ApiError;
pub use request_logger::{log_request, log_response};
