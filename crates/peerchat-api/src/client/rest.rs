use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::{AuthRequest, ChatApi, SendMessageRequest};
use crate::error::ApiError;
use crate::request_logger::{log_request, log_response};
use peerchat_types::{AuthResponse, Message, User};

const AUTH_FALLBACK: &str = "Authentication failed";

/// reqwest-backed client for the peerchat REST service.
pub struct RestClient {
    base_url: String,
    http: reqwest::Client,
    verbose: bool,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        // Ensure base_url doesn't end with a slash
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            verbose: false,
        }
    }

    /// Enable verbose HTTP debug output (requests, responses, headers).
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Shared path for the register and login endpoints, which differ
    /// only in URL. Any non-2xx becomes `ApiError::Auth` with the
    /// service-provided message.
    async fn auth_call(
        &self,
        path: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let url = self.url(path);
        let request = AuthRequest { username, password };
        log_request("POST", &url, Some(&serde_json::to_value(&request)?), None, self.verbose);

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        log_response(&status, &body, self.verbose);

        if !status.is_success() {
            return Err(ApiError::Auth(ApiError::message_from_body(&body, AUTH_FALLBACK)));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// GET an authenticated endpoint and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        log_request("GET", &url, None, Some(token), self.verbose);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Token {}", token))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        log_response(&status, &body, self.verbose);

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Service(ApiError::message_from_body(
                &body,
                status.as_str(),
            )));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ChatApi for RestClient {
    async fn register(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.auth_call("/chat/register/", username, password).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.auth_call("/chat/login/", username, password).await
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        self.get_json("/chat/current_user/", token).await
    }

    async fn users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.get_json("/chat/users/", token).await
    }

    async fn messages(&self, token: &str, peer_id: i64) -> Result<Vec<Message>, ApiError> {
        self.get_json(&format!("/chat/messages/{}/", peer_id), token).await
    }

    async fn send_message(
        &self,
        token: &str,
        receiver_id: i64,
        content: &str,
    ) -> Result<Message, ApiError> {
        let url = self.url("/chat/send_message/");
        let request = SendMessageRequest { receiver_id, content };
        log_request(
            "POST",
            &url,
            Some(&serde_json::to_value(&request)?),
            Some(token),
            self.verbose,
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Token {}", token))
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        log_response(&status, &body, self.verbose);

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Service(ApiError::message_from_body(
                &body,
                status.as_str(),
            )));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = RestClient::new("http://localhost:8000/");
        assert_eq!(client.url("/chat/users/"), "http://localhost:8000/chat/users/");
    }
}
