//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use shared::client::{AdminInfo, LoginRequest, LoginResponse, MessageResponse, ReplyRequest};
use shared::models::{ChatMessage, ChatSessionPreview, ChatSettingsUpdate, ChatSettingsView};

/// HTTP client for making network requests to the widget server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Auth API ==========

    /// Login with shop, username and password
    pub async fn login(
        &self,
        shop: &str,
        username: &str,
        password: &str,
    ) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            shop: shop.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };

        self.post("/api/auth/login", &request).await
    }

    /// Get current admin information
    pub async fn me(&self) -> ClientResult<AdminInfo> {
        self.get("/api/auth/me").await
    }

    /// Logout
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.post_empty::<ApiResponse<()>>("/api/auth/logout")
            .await?;
        self.token = None;
        Ok(())
    }

    // ========== Inbox API ==========

    /// List chat sessions for the admin's shop, newest activity first
    pub async fn chat_sessions(&self) -> ClientResult<Vec<ChatSessionPreview>> {
        self.get("/api/admin/chat-sessions").await
    }

    /// Fetch the full transcript of one session
    pub async fn chat_messages(&self, session_id: &str) -> ClientResult<Vec<ChatMessage>> {
        self.get(&format!("/api/admin/chat-messages?sessionId={}", session_id))
            .await
    }

    /// Send an admin reply into a session
    pub async fn send_reply(&self, session_id: &str, message: &str) -> ClientResult<ChatMessage> {
        let request = ReplyRequest {
            session_id: session_id.to_string(),
            message: message.to_string(),
        };

        let response: MessageResponse = self.post("/api/admin/chat-reply", &request).await?;
        Ok(response.new_message)
    }

    // ========== Settings API ==========

    /// Get the shop's widget settings
    pub async fn chat_settings(&self) -> ClientResult<ChatSettingsView> {
        self.get("/api/admin/chat-settings").await
    }

    /// Update the shop's widget settings (partial update)
    pub async fn update_chat_settings(
        &self,
        update: &ChatSettingsUpdate,
    ) -> ClientResult<ChatSettingsView> {
        self.post("/api/admin/chat-settings", update).await
    }
}
