//! # REST client for the member service
//!
//! [`ApiClient`] maps each server endpoint to one async method. It keeps no state of
//! its own beyond the HTTP connection pool: the bearer token is read from the shared
//! [`TokenStore`] right before every protected request, so a login or logout takes
//! effect on the very next call.
//!
//! | Method | HTTP | Path | Bearer |
//! |--------|------|------|--------|
//! | [`list_members`](ApiClient::list_members) | GET | `/api/v1/members` | yes |
//! | [`get_member`](ApiClient::get_member) | GET | `/api/v1/members/{id}` | yes |
//! | [`create_member`](ApiClient::create_member) | POST | `/api/v1/members` | no |
//! | [`update_member`](ApiClient::update_member) | PUT | `/api/v1/members/{id}` | yes |
//! | [`delete_member`](ApiClient::delete_member) | DELETE | `/api/v1/members/{id}` | yes |
//! | [`upload_profile_image`](ApiClient::upload_profile_image) | POST multipart | `/api/v1/members/{id}/profile-image` | yes |
//! | [`login`](ApiClient::login) | POST | `/api/v1/auth/login` | no |
//!
//! Requests are never retried. Non-2xx responses become [`ApiError`] with the
//! server's message untouched.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use store::TokenStore;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{
    AuthenticationResponse, LoginRequest, Member, MemberRegistrationRequest, MemberUpdateRequest,
};
use crate::token::strip_bearer;

pub const MEMBERS_PATH: &str = "/api/v1/members";
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// HTTP client for the member API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config) && Arc::ptr_eq(&self.tokens, &other.tokens)
    }
}

fn build_http(config: &ClientConfig) -> reqwest::Client {
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(secs) = config.request_timeout_secs {
        match reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(secs))
            .build()
        {
            Ok(client) => return client,
            Err(e) => warn!("Failed to apply request timeout, using defaults: {}", e),
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = config;

    reqwest::Client::new()
}

impl ApiClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: build_http(&config),
            config: Arc::new(config),
            tokens,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The store the bearer token is read from.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        self.tokens.clone()
    }

    fn member_url(&self, id: i64) -> String {
        self.config.url(&format!("{MEMBERS_PATH}/{id}"))
    }

    /// Display URL of a member's profile image.
    pub fn profile_image_url(&self, id: i64) -> String {
        format!("{}/profile-image", self.member_url(id))
    }

    /// Persisted token, read fresh for every protected request.
    fn bearer_token(&self) -> Option<String> {
        match self.tokens.get(&self.config.token_key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read access token: {}", e);
                None
            }
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer_token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => {
                debug!("No access token stored, sending request without Authorization");
                builder
            }
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::new());
        let err = ApiError::from_response(status, &body);
        warn!("Request failed with status {}: {}", status, err.message());
        Err(err)
    }

    /// Fetch every member.
    #[tracing::instrument(skip(self))]
    pub async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        let request = self.authorized(self.http.get(self.config.url(MEMBERS_PATH)));
        let response = Self::send(request).await?;
        let members: Vec<Member> = response.json().await?;
        debug!("Fetched {} members", members.len());
        Ok(members)
    }

    /// Fetch a single member.
    #[tracing::instrument(skip(self))]
    pub async fn get_member(&self, id: i64) -> Result<Member, ApiError> {
        let request = self.authorized(self.http.get(self.member_url(id)));
        let response = Self::send(request).await?;
        Ok(response.json().await?)
    }

    /// Register a new member. Public endpoint, no bearer token is sent.
    ///
    /// Returns the token the server issues for the new member (from the
    /// `Authorization` response header), which signup uses to start a session.
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_member(
        &self,
        request: &MemberRegistrationRequest,
    ) -> Result<Option<String>, ApiError> {
        let builder = self.http.post(self.config.url(MEMBERS_PATH)).json(request);
        let response = Self::send(builder).await?;
        Ok(token_from_header(&response))
    }

    /// Replace a member's profile fields.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_member(
        &self,
        id: i64,
        request: &MemberUpdateRequest,
    ) -> Result<(), ApiError> {
        let builder = self.authorized(self.http.put(self.member_url(id)).json(request));
        Self::send(builder).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_member(&self, id: i64) -> Result<(), ApiError> {
        let builder = self.authorized(self.http.delete(self.member_url(id)));
        Self::send(builder).await?;
        Ok(())
    }

    /// Upload a new profile image as the multipart part `file`.
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_profile_image(
        &self,
        id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let part = match mime_for(file_name) {
            Some(mime) => part.mime_str(mime)?,
            None => part,
        };
        let form = reqwest::multipart::Form::new().part("file", part);

        let builder = self.authorized(
            self.http
                .post(format!("{}/profile-image", self.member_url(id)))
                .multipart(form),
        );
        Self::send(builder).await?;
        Ok(())
    }

    /// Exchange credentials for a token. Public endpoint.
    ///
    /// The token comes from the `Authorization` response header when present,
    /// otherwise from the response body.
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(
        &self,
        credentials: &LoginRequest,
    ) -> Result<AuthenticationResponse, ApiError> {
        let builder = self.http.post(self.config.url(LOGIN_PATH)).json(credentials);
        let response = Self::send(builder).await?;
        let header_token = token_from_header(&response);

        let body = response.text().await?;
        let mut auth = if body.trim().is_empty() {
            AuthenticationResponse {
                token: String::new(),
                member: None,
            }
        } else {
            serde_json::from_str::<AuthenticationResponse>(&body)
                .map_err(|e| ApiError::Decode(e.to_string()))?
        };

        if let Some(token) = header_token {
            auth.token = token;
        }
        auth.token = strip_bearer(&auth.token).to_string();
        if auth.token.is_empty() {
            return Err(ApiError::Decode("login response carried no token".to_string()));
        }
        Ok(auth)
    }
}

fn token_from_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(strip_bearer)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
