//! Shared authenticated transport for the Opticini backend.
//!
//! Every workspace operation goes through [`ApiClient::send`], which carries
//! the stored bearer token and transparently recovers from an expired access
//! token by refreshing it once and retrying the original request once. A
//! second 401 after a successful refresh is a hard failure, never a reason
//! to refresh again.

pub mod error;
pub mod token_store;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub use error::ApiError;
pub use token_store::{FileTokenStore, MemoryTokenStore, StoredTokens, TokenStore};

const TOKEN_OBTAIN_PATH: &str = "/api/token/";
const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct TokenPairResponse {
    access: String,
    // SimpleJWT only returns a new refresh token when rotation is enabled.
    refresh: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a fresh token pair and persist it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let url = self.url(TOKEN_OBTAIN_PATH);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| ApiError::network(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(&url, e))?;
        if !status.is_success() {
            return Err(error::from_login_status(status, &body));
        }
        let pair: TokenPairResponse = serde_json::from_str(&body)?;
        self.tokens.store(&pair.access, pair.refresh.as_deref()).await?;
        info!(username = %username, "Stored new token pair after login.");
        Ok(())
    }

    /// Drop stored credentials.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.tokens.clear().await?;
        Ok(())
    }

    /// Perform an authenticated request against `path`.
    ///
    /// Contract:
    /// - no stored access token: fail with `Unauthenticated` without any
    ///   network call;
    /// - first attempt 401: refresh the access token exactly once, then
    ///   retry the original request once (same verb, path and body, only the
    ///   Authorization header differs) and return that outcome as final;
    /// - refresh failure: clear both stored tokens and fail with
    ///   `Unauthenticated`, without retrying the original request;
    /// - any non-401 status passes through unchanged (403 never triggers a
    ///   refresh); network-level failures propagate without retry.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let Some(access) = self.tokens.access_token().await else {
            return Err(ApiError::Unauthenticated);
        };

        let url = self.url(path);
        let request_id = Uuid::new_v4();
        debug!(%request_id, method = %method, url = %url, "Sending authenticated request.");

        let first = self
            .attempt(method.clone(), &url, body, &access)
            .await
            .map_err(|e| ApiError::network(&url, e))?;
        if first.status() != StatusCode::UNAUTHORIZED {
            return Ok(first);
        }

        debug!(%request_id, "Access token rejected with 401, refreshing.");
        let access = self.refresh_access_token().await?;
        let second = self
            .attempt(method, &url, body, &access)
            .await
            .map_err(|e| ApiError::network(&url, e))?;
        Ok(second)
    }

    async fn attempt(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        access: &str,
    ) -> reqwest::Result<Response> {
        let mut builder = self.http.request(method, url).bearer_auth(access);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder.send().await
    }

    /// Exchange the stored refresh token for a new access token. Any failure
    /// here (missing token, network error, rejection, malformed response)
    /// clears both stored tokens and surfaces as `Unauthenticated`.
    async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let Some(refresh) = self.tokens.refresh_token().await else {
            self.clear_tokens().await;
            return Err(ApiError::Unauthenticated);
        };

        let url = self.url(TOKEN_REFRESH_PATH);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "Token refresh rejected, clearing stored credentials.");
                self.clear_tokens().await;
                return Err(ApiError::Unauthenticated);
            }
            Err(e) => {
                warn!(error = %e, "Token refresh request failed, clearing stored credentials.");
                self.clear_tokens().await;
                return Err(ApiError::Unauthenticated);
            }
        };

        let pair: Result<TokenPairResponse, _> = match response.text().await {
            Ok(body) => serde_json::from_str(&body).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let pair = match pair {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "Token refresh returned an unusable body, clearing stored credentials.");
                self.clear_tokens().await;
                return Err(ApiError::Unauthenticated);
            }
        };

        self.tokens.store(&pair.access, pair.refresh.as_deref()).await?;
        debug!("Refreshed access token.");
        Ok(pair.access)
    }

    async fn clear_tokens(&self) {
        if let Err(e) = self.tokens.clear().await {
            warn!(error = %e, "Failed to clear stored tokens.");
        }
    }

    // --- JSON convenience wrappers used by the api modules ---

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.send(method, path, body).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(&url, e))?;
        if !status.is_success() {
            return Err(error::from_status(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::GET, path, None).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.request_json(Method::POST, path, Some(&body)).await
    }

    /// POST with an empty body, for action-trigger endpoints.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::POST, path, None).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.request_json(Method::PUT, path, Some(&body)).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.request_json(Method::PATCH, path, Some(&body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        let response = self.send(Method::DELETE, path, None).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(&url, e))?;
        Err(error::from_status(status, &body))
    }
}
