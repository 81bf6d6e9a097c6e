use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::SuiteConfig;
use crate::food::{FoodRecord, PatchOperation};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid base URL: {0}")]
    BaseUrl(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Authentication response carried no access token")]
    MissingToken,
    #[error("Malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(rename = "accessToken", default)]
    access_token: Option<String>,
}

/// Status line and raw body of a remote reply. Steps assert on the status,
/// on body substrings, and on parsed JSON independently, so the body is
/// kept as text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    pub fn body_contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}

/// HTTP session bound to the service base URL and a bearer token.
///
/// Built once per run by [`ApiClient::authenticate`]. Every request issued
/// through it carries the token. Steps share the session by reference and
/// must not rebind it; the underlying connections are released when the
/// session is dropped, on any exit path.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl ApiClient {
    /// Exchanges the configured credentials for an access token and returns
    /// the session bound to it. A reply without a non-empty `accessToken`
    /// is a fatal setup failure.
    pub async fn authenticate(config: &SuiteConfig) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|_| ApiError::BaseUrl(config.base_url.clone()))?;
        let http = Client::new();

        let mut url = base_url.clone();
        url.set_path("/api/User/Authentication");
        let response = http
            .post(url)
            .json(&AuthRequest {
                username: &config.credentials.username,
                password: &config.credentials.password,
            })
            .send()
            .await?;
        let body = response.text().await?;
        let auth: AuthResponse = serde_json::from_str(&body)?;
        let token = auth
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)?;
        tracing::debug!(base_url = %base_url, "authenticated");

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub async fn create_food(&self, food: &FoodRecord) -> Result<ApiResponse, ApiError> {
        let request = self.http.post(self.endpoint("/api/Food/Create")).json(food);
        self.execute(request).await
    }

    pub async fn edit_food(
        &self,
        food_id: &str,
        changes: &[PatchOperation],
    ) -> Result<ApiResponse, ApiError> {
        let request = self
            .http
            .patch(self.endpoint(&format!("/api/Food/Edit/{food_id}")))
            .json(&changes);
        self.execute(request).await
    }

    pub async fn list_foods(&self) -> Result<ApiResponse, ApiError> {
        self.execute(self.http.get(self.endpoint("/api/Food/All")))
            .await
    }

    pub async fn delete_food(&self, food_id: &str) -> Result<ApiResponse, ApiError> {
        self.execute(
            self.http
                .delete(self.endpoint(&format!("/api/Food/Delete/{food_id}"))),
        )
        .await
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse, ApiError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = %status, "api response");
        Ok(ApiResponse { status, body })
    }
}
