//! HTTP client facade for the Relocate Me backend.
//!
//! All traffic goes through [`ApiClient`]: one base URL, JSON bodies, and
//! bearer-token injection per request. The token is a field on the client
//! value, threaded explicitly, never a process-global default header.

use crate::model::{
    ApiMessage, CategoryBreakdown, ChromeExtension, DashboardOverview, Identity,
    JobOpportunities, LocationComparison, ResetCodeResponse, ResourceCatalog, TimelineOverview,
    TokenResponse,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected our credentials. Callers treat this as a signal
    /// to drop back to the unauthenticated state.
    #[error("not authorized")]
    Unauthorized,
    #[error("backend returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not save download: {0}")]
    Io(#[from] std::io::Error),
}

/// The two location endpoints the backend seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Phoenix,
    PeakDistrict,
}

impl Location {
    fn housing_path(self) -> &'static str {
        match self {
            Location::Phoenix => "/housing/phoenix",
            Location::PeakDistrict => "/housing/peak-district",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Location::Phoenix => "Phoenix, Arizona",
            Location::PeakDistrict => "Peak District, UK",
        }
    }
}

/// Result of an extension download attempt that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    /// Archive saved to this path.
    Saved(PathBuf),
    /// The backend answered with a `{message}` body instead of an archive.
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
    download_timeout: Duration,
}

impl ApiClient {
    /// Build a client for the given backend base URL (without `/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let cfg = crate::config::config();
        Self::with_timeouts(
            base_url,
            Duration::from_secs(cfg.backend.request_timeout_secs),
            Duration::from_secs(cfg.backend.download_timeout_secs),
        )
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        request_timeout: Duration,
        download_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: None,
            download_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map non-success statuses to [`ApiError`], pulling the backend's
    /// `detail`/`message` out of the body when there is one.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let detail = resp
                .json::<ApiMessage>()
                .await
                .ok()
                .and_then(|m| m.detail.or(m.message))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.authed(self.http.get(self.api_url(path))).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.post(self.api_url(path)).json(body))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    // ---- Auth ----

    /// Exchange credentials for a bearer token. Does not store the token;
    /// that is the session store's job.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = json!({ "username": username, "password": password });
        let resp = self
            .http
            .post(self.api_url("/auth/login"))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn me(&self) -> Result<Identity, ApiError> {
        self.get_json("/auth/me").await
    }

    pub async fn request_password_reset(
        &self,
        username: &str,
    ) -> Result<ResetCodeResponse, ApiError> {
        self.post_json("/auth/reset-password", &json!({ "username": username }))
            .await
    }

    pub async fn complete_password_reset(
        &self,
        username: &str,
        reset_code: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = json!({
            "username": username,
            "reset_code": reset_code,
            "new_password": new_password,
        });
        let resp = self
            .authed(self.http.post(self.api_url("/auth/complete-password-reset")).json(&body))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    // ---- Read endpoints ----

    pub async fn dashboard_overview(&self) -> Result<DashboardOverview, ApiError> {
        self.get_json("/dashboard/overview").await
    }

    pub async fn full_timeline(&self) -> Result<TimelineOverview, ApiError> {
        self.get_json("/timeline/full").await
    }

    pub async fn timeline_by_category(&self) -> Result<CategoryBreakdown, ApiError> {
        self.get_json("/timeline/by-category").await
    }

    pub async fn resources(&self) -> Result<ResourceCatalog, ApiError> {
        self.get_json("/resources/all").await
    }

    pub async fn housing(&self, location: Location) -> Result<crate::model::HousingStats, ApiError> {
        self.get_json(location.housing_path()).await
    }

    pub async fn jobs(&self) -> Result<JobOpportunities, ApiError> {
        self.get_json("/jobs/opportunities").await
    }

    pub async fn comparison(&self) -> Result<LocationComparison, ApiError> {
        self.get_json("/comparison/phoenix-to-peak-district").await
    }

    pub async fn chrome_extensions(&self) -> Result<Vec<ChromeExtension>, ApiError> {
        self.get_json("/chrome-extensions").await
    }

    // ---- Mutations ----

    pub async fn update_step_progress(
        &self,
        step_id: &str,
        completed: bool,
    ) -> Result<(), ApiError> {
        let body = json!({ "step_id": step_id, "completed": completed });
        let resp = self
            .authed(self.http.post(self.api_url("/timeline/update-progress")).json(&body))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    // ---- Downloads ----

    /// Fetch an extension archive and save it under `dir`.
    ///
    /// The extension's `download_url` is an absolute path (already carrying
    /// the `/api` prefix), so it is joined to the bare base URL.
    pub async fn download_extension(
        &self,
        extension: &ChromeExtension,
        dir: &Path,
    ) -> Result<DownloadOutcome, ApiError> {
        let url = format!("{}{}", self.base_url, extension.download_url);
        let resp = self
            .authed(self.http.get(url))
            .timeout(self.download_timeout)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = resp
                .json::<ApiMessage>()
                .await
                .ok()
                .and_then(|m| m.message.or(m.detail))
                .unwrap_or_else(|| "Download not available yet".to_string());
            return Ok(DownloadOutcome::Unavailable(message));
        }

        let bytes = resp.bytes().await?;
        crate::storage::ensure_dir(dir).map_err(|e| {
            std::io::Error::other(format!("create download dir: {}", e))
        })?;
        let path = dir.join(extension.archive_file_name());
        tokio::fs::write(&path, &bytes).await?;
        Ok(DownloadOutcome::Saved(path))
    }
}
