//! API client for a remote roster server.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, Url};
use tracing::debug;

use crate::models::Athlete;

use super::ApiError;

/// Roster collection: `GET` lists it, `POST` appends one athlete.
const ATHLETES_PATH: &str = "api/athletes";

/// `DELETE` empties the roster.
const CLEAR_PATH: &str = "api/athletes/all";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    athletes_url: Url,
    clear_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Self::parse_base_url(base_url)?;
        let athletes_url = Self::endpoint(&base, base_url, ATHLETES_PATH)?;
        let clear_url = Self::endpoint(&base, base_url, CLEAR_PATH)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            athletes_url,
            clear_url,
            token: None,
        })
    }

    /// Share the connection pool with a client that sends a bearer token.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            athletes_url: self.athletes_url.clone(),
            clear_url: self.clear_url.clone(),
            token: Some(token),
        }
    }

    fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(base)
    }

    fn endpoint(base: &Url, base_url: &str, path: &str) -> Result<Url, ApiError> {
        base.join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))
    }

    pub fn url(&self) -> &Url {
        &self.athletes_url
    }

    fn request(&self, method: reqwest::Method, url: &Url) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url.clone())
            .header(header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch the whole roster.
    pub async fn fetch_roster(&self) -> Result<Vec<Athlete>> {
        let response = self
            .request(reqwest::Method::GET, &self.athletes_url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", self.athletes_url))?;

        let response = Self::check_response(response).await?;
        let text = response.text().await.context("Failed to read roster response body")?;
        let athletes: Vec<Athlete> = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("roster JSON: {}", e)))?;

        debug!(url = %self.athletes_url, athletes = athletes.len(), "Fetched remote roster");
        Ok(athletes)
    }

    /// Replace the server's roster: empty it, then append each athlete in
    /// order. The server has no bulk write, so a failure part way leaves it
    /// holding the athletes sent so far. Failures are returned, not retried.
    pub async fn push_roster(&self, athletes: &[Athlete]) -> Result<()> {
        let response = self
            .request(reqwest::Method::DELETE, &self.clear_url)
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", self.clear_url))?;
        Self::check_response(response).await?;

        for athlete in athletes {
            let response = self
                .request(reqwest::Method::POST, &self.athletes_url)
                .json(athlete)
                .send()
                .await
                .with_context(|| format!("Failed to send POST request to {}", self.athletes_url))?;
            Self::check_response(response)
                .await
                .with_context(|| format!("Server rejected {}", athlete.display_name()))?;
        }

        debug!(url = %self.athletes_url, athletes = athletes.len(), "Pushed remote roster");
        Ok(())
    }
}
