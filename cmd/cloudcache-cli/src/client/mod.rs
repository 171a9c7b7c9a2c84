use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use cloudcache::{Command, Config, Invocation, Method};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authorized ({status}): {body}. Run 'cloudcache login' to obtain a fresh token")]
    Unauthorized { status: StatusCode, body: String },

    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },
}

impl ApiError {
    fn from_response(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized { status, body },
            _ => ApiError::Status { status, body },
        }
    }
}

/// Issues validated commands against the cache service.
pub struct ApiClient {
    client: Client,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl ApiClient {
    /// Build a client carrying the credentials in `config`.
    /// An expired access token is left out.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        let api_key = Some(config.api_key.clone()).filter(|key| !key.is_empty());
        let access_token = if config.token_valid_at(Utc::now()) {
            config.access_token.clone()
        } else {
            None
        };

        Ok(Self {
            client,
            api_key,
            access_token,
        })
    }

    /// Send the invocation's request and decode the JSON response.
    pub async fn execute<C, R>(&self, invocation: &Invocation<'_, C>) -> Result<R>
    where
        C: Command,
        R: DeserializeOwned,
    {
        let url = invocation.url();
        let method = invocation.method();
        tracing::debug!(
            command = invocation.name(),
            %method,
            %url,
            authenticated = self.has_token(),
            "sending request"
        );

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        if let Some(body) = invocation.body() {
            request = request.json(&body);
        }

        let response = self
            .authorize(request)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        tracing::debug!(%status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, body).into());
        }

        response.json().await.context("Failed to parse response")
    }

    fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(api_key) = &self.api_key {
            request = request.header("X-Api-Key", api_key);
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        request
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }
}
