use std::{sync::Arc, time::Duration};

use anyhow::Context;
use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::Serialize;
use serde_json::Value;
use shared::error::AdminError;
use storage::{LocalStore, TOKEN_KEY};
use tracing::{debug, warn};

use crate::config::parse_base_url;

/// Single request primitive used by every gateway operation. Attaches the
/// JSON content type and, when one is persisted, the bearer token.
pub struct HttpTransport {
    http: Client,
    base_url: String,
    store: Arc<dyn LocalStore>,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration, store: Arc<dyn LocalStore>) -> anyhow::Result<Self> {
        let parsed = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn request(&self, method: Method, path: &str) -> Result<Value, AdminError> {
        self.send(method, path, None::<&()>).await
    }

    pub async fn request_with_body<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, AdminError>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, Some(body)).await
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value, AdminError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "api: sending request");

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AdminError::Network(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::Api {
                status: Some(status.as_u16()),
                status_text: status
                    .canonical_reason()
                    .unwrap_or(status.as_str())
                    .to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| AdminError::Network(err.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| AdminError::Api {
            status: Some(status.as_u16()),
            status_text: format!("malformed response body: {err}"),
        })
    }

    fn bearer_token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                warn!("api: unable to read bearer token: {err:#}");
                None
            }
        }
    }
}
