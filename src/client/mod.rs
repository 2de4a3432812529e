//! Public client surface + builder.
//!
//! [`AvClient`] owns the API key, base URL, and HTTP stack, and performs the
//! generic request/validate step shared by every provider function. Endpoint
//! modules compose it and layer their own schema on top.

mod constants;

use crate::error::AvError;
use constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Clone)]
pub struct AvClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

// Manual impl so the credential never leaks through debug output.
impl std::fmt::Debug for AvClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"redacted")
            .finish_non_exhaustive()
    }
}

impl AvClient {
    /// Create a new builder.
    pub fn builder() -> AvClientBuilder {
        AvClientBuilder::default()
    }

    /// Issue one GET for the given provider `function` and return the parsed
    /// JSON body.
    ///
    /// `params` are appended as query pairs; the API key and
    /// `datatype=json` are appended last. No caching and no retry happen at
    /// this layer.
    pub async fn query(
        &self,
        function: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, AvError> {
        let mut url = self.base_url.clone();
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("function", function);
            for (k, v) in params {
                qp.append_pair(k, v);
            }
            qp.append_pair("apikey", &self.api_key);
            qp.append_pair("datatype", "json");
        }

        debug!(function, "querying provider");
        let resp = self.http.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(AvError::Status {
                status: resp.status().as_u16(),
                url: redacted(&url),
            });
        }

        let body = resp.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| AvError::Data(format!("{function}: body is not valid JSON: {e}")))?;

        // The provider reports rate limits and bad symbols inside a 200
        // response, under one of these keys, instead of the data payload.
        if let Some(obj) = value.as_object() {
            for key in ["Error Message", "Note", "Information"] {
                if let Some(message) = obj.get(key).and_then(|v| v.as_str()) {
                    return Err(AvError::Api {
                        message: message.to_string(),
                    });
                }
            }
        }

        Ok(value)
    }
}

/// Render the URL for error messages with the API key replaced.
fn redacted(url: &Url) -> String {
    let mut clean = url.clone();
    {
        let mut qp = clean.query_pairs_mut();
        qp.clear();
        for (k, v) in url.query_pairs() {
            if k == "apikey" {
                qp.append_pair(&k, "redacted");
            } else {
                qp.append_pair(&k, &v);
            }
        }
    }
    clean.to_string()
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct AvClientBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
}

impl AvClientBuilder {
    /// Set the API key (required, non-empty).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the query endpoint (e.g. a local mock in tests).
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<AvClient, AvError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AvError::Config("api key must be set and non-empty".into()))?;

        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(AvClient {
            http,
            base_url,
            api_key,
        })
    }
}
