//! The one HTTP call to OpenRouter

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::constants::{HTTP_REFERER, REQUEST_TIMEOUT, X_TITLE};
use crate::error::NanoBananaError;
use crate::request::ChatCompletionRequest;

/// Thin wrapper around a configured `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl OpenRouterClient {
    /// Builds a client with the attribution headers and request timeout set.
    pub fn new(endpoint: Url, api_key: &str) -> Result<Self, NanoBananaError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("http-referer"),
            HeaderValue::from_static(HTTP_REFERER),
        );
        headers.insert(
            HeaderName::from_static("x-title"),
            HeaderValue::from_static(X_TITLE),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    /// Where requests go.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POSTs the request and returns the raw body of a 2xx response.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Vec<u8>, NanoBananaError> {
        debug!(
            "POST {} model={} parts={}",
            self.endpoint,
            request.model,
            request
                .messages
                .iter()
                .map(|message| message.content.len())
                .sum::<usize>()
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        debug!("Response {status}, {} bytes", bytes.len());

        if !status.is_success() {
            warn!("OpenRouter returned {status}");
            return Err(NanoBananaError::ApiStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(bytes.to_vec())
    }
}
