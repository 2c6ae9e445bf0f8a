//! # HTTP Adapter
//!
//! [`CaseApi`] over reqwest. Bodies are JSON both ways; an empty body
//! decodes to `null` and a non-JSON body is kept as a string.

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde_json::{json, Value};
use shared_types::{
    ApiFailure, ApiResponse, ApiResult, CasePatch, CaseQuery, NoteParams, ResponseHeaders,
};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::domain::endpoints::{Endpoint, HttpMethod};
use crate::domain::errors::ApiError;
use crate::ports::outbound::CaseApi;

/// Case backend client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCaseApi {
    client: Client,
    base_url: Url,
}

impl HttpCaseApi {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidBaseUrl`] when the base URL cannot carry a path,
    /// [`ApiError::Http`] when the TLS backend fails to initialise.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL of an endpoint. Segments are percent-encoded.
    #[must_use]
    pub fn url(&self, endpoint: Endpoint<'_>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        url
    }

    async fn send(
        &self,
        method: HttpMethod,
        endpoint: Endpoint<'_>,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> ApiResult {
        let url = self.url(endpoint);
        debug!(%method, %url, "[cf-03] Sending request");

        let mut request = self.client.request(to_reqwest(method), url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_failure(&url, &e))?;

        let status = response.status().as_u16();
        let headers: ResponseHeaders = response
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
            .collect();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_failure(&url, &e))?;
        let body = decode_body(&bytes);

        if (200..300).contains(&status) {
            Ok(ApiResponse {
                status,
                body,
                headers,
            })
        } else {
            warn!(%method, %url, status, "[cf-03] Backend returned an error status");
            Err(ApiFailure::http(status, body))
        }
    }

    fn transport_failure(&self, url: &Url, error: &reqwest::Error) -> ApiFailure {
        let message = if error.is_timeout() {
            format!("request to {url} timed out")
        } else if error.is_connect() {
            format!("cannot connect to {}", self.base_url)
        } else {
            error.to_string()
        };
        warn!(%url, error = %message, "[cf-03] Request failed before a response");
        ApiFailure::transport(message)
    }
}

fn to_reqwest(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[async_trait]
impl CaseApi for HttpCaseApi {
    async fn fetch_case(&self, case_id: &str) -> ApiResult {
        self.send(HttpMethod::Get, Endpoint::Case { case_id }, &[], None)
            .await
    }

    async fn fetch_cases(&self, query: &CaseQuery) -> ApiResult {
        self.send(HttpMethod::Get, Endpoint::Cases, &query.pairs(), None)
            .await
    }

    async fn fetch_case_faults(&self, case_id: &str) -> ApiResult {
        self.send(HttpMethod::Get, Endpoint::CaseFaults { case_id }, &[], None)
            .await
    }

    async fn fetch_case_notes(&self, case_id: &str) -> ApiResult {
        self.send(HttpMethod::Get, Endpoint::CaseNotes { case_id }, &[], None)
            .await
    }

    async fn fetch_case_recipients(&self, case_id: &str) -> ApiResult {
        self.send(
            HttpMethod::Get,
            Endpoint::CaseRecipients { case_id },
            &[],
            None,
        )
        .await
    }

    async fn create_case_note(&self, case_id: &str, params: &NoteParams) -> ApiResult {
        let body = serde_json::to_value(params)
            .map_err(|e| ApiFailure::transport(format!("cannot encode note: {e}")))?;
        self.send(HttpMethod::Post, Endpoint::CaseNotes { case_id }, &[], Some(body))
            .await
    }

    async fn update_case(&self, case_id: &str, version_id: &str, patch: &CasePatch) -> ApiResult {
        let body = serde_json::to_value(patch)
            .map_err(|e| ApiFailure::transport(format!("cannot encode patch: {e}")))?;
        self.send(
            HttpMethod::Patch,
            Endpoint::CaseVersion {
                case_id,
                version_id,
            },
            &[],
            Some(body),
        )
        .await
    }

    async fn update_case_note(&self, case_id: &str, note_id: &str, status: &str) -> ApiResult {
        self.send(
            HttpMethod::Patch,
            Endpoint::CaseNote { case_id, note_id },
            &[],
            Some(json!({ "status": status })),
        )
        .await
    }
}
