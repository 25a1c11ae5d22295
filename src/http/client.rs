//! Typed JSON client over a `Transport`.
//!
//! ERROR HANDLING
//! ==============
//! Every verb helper funnels into `execute`, which is the only place that
//! maps transport failures to `ApiError::Network` and non-2xx responses to
//! `ApiError::Http`. Callers therefore see one error shape regardless of the
//! endpoint or body encoding.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{Body, HttpRequest, HttpResponse, Method, Part, Transport};
use crate::config::ApiConfig;
use crate::error::ApiError;

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";
const NO_CONTENT: u16 = 204;

/// Extra headers and query params for a single call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    /// Appended in order; repeated keys are all sent.
    pub params: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_owned(), value.to_owned()));
        self
    }
}

#[derive(Clone, Debug)]
pub struct HttpClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return the raw response if its status is 2xx.
    ///
    /// # Errors
    ///
    /// `ApiError::Network` when no response arrives, `ApiError::Http` for
    /// non-success statuses.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Body,
        options: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let url = self.config.resolve(endpoint, &options.params)?;
        let headers = build_headers(&body, options.headers);
        tracing::debug!(%method, %url, "api request");

        let request = HttpRequest { method, url: url.clone(), headers, body };
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "api request did not complete");
            ApiError::Network(e.0)
        })?;

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::warn!(%method, %url, status = response.status, error = %err, "api request failed");
            return Err(err);
        }

        tracing::debug!(%method, %url, status = response.status, "api response");
        Ok(response)
    }

    /// Send an optional JSON body and decode the JSON response.
    ///
    /// A 204 response is never read; `R` is decoded from JSON `null`, so
    /// `R = ()` (or any `Option`) resolves without a body.
    ///
    /// # Errors
    ///
    /// See `execute`. An undecodable success body is `ApiError::Network`.
    pub async fn request<R, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match body {
            Some(value) => Body::Json(
                serde_json::to_vec(value)
                    .map_err(|e| ApiError::Network(format!("failed to encode request body: {e}")))?,
            ),
            None => Body::Empty,
        };
        let response = self.execute(method, endpoint, body, options).await?;
        decode(&response)
    }

    /// # Errors
    ///
    /// See `request`.
    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<R, ApiError> {
        self.request::<R, ()>(Method::Get, endpoint, None, options).await
    }

    /// # Errors
    ///
    /// See `request`.
    pub async fn post<R, B>(&self, endpoint: &str, body: &B, options: RequestOptions) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::Post, endpoint, Some(body), options).await
    }

    /// # Errors
    ///
    /// See `request`.
    pub async fn put<R, B>(&self, endpoint: &str, body: &B, options: RequestOptions) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::Put, endpoint, Some(body), options).await
    }

    /// # Errors
    ///
    /// See `request`.
    pub async fn patch<R, B>(&self, endpoint: &str, body: &B, options: RequestOptions) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::Patch, endpoint, Some(body), options).await
    }

    /// # Errors
    ///
    /// See `request`.
    pub async fn delete<R: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<R, ApiError> {
        self.request::<R, ()>(Method::Delete, endpoint, None, options).await
    }

    /// Send form fields as multipart instead of JSON.
    ///
    /// # Errors
    ///
    /// See `request`.
    pub async fn send_multipart<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        parts: Vec<Part>,
    ) -> Result<R, ApiError> {
        let response = self
            .execute(method, endpoint, Body::Multipart(parts), RequestOptions::default())
            .await?;
        decode(&response)
    }
}

/// Default JSON content type (skipped for multipart), then caller overrides.
fn build_headers(body: &Body, overrides: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(overrides.len() + 1);
    if !matches!(body, Body::Multipart(_)) {
        headers.push((CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned()));
    }
    for (name, value) in overrides {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }
    headers
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    if response.status == NO_CONTENT {
        return serde_json::from_value(Value::Null)
            .map_err(|e| ApiError::Network(format!("expected a response body, got 204: {e}")));
    }
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Network(format!("failed to decode response: {e}")))
}
