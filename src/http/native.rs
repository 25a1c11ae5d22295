//! Native transport on `reqwest`.
//!
//! The ambient session credential is the client's in-memory cookie jar:
//! `Set-Cookie` from `/login` is replayed on every later call made through
//! the same transport (or any clone of it).

use std::time::Duration;

use reqwest::multipart::{Form, Part as FormPart};

use super::transport::{Body, HttpRequest, HttpResponse, Method, Part, PartValue, Transport, TransportError};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a fresh cookie jar.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TransportError(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http })
    }

    /// Wrap an existing client. Sessions only work if it keeps cookies.
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(bytes) => builder.body(bytes),
            Body::Multipart(parts) => builder.multipart(to_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?
            .to_vec();
        Ok(HttpResponse { status, body })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_form(parts: Vec<Part>) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File { filename, content_type, bytes } => {
                let file = FormPart::bytes(bytes)
                    .file_name(filename)
                    .mime_str(&content_type)
                    .map_err(|e| TransportError(format!("invalid content type '{content_type}': {e}")))?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}
