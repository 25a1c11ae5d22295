//! `fetch`-backed transport.
//!
//! Client-side (csr): real requests via `gloo-net` with
//! `credentials: include`, so the browser attaches and stores the session
//! cookie on every call, cross-origin included.
//! Elsewhere (native unit tests): every send fails with a transport error,
//! which the core reports as a network error.
//!
//! ERROR HANDLING
//! ==============
//! Any failure before a status line arrives (request build, CORS, offline,
//! body read) becomes `TransportError`. HTTP error statuses are not errors
//! here; the core decides what they mean.

#![allow(clippy::unused_async)]

#[cfg(all(test, not(feature = "csr")))]
#[path = "browser_test.rs"]
mod browser_test;

use profiteer::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Stateless: the browser owns the cookie jar.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            fetch(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError(format!("{} {}: fetch is only available in the browser", request.method, request.url)))
        }
    }
}

#[cfg(feature = "csr")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    use gloo_net::http::RequestBuilder;
    use profiteer::http::Body;
    use web_sys::RequestCredentials;

    let mut builder = RequestBuilder::new(&request.url)
        .method(gloo_method(request.method))
        .credentials(RequestCredentials::Include);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let built = match request.body {
        Body::Empty => builder.build(),
        Body::Json(bytes) => {
            let text = String::from_utf8(bytes).map_err(|e| TransportError(format!("request body is not UTF-8: {e}")))?;
            builder.body(text)
        }
        Body::Multipart(parts) => builder.body(form_data(&parts)?),
    }
    .map_err(|e| TransportError(e.to_string()))?;

    let resp = built.send().await.map_err(|e| TransportError(e.to_string()))?;
    let status = resp.status();
    let body = resp.binary().await.map_err(|e| TransportError(e.to_string()))?;
    Ok(HttpResponse { status, body })
}

#[cfg(feature = "csr")]
fn gloo_method(method: profiteer::http::Method) -> gloo_net::http::Method {
    use gloo_net::http::Method as M;
    use profiteer::http::Method;

    match method {
        Method::Get => M::GET,
        Method::Post => M::POST,
        Method::Put => M::PUT,
        Method::Patch => M::PATCH,
        Method::Delete => M::DELETE,
    }
}

/// Multipart body as `FormData`; the browser writes the boundary header.
#[cfg(feature = "csr")]
fn form_data(parts: &[profiteer::http::Part]) -> Result<web_sys::FormData, TransportError> {
    use profiteer::http::PartValue;
    use web_sys::{Blob, BlobPropertyBag, FormData};

    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        match &part.value {
            PartValue::Text(value) => form.append_with_str(&part.name, value).map_err(js_error)?,
            PartValue::File { filename, content_type, bytes } => {
                let chunks = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
                let options = BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options).map_err(js_error)?;
                form.append_with_blob_and_filename(&part.name, &blob, filename)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

#[cfg(feature = "csr")]
fn js_error(value: wasm_bindgen::JsValue) -> TransportError {
    TransportError(format!("{value:?}"))
}
