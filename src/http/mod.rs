//! HTTP layer: the transport seam and the typed client built on it.
//!
//! ARCHITECTURE
//! ============
//! `transport` defines plain request/response values and the `Transport`
//! trait. `client` turns endpoints and serde types into those values and
//! translates failures into `ApiError`. Credential handling (cookies) is
//! entirely a transport concern.

pub mod client;
#[cfg(test)]
pub mod mock;
#[cfg(feature = "native")]
pub mod native;
pub mod transport;

pub use client::{HttpClient, RequestOptions};
#[cfg(test)]
pub use mock::MockTransport;
#[cfg(feature = "native")]
pub use native::ReqwestTransport;
pub use transport::{Body, HttpRequest, HttpResponse, Method, Part, PartValue, Transport, TransportError};
