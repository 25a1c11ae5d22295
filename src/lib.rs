//! # profiteer
//!
//! Client-side core for the Swine Profiteer account front end: typed HTTP
//! access to the account API, the current-user session cache, and the
//! login / registration / profile form flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! UI code calls a facade in `api`, which calls `http::HttpClient`, which
//! hands a fully built request to a `http::Transport`. The transport is the
//! only layer that knows about cookies; everything above it is
//! credential-agnostic and runs unchanged in the browser (`client` crate)
//! and natively (`cli` crate, integration tests).

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod http;
pub mod session;
pub mod types;

pub use api::{Api, AuthApi, UserApi};
pub use config::ApiConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpClient, Transport};
pub use session::{AuthState, Session, SessionPhase, SessionStore};
pub use types::User;
