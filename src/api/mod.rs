//! Resource facades: one method per API operation.
//!
//! SYSTEM CONTEXT
//! ==============
//! UI code talks to these types, never to `HttpClient` directly, so endpoint
//! paths and wire shapes live in exactly one place.

pub mod auth;
pub mod user;

pub use auth::AuthApi;
pub use user::UserApi;

use crate::config::ApiConfig;
use crate::http::{HttpClient, Transport};

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const ME: &str = "me";
    pub const REGISTER: &str = "register";
    pub const PROFILE: &str = "profile";
    pub const PROFILE_IMAGE: &str = "profile-image";
}

/// Both facades over one shared client (and therefore one cookie jar).
#[derive(Clone, Debug)]
pub struct Api<T> {
    pub auth: AuthApi<T>,
    pub users: UserApi<T>,
}

impl<T: Transport + Clone> Api<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        let http = HttpClient::new(config, transport);
        Self { auth: AuthApi::new(http.clone()), users: UserApi::new(http) }
    }
}
