//! API location configuration and URL composition.
//!
//! The base URL comes from `PROFITEER_API_URL`. When it is unset every
//! endpoint resolves to a relative path, which only makes sense when the
//! front end is served from the API's own origin.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::sync::Once;

use url::Url;

use crate::api::endpoints;
use crate::error::{ApiError, ConfigError};

pub const API_URL_ENV: &str = "PROFITEER_API_URL";

static UNSET_BASE_WARNING: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiConfig {
    /// Normalized to end in exactly one `/`.
    base_url: Option<Url>,
}

impl ApiConfig {
    /// Build a config from an optional raw base URL. Blank counts as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the value is not an absolute URL.
    pub fn new(raw: Option<&str>) -> Result<Self, ConfigError> {
        let raw = raw.map(str::trim).filter(|v| !v.is_empty());
        let Some(raw) = raw else {
            UNSET_BASE_WARNING.call_once(|| {
                tracing::warn!("no API base URL provided; using relative paths");
            });
            return Ok(Self { base_url: None });
        };

        let mut url = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
            value: raw.to_owned(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                value: raw.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base_url: Some(url) })
    }

    /// Build a config from `PROFITEER_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the variable is set to an invalid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_URL_ENV) {
            Ok(raw) => Self::new(Some(&raw)),
            Err(_) => Self::new(None),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Resolve an endpoint against the base and append query params in order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the endpoint cannot be joined onto the base.
    pub fn resolve(&self, endpoint: &str, params: &[(String, String)]) -> Result<String, ApiError> {
        let endpoint = endpoint.trim_start_matches('/');
        match &self.base_url {
            Some(base) => {
                let mut url = base
                    .join(endpoint)
                    .map_err(|e| ApiError::Network(format!("invalid endpoint '{endpoint}': {e}")))?;
                if !params.is_empty() {
                    let mut pairs = url.query_pairs_mut();
                    for (key, value) in params {
                        pairs.append_pair(key, value);
                    }
                }
                Ok(url.into())
            }
            None => {
                let mut path = format!("/{endpoint}");
                if !params.is_empty() {
                    let mut query = url::form_urlencoded::Serializer::new(String::new());
                    for (key, value) in params {
                        query.append_pair(key, value);
                    }
                    path.push(if path.contains('?') { '&' } else { '?' });
                    path.push_str(&query.finish());
                }
                Ok(path)
            }
        }
    }

    /// Absolute URL of a stored profile image. Pure string composition.
    #[must_use]
    pub fn profile_image_url(&self, filename: &str) -> String {
        let filename = filename.trim_start_matches('/');
        let base = self.base_url.as_ref().map_or("/", Url::as_str);
        format!("{base}{}/{filename}", endpoints::PROFILE_IMAGE)
    }
}
