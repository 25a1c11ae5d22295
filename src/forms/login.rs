//! Login form and submit flow.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::DASHBOARD_PATH;
use crate::api::AuthApi;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{LoginRequest, User};

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// The submit control stays disabled until both fields have content.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    fn to_request(&self) -> LoginRequest {
        LoginRequest { username: self.username.clone(), password: self.password.clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A required field was empty; nothing was sent.
    Incomplete,
    LoggedIn { user: User, message: String },
    /// Text for the form's error banner.
    Failed(String),
}

impl LoginOutcome {
    /// Path to navigate to, if any.
    #[must_use]
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::LoggedIn { .. } => Some(DASHBOARD_PATH),
            Self::Incomplete | Self::Failed(_) => None,
        }
    }
}

pub async fn submit_login<T: Transport>(api: &AuthApi<T>, form: &LoginForm) -> LoginOutcome {
    if !form.can_submit() {
        return LoginOutcome::Incomplete;
    }

    match api.login(&form.to_request()).await {
        Ok(resp) => {
            tracing::info!(user_id = %resp.user.id, "login successful");
            LoginOutcome::LoggedIn { user: resp.user, message: resp.message }
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            LoginOutcome::Failed(banner_message(&err))
        }
    }
}

/// Server messages are shown verbatim; anything else gets a generic retry hint.
#[must_use]
pub fn banner_message(err: &ApiError) -> String {
    match err {
        ApiError::Http { message, .. } => message.clone(),
        ApiError::Network(_) => UNEXPECTED_ERROR_MESSAGE.to_owned(),
    }
}
