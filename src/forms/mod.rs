//! Form models, local validation, and submit flows.
//!
//! DESIGN
//! ======
//! Each form is a plain struct the UI binds to. Validation is synchronous
//! and never touches the network; submit functions return an outcome enum
//! the UI maps to banners, field errors, notices, and navigation. The API
//! remains the authority, so server-side field errors are merged into the
//! same slots local validation uses.

pub mod login;
pub mod profile;
pub mod register;

/// Passwords shorter than this are rejected before submission.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Where a successful login lands.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Where an anonymous visitor is sent (the login page).
pub const LOGIN_PATH: &str = "/";

pub(crate) fn meets_min_password_len(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}
