//! Wire DTOs for the account API.
//!
//! DESIGN
//! ======
//! The API is not consistent about field spelling between endpoints
//! (`userType` on login, `user_type` on profile updates; `profile` vs
//! `profile_image`). `User` accepts both on input and always serializes the
//! snake-case form.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Identity record for an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Role tag assigned by the server (e.g. `"customer"`).
    #[serde(alias = "userType")]
    pub user_type: String,
    /// First name.
    pub fname: String,
    /// Last name.
    pub lname: String,
    pub email: String,
    pub username: String,
    /// Stored profile image filename, if one was uploaded.
    #[serde(default, alias = "profile_image")]
    pub profile: Option<String>,
}

impl User {
    /// `"First Last"`, as shown in the sidebar.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.fname, self.lname).trim().to_owned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
    #[serde(default)]
    pub verification_sent: bool,
}

/// A file selected for upload as the profile image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields sent to `PUT /profile`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub fname: String,
    pub lname: String,
    pub username: String,
    pub image: Option<ImageUpload>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}
