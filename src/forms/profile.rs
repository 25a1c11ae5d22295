//! Profile sheet: name/username edits, image selection, password tab.
//!
//! DESIGN
//! ======
//! Saving sends the edited fields (and any selected image) to
//! `PUT /profile` and then refreshes the session, so every view reading
//! the shared state sees the new identity. Password change is validated
//! locally only; the API has no endpoint for it, and the UI says so.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use super::meets_min_password_len;
use crate::api::UserApi;
use crate::http::Transport;
use crate::session::{Session, SessionStore};
use crate::types::{ImageUpload, ProfileUpdate, User};

/// Largest accepted profile image.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

pub const PROFILE_SAVED_MESSAGE: &str = "Your profile has been updated successfully.";
pub const PROFILE_FAILED_MESSAGE: &str = "Please try again later.";
pub const NO_CHANGES_MESSAGE: &str = "Your profile information is already up to date.";
pub const PASSWORD_UNSUPPORTED_MESSAGE: &str =
    "Password changes are not supported by the server yet. Your password was not changed.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub fname: String,
    pub lname: String,
    pub username: String,
}

impl ProfileForm {
    /// Seed the fields from the current identity.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self { fname: user.fname.clone(), lname: user.lname.clone(), username: user.username.clone() }
    }

    /// Any text field differs from `user`, or a new image is pending.
    #[must_use]
    pub fn has_changes(&self, user: &User, image_selected: bool) -> bool {
        image_selected || self.fname != user.fname || self.lname != user.lname || self.username != user.username
    }

    #[must_use]
    pub fn to_update(&self, image: Option<ImageUpload>) -> ProfileUpdate {
        ProfileUpdate {
            fname: self.fname.clone(),
            lname: self.lname.clone(),
            username: self.username.clone(),
            image,
        }
    }
}

/// Why a selected file was refused before upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageRejection {
    NotAnImage,
    TooLarge,
}

impl ImageRejection {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::NotAnImage => "Invalid file type",
            Self::TooLarge => "File too large",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::NotAnImage => "Please select an image file.",
            Self::TooLarge => "Please select an image smaller than 5MB.",
        }
    }
}

/// Gate a file picked for upload by MIME type and size.
///
/// # Errors
///
/// `NotAnImage` unless the type starts with `image/`; `TooLarge` above
/// `MAX_IMAGE_BYTES`.
pub fn check_image(content_type: &str, size: u64) -> Result<(), ImageRejection> {
    if !content_type.starts_with("image/") {
        return Err(ImageRejection::NotAnImage);
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageRejection::TooLarge);
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// Nothing to send; no request was made.
    Unchanged,
    Saved { message: String },
    Failed(String),
}

pub async fn save_profile<T, S>(
    api: &UserApi<T>,
    session: &Session<T, S>,
    form: &ProfileForm,
    image: Option<ImageUpload>,
) -> ProfileOutcome
where
    T: Transport,
    S: SessionStore,
{
    let unchanged = session
        .state()
        .user
        .is_some_and(|user| !form.has_changes(&user, image.is_some()));
    if unchanged {
        return ProfileOutcome::Unchanged;
    }

    match api.update_profile(&form.to_update(image)).await {
        Ok(resp) => {
            tracing::info!(user_id = %resp.user.id, "profile updated");
            session.refresh().await;
            let message = if resp.message.is_empty() { PROFILE_SAVED_MESSAGE.to_owned() } else { resp.message };
            ProfileOutcome::Saved { message }
        }
        Err(err) => {
            tracing::warn!(error = %err, "profile update failed");
            ProfileOutcome::Failed(err.to_string())
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordChangeForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordRejection {
    Missing,
    Mismatch,
    TooShort,
}

impl PasswordRejection {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Missing => "All fields are required",
            Self::Mismatch => "Passwords don't match",
            Self::TooShort => "Password too short",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Missing => "Please fill in all password fields.",
            Self::Mismatch => "New password and confirm password must match.",
            Self::TooShort => "Password must be at least 6 characters long.",
        }
    }
}

impl PasswordChangeForm {
    /// Checks run in order; the first failure wins.
    ///
    /// # Errors
    ///
    /// The first rule the form breaks.
    pub fn check(&self) -> Result<(), PasswordRejection> {
        if self.current.is_empty() || self.new.is_empty() || self.confirm.is_empty() {
            return Err(PasswordRejection::Missing);
        }
        if self.new != self.confirm {
            return Err(PasswordRejection::Mismatch);
        }
        if !meets_min_password_len(&self.new) {
            return Err(PasswordRejection::TooShort);
        }
        Ok(())
    }
}
