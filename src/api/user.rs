//! Profile endpoints.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use super::endpoints;
use crate::error::ApiError;
use crate::http::{HttpClient, Method, Part, PartValue, Transport};
use crate::types::{ProfileResponse, ProfileUpdate};

/// Multipart field carrying the image file.
const PROFILE_FILE_FIELD: &str = "profile";

#[derive(Clone, Debug)]
pub struct UserApi<T> {
    http: HttpClient<T>,
}

impl<T: Transport> UserApi<T> {
    pub fn new(http: HttpClient<T>) -> Self {
        Self { http }
    }

    /// `PUT /profile` as multipart: `fname`, `lname`, `username` and an
    /// optional `profile` file.
    ///
    /// # Errors
    ///
    /// See `HttpClient::request`.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileResponse, ApiError> {
        self.http
            .send_multipart(Method::Put, endpoints::PROFILE, profile_parts(update))
            .await
    }

    /// Absolute URL for a stored profile image. No network call.
    pub fn profile_image_url(&self, filename: &str) -> String {
        self.http.config().profile_image_url(filename)
    }
}

fn profile_parts(update: &ProfileUpdate) -> Vec<Part> {
    let mut parts = vec![
        Part::text("fname", &update.fname),
        Part::text("lname", &update.lname),
        Part::text("username", &update.username),
    ];
    if let Some(image) = &update.image {
        parts.push(Part {
            name: PROFILE_FILE_FIELD.to_owned(),
            value: PartValue::File {
                filename: image.filename.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            },
        });
    }
    parts
}
