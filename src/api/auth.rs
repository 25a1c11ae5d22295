//! Authentication endpoints: login, logout, identity check, registration.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::endpoints;
use crate::error::ApiError;
use crate::http::{Body, HttpClient, Method, RequestOptions, Transport};
use crate::types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};

#[derive(Clone, Debug)]
pub struct AuthApi<T> {
    http: HttpClient<T>,
}

impl<T: Transport> AuthApi<T> {
    pub fn new(http: HttpClient<T>) -> Self {
        Self { http }
    }

    /// `POST /login`. On success the server sets the session credential.
    ///
    /// # Errors
    ///
    /// `ApiError::Http` for rejected credentials, `ApiError::Network` otherwise.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.http
            .post(endpoints::LOGIN, credentials, RequestOptions::default())
            .await
    }

    /// `DELETE /logout`. Any 2xx counts; whatever body comes back is ignored.
    ///
    /// # Errors
    ///
    /// See `HttpClient::execute`.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.http
            .execute(Method::Delete, endpoints::LOGOUT, Body::Empty, RequestOptions::default())
            .await
            .map(|_| ())
    }

    /// `GET /me`. A 401 means "not logged in", which callers treat as a state.
    ///
    /// # Errors
    ///
    /// See `HttpClient::request`.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.http.get(endpoints::ME, RequestOptions::default()).await
    }

    /// `POST /register`. Validation failures come back as `field_errors`.
    ///
    /// # Errors
    ///
    /// See `HttpClient::request`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.http
            .post(endpoints::REGISTER, request, RequestOptions::default())
            .await
    }
}
