//! Registration form, validation rules, and submit flow.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::meets_min_password_len;
use crate::api::AuthApi;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::RegisterRequest;

pub const REGISTERED_MESSAGE: &str = "Account created successfully!";
pub const FIX_ERRORS_NOTICE: &str = "Please fix the errors below";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

static EMAIL_SHAPE: LazyLock<Option<Regex>> = LazyLock::new(|| match Regex::new(r"\S+@\S+\.\S+") {
    Ok(re) => Some(re),
    Err(e) => {
        tracing::error!(error = %e, "email pattern failed to compile");
        None
    }
});

/// Basic `local@domain.tld` shape check; the API does real validation.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(email))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterField {
    FirstName,
    LastName,
    Email,
    Username,
    Password,
    ConfirmPassword,
}

impl RegisterField {
    pub const ALL: [Self; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Username,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Key used by the API (and the form's `name` attributes).
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::FirstName => "fname",
            Self::LastName => "lname",
            Self::Email => "email",
            Self::Username => "username",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "confirm_password" => Some(Self::ConfirmPassword),
            other => Self::ALL.into_iter().find(|f| f.wire_name() == other),
        }
    }
}

/// At most one message per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterErrors(BTreeMap<RegisterField, String>);

impl RegisterErrors {
    #[must_use]
    pub fn get(&self, field: RegisterField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: RegisterField, message: &str) {
        self.0.insert(field, message.to_owned());
    }

    /// Drop a field's message; returns whether there was one.
    pub fn clear(&mut self, field: RegisterField) -> bool {
        self.0.remove(&field).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fold server field errors into the matching slots. Unknown keys are
    /// logged and skipped.
    pub fn merge_server(&mut self, fields: &BTreeMap<String, String>) {
        for (name, message) in fields {
            match RegisterField::from_wire_name(name) {
                Some(field) => self.set(field, message),
                None => tracing::warn!(field = %name, %message, "server error for unknown registration field"),
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    #[must_use]
    pub fn value(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::FirstName => &self.fname,
            RegisterField::LastName => &self.lname,
            RegisterField::Email => &self.email,
            RegisterField::Username => &self.username,
            RegisterField::Password => &self.password,
            RegisterField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: RegisterField, value: String) {
        let slot = match field {
            RegisterField::FirstName => &mut self.fname,
            RegisterField::LastName => &mut self.lname,
            RegisterField::Email => &mut self.email,
            RegisterField::Username => &mut self.username,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value;
    }

    /// Run every rule. Later rules overwrite earlier messages for a field,
    /// so the most specific problem is the one shown.
    #[must_use]
    pub fn validate(&self) -> RegisterErrors {
        let mut errors = RegisterErrors::default();

        let required = [
            (RegisterField::FirstName, self.fname.trim(), "First name is required"),
            (RegisterField::LastName, self.lname.trim(), "Last name is required"),
            (RegisterField::Email, self.email.trim(), "Email is required"),
            (RegisterField::Username, self.username.trim(), "Username is required"),
            (RegisterField::Password, self.password.as_str(), "Password is required"),
            (RegisterField::ConfirmPassword, self.confirm_password.as_str(), "Please confirm your password"),
        ];
        for (field, value, message) in required {
            if value.is_empty() {
                errors.set(field, message);
            }
        }

        if !self.email.is_empty() && !is_valid_email(&self.email) {
            errors.set(RegisterField::Email, "Please enter a valid email address");
        }
        if !self.password.is_empty() && !self.confirm_password.is_empty() && self.password != self.confirm_password {
            errors.set(RegisterField::ConfirmPassword, "Passwords do not match");
        }
        if !self.password.is_empty() && !meets_min_password_len(&self.password) {
            errors.set(RegisterField::Password, "Password must be at least 6 characters long");
        }

        errors
    }

    /// Request body; the confirmation never leaves the client.
    #[must_use]
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            fname: self.fname.clone(),
            lname: self.lname.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(RegisterErrors),
    Registered { message: String, verification_sent: bool },
    /// The API refused the registration.
    Rejected { errors: RegisterErrors, notice: String },
}

pub async fn submit_registration<T: Transport>(api: &AuthApi<T>, form: &RegisterForm) -> RegisterOutcome {
    let errors = form.validate();
    if !errors.is_empty() {
        return RegisterOutcome::Invalid(errors);
    }

    match api.register(&form.to_request()).await {
        Ok(resp) => {
            tracing::info!(user_id = %resp.user.id, verification_sent = resp.verification_sent, "registered");
            let message = if resp.message.is_empty() { REGISTERED_MESSAGE.to_owned() } else { resp.message };
            RegisterOutcome::Registered { message, verification_sent: resp.verification_sent }
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration failed");
            rejected(&err)
        }
    }
}

fn rejected(err: &ApiError) -> RegisterOutcome {
    let mut errors = RegisterErrors::default();
    if let Some(fields) = err.field_errors() {
        errors.merge_server(fields);
        if !errors.is_empty() {
            return RegisterOutcome::Rejected { errors, notice: FIX_ERRORS_NOTICE.to_owned() };
        }
    }

    let message = match err {
        ApiError::Http { message, .. } => message.clone(),
        ApiError::Network(_) => REGISTRATION_FAILED_MESSAGE.to_owned(),
    };
    errors.set(RegisterField::Email, &message);
    RegisterOutcome::Rejected { errors, notice: message }
}
