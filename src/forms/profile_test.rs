use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};

use super::*;
use crate::api::AuthApi;
use crate::config::ApiConfig;
use crate::http::{Body, HttpClient, Method, MockTransport, PartValue};
use crate::session::AuthState;

// =============================================================
// Helpers
// =============================================================

#[derive(Clone, Default)]
struct CellStore(Rc<RefCell<AuthState>>);

impl SessionStore for CellStore {
    fn snapshot(&self) -> AuthState {
        self.0.borrow().clone()
    }

    fn update(&self, apply: impl FnOnce(&mut AuthState)) {
        apply(&mut self.0.borrow_mut());
    }
}

fn user_json(fname: &str) -> Value {
    json!({
        "id": "u-1", "user_type": "customer", "fname": fname, "lname": "Lovelace",
        "email": "ada@example.com", "username": "ada", "profile": "ada.png"
    })
}

fn make_user() -> User {
    serde_json::from_value(user_json("Ada")).unwrap()
}

fn wire(mock: &MockTransport) -> (UserApi<MockTransport>, Session<MockTransport, CellStore>) {
    let http = HttpClient::new(ApiConfig::new(Some("http://api.test")).unwrap(), mock.clone());
    let session = Session::new(AuthApi::new(http.clone()), CellStore::default());
    (UserApi::new(http), session)
}

fn signed_in(session: &Session<MockTransport, CellStore>) {
    session.store().update(|s| s.finish_fetch(Ok(make_user())));
}

fn png() -> ImageUpload {
    ImageUpload { filename: "me.png".to_owned(), content_type: "image/png".to_owned(), bytes: vec![1, 2, 3] }
}

// =============================================================
// ProfileForm
// =============================================================

#[test]
fn from_user_copies_editable_fields() {
    let form = ProfileForm::from_user(&make_user());
    assert_eq!(form.fname, "Ada");
    assert_eq!(form.lname, "Lovelace");
    assert_eq!(form.username, "ada");
}

#[test]
fn has_changes_detects_text_and_image() {
    let user = make_user();
    let form = ProfileForm::from_user(&user);
    assert!(!form.has_changes(&user, false));
    assert!(form.has_changes(&user, true));
    assert!(ProfileForm { username: "countess".to_owned(), ..form }.has_changes(&user, false));
}

// =============================================================
// check_image
// =============================================================

#[test]
fn check_image_accepts_images_up_to_limit() {
    assert_eq!(check_image("image/png", 10), Ok(()));
    assert_eq!(check_image("image/jpeg", MAX_IMAGE_BYTES), Ok(()));
}

#[test]
fn check_image_rejects_other_types() {
    assert_eq!(check_image("application/pdf", 10), Err(ImageRejection::NotAnImage));
    assert_eq!(check_image("", 10), Err(ImageRejection::NotAnImage));
}

#[test]
fn check_image_rejects_oversized_files() {
    let err = check_image("image/png", MAX_IMAGE_BYTES + 1).unwrap_err();
    assert_eq!(err, ImageRejection::TooLarge);
    assert_eq!(err.title(), "File too large");
}

// =============================================================
// save_profile
// =============================================================

#[tokio::test]
async fn unchanged_form_makes_no_request() {
    let mock = MockTransport::new();
    let (api, session) = wire(&mock);
    signed_in(&session);

    let form = ProfileForm::from_user(&make_user());
    assert_eq!(save_profile(&api, &session, &form, None).await, ProfileOutcome::Unchanged);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn save_puts_multipart_then_refreshes_session() {
    let mock = MockTransport::new();
    let (api, session) = wire(&mock);
    signed_in(&session);
    mock.respond_json(200, &json!({ "message": "Profile saved", "user": user_json("Augusta") }));
    mock.respond_json(200, &user_json("Augusta"));

    let form = ProfileForm { fname: "Augusta".to_owned(), ..ProfileForm::from_user(&make_user()) };
    let outcome = save_profile(&api, &session, &form, Some(png())).await;
    assert_eq!(outcome, ProfileOutcome::Saved { message: "Profile saved".to_owned() });

    let sent = mock.requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].url, "http://api.test/profile");
    let Body::Multipart(parts) = &sent[0].body else { panic!("expected multipart") };
    assert!(parts.iter().any(|p| p.name == "fname" && p.value == PartValue::Text("Augusta".to_owned())));
    assert!(parts.iter().any(|p| p.name == "profile" && matches!(&p.value, PartValue::File { filename, .. } if filename == "me.png")));
    assert_eq!(sent[1].method, Method::Get);
    assert_eq!(sent[1].url, "http://api.test/me");

    assert_eq!(session.state().user.map(|u| u.fname), Some("Augusta".to_owned()));
}

#[tokio::test]
async fn save_without_session_user_still_sends() {
    let mock = MockTransport::new();
    let (api, session) = wire(&mock);
    mock.respond_json(200, &json!({ "user": user_json("Ada") }));
    mock.respond_json(200, &user_json("Ada"));

    let outcome = save_profile(&api, &session, &ProfileForm::from_user(&make_user()), None).await;
    assert_eq!(outcome, ProfileOutcome::Saved { message: PROFILE_SAVED_MESSAGE.to_owned() });
}

#[tokio::test]
async fn failed_save_reports_message_and_skips_refresh() {
    let mock = MockTransport::new();
    let (api, session) = wire(&mock);
    signed_in(&session);
    mock.respond_json(409, &json!({ "message": "Username already taken" }));

    let form = ProfileForm { username: "taken".to_owned(), ..ProfileForm::from_user(&make_user()) };
    let outcome = save_profile(&api, &session, &form, None).await;
    assert_eq!(outcome, ProfileOutcome::Failed("Username already taken".to_owned()));
    assert_eq!(mock.request_count(), 1);
    assert_eq!(session.state().user, Some(make_user()));
}

// =============================================================
// PasswordChangeForm
// =============================================================

fn password_form(current: &str, new: &str, confirm: &str) -> PasswordChangeForm {
    PasswordChangeForm { current: current.to_owned(), new: new.to_owned(), confirm: confirm.to_owned() }
}

#[test]
fn password_check_requires_every_field() {
    assert_eq!(password_form("", "secret1", "secret1").check(), Err(PasswordRejection::Missing));
    assert_eq!(password_form("old", "", "").check(), Err(PasswordRejection::Missing));
}

#[test]
fn password_check_reports_mismatch_before_length() {
    assert_eq!(password_form("old", "abc", "abd").check(), Err(PasswordRejection::Mismatch));
}

#[test]
fn password_check_enforces_minimum_length() {
    let err = password_form("old", "abcde", "abcde").check().unwrap_err();
    assert_eq!(err, PasswordRejection::TooShort);
    assert_eq!(err.description(), "Password must be at least 6 characters long.");
}

#[test]
fn password_check_accepts_valid_form() {
    assert_eq!(password_form("old", "abcdef", "abcdef").check(), Ok(()));
}
