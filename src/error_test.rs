use super::*;

// =============================================================
// from_response: message extraction
// =============================================================

#[test]
fn from_response_uses_body_message_and_status() {
    let err = ApiError::from_response(409, br#"{"message":"Username already taken"}"#);
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Username already taken");
}

#[test]
fn from_response_without_body_falls_back_to_status_message() {
    let err = ApiError::from_response(500, b"");
    assert_eq!(err.to_string(), "HTTP error 500");
}

#[test]
fn from_response_with_html_body_falls_back() {
    let err = ApiError::from_response(502, b"<html>Bad Gateway</html>");
    assert_eq!(err.to_string(), "HTTP error 502");
}

#[test]
fn from_response_json_without_message_falls_back() {
    let err = ApiError::from_response(404, br#"{"detail":"nope"}"#);
    assert_eq!(err.to_string(), "HTTP error 404");
}

#[test]
fn from_response_empty_message_falls_back() {
    let err = ApiError::from_response(400, br#"{"message":""}"#);
    assert_eq!(err.to_string(), "HTTP error 400");
}

#[test]
fn from_response_non_string_message_falls_back() {
    let err = ApiError::from_response(400, br#"{"message":42}"#);
    assert_eq!(err.to_string(), "HTTP error 400");
}

// =============================================================
// field errors
// =============================================================

#[test]
fn from_response_collects_string_field_errors() {
    let err = ApiError::from_response(
        422,
        br#"{"message":"Invalid","errors":{"email":"Email taken","username":7}}"#,
    );
    let fields = err.field_errors().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["email"], "Email taken");
}

#[test]
fn field_errors_none_when_absent() {
    let err = ApiError::from_response(422, br#"{"message":"Invalid"}"#);
    assert!(err.field_errors().is_none());
    assert!(ApiError::Network("down".to_owned()).field_errors().is_none());
}

#[test]
fn errors_that_are_not_an_object_are_ignored() {
    let body = ErrorBody::parse(br#"{"errors":["a","b"]}"#);
    assert!(body.errors.is_empty());
    assert!(body.message.is_none());
}

// =============================================================
// classification
// =============================================================

#[test]
fn unauthorized_is_only_401() {
    assert!(ApiError::from_response(401, b"").is_unauthorized());
    assert!(!ApiError::from_response(403, b"").is_unauthorized());
    assert!(!ApiError::Network("timeout".to_owned()).is_unauthorized());
}

#[test]
fn network_error_has_no_status_and_prefixed_message() {
    let err = ApiError::Network("connection refused".to_owned());
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "Network error: connection refused");
}
