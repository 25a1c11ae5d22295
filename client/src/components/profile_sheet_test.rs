use profiteer::{ApiError, AuthState, User};

use super::*;

fn user(fname: &str) -> User {
    User {
        id: "u1".to_owned(),
        user_type: "customer".to_owned(),
        fname: fname.to_owned(),
        lname: "Liddell".to_owned(),
        email: "alice@example.com".to_owned(),
        username: "alice".to_owned(),
        profile: None,
    }
}

fn signed_in(fname: &str) -> AuthState {
    let mut state = AuthState::default();
    state.finish_fetch(Ok(user(fname)));
    state
}

// =============================================================
// seed_user
// =============================================================

#[test]
fn seed_user_is_the_session_user() {
    assert_eq!(seed_user(&signed_in("Alice")), Some(user("Alice")));
    assert_eq!(seed_user(&AuthState::default()), None);
}

#[test]
fn refresh_in_flight_does_not_change_seed() {
    let mut state = signed_in("Alice");
    let before = seed_user(&state);

    state.begin_fetch();
    assert!(state.loading);
    assert_eq!(seed_user(&state), before);
}

#[test]
fn refresh_returning_same_user_does_not_change_seed() {
    let mut state = signed_in("Alice");
    let before = seed_user(&state);

    state.begin_fetch();
    state.finish_fetch(Ok(user("Alice")));
    assert_eq!(seed_user(&state), before);
}

#[test]
fn failed_refresh_error_alone_does_not_change_seed() {
    let mut state = signed_in("Alice");
    let before = seed_user(&state);

    state.error = Some(ApiError::Network("offline".to_owned()).to_string());
    assert_eq!(seed_user(&state), before);
}

#[test]
fn saved_profile_changes_seed() {
    let mut state = signed_in("Alice");
    let before = seed_user(&state);

    state.begin_fetch();
    state.finish_fetch(Ok(user("Alicia")));
    assert_ne!(seed_user(&state), before);
}
