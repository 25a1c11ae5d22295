use profiteer::User;

use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        user_type: "customer".to_owned(),
        fname: "Alice".to_owned(),
        lname: "Liddell".to_owned(),
        email: "alice@example.com".to_owned(),
        username: "alice".to_owned(),
        profile: None,
    }
}

fn settled(user: Option<User>) -> AuthState {
    AuthState { user, loading: false, resolved: true, error: None }
}

#[test]
fn should_redirect_unauth_when_settled_and_user_missing() {
    assert_eq!(unauth_redirect_target(&settled(None)), Some("/"));
}

#[test]
fn should_not_redirect_before_first_check() {
    let state = AuthState::default();
    assert_eq!(unauth_redirect_target(&state), None);
    assert_eq!(authed_redirect_target(&state), None);
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { loading: true, ..settled(None) };
    assert_eq!(unauth_redirect_target(&state), None);
}

#[test]
fn should_not_redirect_unauth_when_user_exists() {
    assert_eq!(unauth_redirect_target(&settled(Some(user()))), None);
}

#[test]
fn login_route_forwards_authenticated_user() {
    assert_eq!(authed_redirect_target(&settled(Some(user()))), Some("/dashboard"));
    assert_eq!(authed_redirect_target(&settled(None)), None);
}

#[test]
fn refresh_keeps_user_and_suppresses_redirects() {
    let mut state = settled(Some(user()));
    state.begin_fetch();
    assert_eq!(unauth_redirect_target(&state), None);
    assert_eq!(authed_redirect_target(&state), None);
    assert!(state.user.is_some());
}
