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

#[test]
fn signal_store_snapshot_reflects_updates() {
    let signal = RwSignal::new(AuthState::default());
    let store = SignalStore(signal);

    store.update(AuthState::begin_fetch);
    assert!(store.snapshot().loading);

    store.update(|s| s.finish_fetch(Ok(user())));
    let state = signal.get_untracked();
    assert!(!state.loading);
    assert_eq!(state.user.map(|u| u.username), Some("alice".to_owned()));
}

#[test]
fn signal_store_copies_share_one_signal() {
    let store = SignalStore(RwSignal::new(AuthState::default()));
    let copy = store;
    copy.update(AuthState::sign_out);
    assert!(store.snapshot().resolved);
}
