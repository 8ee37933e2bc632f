use crate::Screen;
use crate::tests::{profile_for, user};

use pg_session::AuthSnapshot;

use uuid::Uuid;

#[test]
fn given_loading_snapshot_when_selected_then_loading_screen() {
    let snapshot = AuthSnapshot::default();

    assert_eq!(Screen::select(&snapshot), Screen::Loading);
}

#[test]
fn given_no_user_when_selected_then_sign_in() {
    let snapshot = AuthSnapshot {
        loading: false,
        initialized: true,
        ..AuthSnapshot::default()
    };

    assert_eq!(Screen::select(&snapshot), Screen::SignIn);
}

#[test]
fn given_user_without_profile_when_selected_then_home() {
    let snapshot = AuthSnapshot {
        user: Some(user(Uuid::new_v4())),
        loading: false,
        initialized: true,
        ..AuthSnapshot::default()
    };

    assert_eq!(Screen::select(&snapshot), Screen::Home);
}

#[test]
fn given_user_with_profile_when_selected_then_home() {
    let id = Uuid::new_v4();
    let snapshot = AuthSnapshot {
        user: Some(user(id)),
        profile: Some(profile_for(id)),
        loading: false,
        initialized: true,
        ..AuthSnapshot::default()
    };

    assert_eq!(Screen::select(&snapshot), Screen::Home);
    assert_eq!(Screen::Home.to_string(), "Home");
}
