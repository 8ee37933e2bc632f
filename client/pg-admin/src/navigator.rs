use pg_session::AuthSnapshot;

use std::fmt;

/// Screens of the app. The root navigator picks one from the auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    SignIn,
    Home,
}

impl Screen {
    /// Loading wins while anything is in flight; then a user means Home and
    /// no user means the sign-in screen.
    pub fn select(snapshot: &AuthSnapshot) -> Self {
        if snapshot.loading {
            Self::Loading
        } else if snapshot.is_authenticated() {
            Self::Home
        } else {
            Self::SignIn
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loading => "Loading",
            Self::SignIn => "Sign In",
            Self::Home => "Home",
        };
        f.write_str(name)
    }
}
