use crate::AuthSnapshot;

use std::fmt;

/// Coarse auth state derived from an [`AuthSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Uninitialized,
    Loading,
    Unauthenticated,
    /// Signed in; the profile row is still loading or could not be read.
    AuthenticatedNoProfile,
    AuthenticatedWithProfile,
}

impl AuthState {
    pub fn is_authenticated(self) -> bool {
        matches!(
            self,
            Self::AuthenticatedNoProfile | Self::AuthenticatedWithProfile
        )
    }
}

impl From<&AuthSnapshot> for AuthState {
    fn from(snapshot: &AuthSnapshot) -> Self {
        if !snapshot.initialized {
            return Self::Uninitialized;
        }

        match (&snapshot.user, &snapshot.profile) {
            (None, _) if snapshot.loading => Self::Loading,
            (None, _) => Self::Unauthenticated,
            (Some(_), None) => Self::AuthenticatedNoProfile,
            (Some(_), Some(_)) => Self::AuthenticatedWithProfile,
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Unauthenticated => "unauthenticated",
            Self::AuthenticatedNoProfile => "authenticated (no profile)",
            Self::AuthenticatedWithProfile => "authenticated",
        };
        f.write_str(name)
    }
}
