//! Session/profile synchronization for the PG admin app.
//!
//! [`SessionStore`] owns the single source of truth for the current session,
//! user and profile, and mediates every transition through a
//! [`pg_backend::BackendClient`].

pub mod auth_snapshot;
pub mod auth_state;
pub mod retry;
pub mod session_store;
pub mod sign_up_outcome;

pub use auth_snapshot::AuthSnapshot;
pub use auth_state::AuthState;
pub use retry::{IsRetryable, RetryPolicy, Sleeper, TokioSleeper, with_retry};
pub use session_store::SessionStore;
pub use sign_up_outcome::SignUpOutcome;

#[cfg(test)]
mod tests;
