//! Backend client boundary for the PG admin app.
//!
//! [`BackendClient`] is the narrow capability interface the session store is
//! written against. [`SupabaseBackend`] implements it over HTTPS against the
//! hosted auth (`/auth/v1`) and REST (`/rest/v1`) endpoints.

pub mod auth_event;
pub mod auth_event_bus;
pub mod backend_client;
pub mod error;
pub mod storage;
pub mod supabase;

pub use auth_event::{AuthChangeEvent, AuthEvent};
pub use auth_event_bus::{AuthEventBus, AuthSubscription};
pub use backend_client::{BackendClient, SignUpRequest, SignUpResponse};
pub use error::{BackendError, Result as BackendResult};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use supabase::SupabaseBackend;

#[cfg(test)]
mod tests;
