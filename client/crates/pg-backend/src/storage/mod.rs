mod file_session_storage;
mod memory_session_storage;

pub use file_session_storage::FileSessionStorage;
pub use memory_session_storage::MemorySessionStorage;

use crate::BackendResult;

use pg_core::Session;

/// Where the backend client keeps the session between process runs.
pub trait SessionStorage: Send + Sync {
    /// `Ok(None)` when nothing usable is stored.
    fn load(&self) -> BackendResult<Option<Session>>;

    fn save(&self, session: &Session) -> BackendResult<()>;

    fn clear(&self) -> BackendResult<()>;
}
