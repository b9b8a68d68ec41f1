use crate::error::Result;
use crate::models::Session;

/// Trait for session storage backends
pub trait SessionStore: Send + Sync {
    /// Snapshot of the current session. A store that cannot be read
    /// yields an empty (anonymous) session rather than an error.
    fn read(&self) -> Session;

    /// Replace the whole session in one step
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove every key. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;
}
