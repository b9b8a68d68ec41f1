use std::sync::RwLock;

use super::storage::SessionStore;
use crate::error::Result;
use crate::models::Session;

/// Process-lifetime store; the whole session sits behind one lock so a
/// reader never sees a half-cleared value.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Session {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self.session.write().unwrap_or_else(|p| p.into_inner());
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self.session.write().unwrap_or_else(|p| p.into_inner());
        *guard = Session::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_every_field() {
        let store = MemorySessionStore::with_session(Session::authenticated("t", "e", "r"));
        store.clear().unwrap();
        assert!(store.read().is_empty());
        store.clear().unwrap();
        assert!(store.read().is_empty());
    }

    #[test]
    fn read_returns_a_snapshot() {
        let store = MemorySessionStore::with_session(Session::authenticated("t", "e", "r"));
        let before = store.read();
        store.clear().unwrap();
        assert_eq!(before.token.as_deref(), Some("t"));
    }
}
