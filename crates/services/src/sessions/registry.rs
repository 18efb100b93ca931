use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

use quiz_core::model::{QuestionStore, QuizSettings, SessionId};

use super::service::QuizSession;
use crate::error::SessionError;

type SharedSession = Arc<Mutex<QuizSession>>;

/// Per-user quiz sessions over one shared, read-only question store.
///
/// Each session has its own lock, so calls for one session are serialized while
/// different sessions proceed independently.
pub struct SessionRegistry {
    store: Arc<QuestionStore>,
    settings: QuizSettings,
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(store: Arc<QuestionStore>, settings: QuizSettings) -> Self {
        Self {
            store,
            settings,
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Open a new session at the menu.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the registry lock is poisoned.
    pub fn create(&self) -> Result<SessionId, SessionError> {
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = QuizSession::new(Arc::clone(&self.store), self.settings);
        self.sessions
            .lock()
            .map_err(|e| SessionError::Poisoned(e.to_string()))?
            .insert(id, Arc::new(Mutex::new(session)));
        debug!(%id, "session created");
        Ok(id)
    }

    /// Run `f` with exclusive access to one session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for an unknown id and
    /// `SessionError::Poisoned` if a lock is poisoned.
    pub fn with_session<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut QuizSession) -> T,
    ) -> Result<T, SessionError> {
        let session = {
            let sessions = self
                .sessions
                .lock()
                .map_err(|e| SessionError::Poisoned(e.to_string()))?;
            sessions
                .get(&id)
                .cloned()
                .ok_or(SessionError::UnknownSession(id))?
        };
        let mut guard = session
            .lock()
            .map_err(|e| SessionError::Poisoned(e.to_string()))?;
        Ok(f(&mut *guard))
    }

    /// Drop a session. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the registry lock is poisoned.
    pub fn remove(&self, id: SessionId) -> Result<bool, SessionError> {
        let removed = self
            .sessions
            .lock()
            .map_err(|e| SessionError::Poisoned(e.to_string()))?
            .remove(&id)
            .is_some();
        debug!(%id, removed, "session removed");
        Ok(removed)
    }

    /// Number of open sessions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the registry lock is poisoned.
    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self
            .sessions
            .lock()
            .map_err(|e| SessionError::Poisoned(e.to_string()))?
            .len())
    }
}
