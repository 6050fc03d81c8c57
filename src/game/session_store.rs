use super::models::GameSession;
use std::collections::HashMap;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

type GuardedSession = Arc<Mutex<GameSession>>;

/// In-memory game sessions, keyed by session id.
///
/// Each session sits behind its own mutex so that concurrent requests on
/// the same session are serialized while different sessions proceed
/// independently.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, GuardedSession>>,
}

pub(crate) fn lock_session(session: &Mutex<GameSession>) -> MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, GuardedSession>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, GuardedSession>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, session: GameSession) {
        let id = session.session_id.clone();
        self.write().insert(id, Arc::new(Mutex::new(session)));
    }

    pub fn get(&self, session_id: &str) -> Option<GuardedSession> {
        self.read().get(session_id).cloned()
    }

    /// Runs `f` on the session while holding its lock.
    pub fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut GameSession) -> T,
    ) -> Option<T> {
        let session = self.get(session_id)?;
        let mut guard = lock_session(&session);
        Some(f(&mut guard))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Removes the started sessions whose start time is more than `max_age`
    /// seconds before `now`, returning how many were removed. Sessions that
    /// were never started are kept.
    pub fn remove_expired(&self, now: f64, max_age: f64) -> usize {
        let is_expired = |session: &GameSession| {
            session.is_started() && now - session.started_at > max_age
        };

        let candidates: Vec<String> = self
            .read()
            .iter()
            .filter(|(_, session)| is_expired(&lock_session(session)))
            .map(|(id, _)| id.clone())
            .collect();
        if candidates.is_empty() {
            return 0;
        }

        let mut sessions = self.write();
        let mut removed = 0;
        for id in candidates {
            // A start call may have refreshed the session in the meantime
            let still_expired = sessions
                .get(&id)
                .is_some_and(|session| is_expired(&lock_session(session)));
            if still_expired {
                sessions.remove(&id);
                removed += 1;
            }
        }
        removed
    }
}
