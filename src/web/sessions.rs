//! In-memory admin session tokens, owned by the web layer's state.
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "admin_session";

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
    ttl: Option<TimeDelta>,
}

impl SessionStore {
    /// Sessions live until logout when `ttl` is `None`.
    pub fn new(ttl: Option<TimeDelta>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a session and return its token (32 hex chars). Expired sessions are swept first.
    pub fn create(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let mut sessions = self.sessions();
        if let Some(ttl) = self.ttl {
            let before = sessions.len();
            sessions.retain(|_, issued_at| now - *issued_at < ttl);
            if sessions.len() < before {
                tracing::debug!("Dropped {} expired admin sessions", before - sessions.len());
            }
        }
        sessions.insert(token.clone(), now);
        token
    }

    /// True if `token` names a live session. Expired sessions are dropped.
    pub fn is_active(&self, token: &str) -> bool {
        let mut sessions = self.sessions();
        let Some(issued_at) = sessions.get(token).copied() else {
            return false;
        };
        match self.ttl {
            Some(ttl) if Utc::now() - issued_at >= ttl => {
                sessions.remove(token);
                tracing::debug!("Admin session expired");
                false
            }
            _ => true,
        }
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.sessions().remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
