//! Authentication backend trait and in-memory implementation for the admin portal

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[async_trait]
pub trait AuthBackend: Send + Sync + 'static {
    /// Validate credentials. Returns true if valid.
    async fn validate(&self, username: &str, password: &str) -> bool;
}

/// In-memory operator store, seeded from the config file
pub struct InMemoryAuthBackend {
    users: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryAuthBackend {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Backend with a single operator account.
    pub fn single(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(HashMap::from([(username.into(), password.into())]))
    }
}

#[async_trait]
impl AuthBackend for InMemoryAuthBackend {
    async fn validate(&self, username: &str, password: &str) -> bool {
        let Ok(users) = self.users.read() else {
            tracing::error!("Operator store lock poisoned; rejecting login");
            return false;
        };
        users.get(username).is_some_and(|pw| pw == password)
    }
}
