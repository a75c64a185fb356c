//! Process-wide session context: the backend client handle and the
//! observable authenticated-user state.

pub mod client;

pub use client::{AuthModel, BackendClient, UserRecord};

use crate::config::BackendConfig;
use std::sync::Arc;
use tokio::sync::watch;

/// Application context created once at startup. Owns the single long-lived
/// backend client and the reactive user container; UI consumers receive
/// clones and subscriptions instead of reaching for a module global.
#[derive(Clone)]
pub struct Session {
    client: Arc<BackendClient>,
    user: watch::Receiver<Option<AuthModel>>,
}

impl Session {
    /// Construct the context: build the client, take its auth snapshot and
    /// subscribe to every later change, so the container cannot go stale.
    pub fn new(cfg: &BackendConfig) -> Self {
        let client = Arc::new(BackendClient::new(cfg));
        let user = client.subscribe();
        Self { client, user }
    }

    /// The shared client handle.
    pub fn client(&self) -> Arc<BackendClient> {
        Arc::clone(&self.client)
    }

    /// The reactive user container. Await `changed()` on a clone to observe
    /// login, logout and refresh transitions.
    pub fn user(&self) -> watch::Receiver<Option<AuthModel>> {
        self.user.clone()
    }

    /// The currently authenticated user's profile, if any.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.user.borrow().as_ref().map(|model| model.record.clone())
    }
}
