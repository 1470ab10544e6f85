use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use filmscope_core::models::{AuthUser, FavoriteSet};

use crate::db::DbHandle;
use crate::session::SessionState;

/// The authentication-state stream: `None` means signed out.
///
/// The runtime owns the sender; the single process-lifetime subscription
/// drives [`run_reactor`]. Additional receivers are cheap (watch channel)
/// but the reactor must be spawned exactly once.
pub struct AuthChannel {
    tx: watch::Sender<Option<AuthUser>>,
}

impl AuthChannel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Emit a new auth state. Emitting the current value is a no-op for
    /// subscribers.
    pub fn emit(&self, user: Option<AuthUser>) {
        let _ = self.tx.send(user);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.tx.subscribe()
    }
}

impl Default for AuthChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// React to auth-state transitions until the channel closes.
///
/// Signing in loads that user's favorites from storage; signing out
/// clears the in-memory set (durable rows are kept). The catalog is
/// never re-fetched from here.
pub async fn run_reactor(
    mut rx: watch::Receiver<Option<AuthUser>>,
    db: DbHandle,
    state: Arc<RwLock<SessionState>>,
) {
    while rx.changed().await.is_ok() {
        let user = rx.borrow_and_update().clone();
        apply_transition(&db, &state, user).await;
    }
}

pub(crate) async fn apply_transition(
    db: &DbHandle,
    state: &Arc<RwLock<SessionState>>,
    user: Option<AuthUser>,
) {
    match user {
        Some(user) => {
            let favorites = db
                .load_favorites(&user.uid)
                .await
                .map_err(|e| tracing::error!("failed to load favorites: {e}"))
                .unwrap_or_default();
            tracing::debug!(uid = %user.uid, count = favorites.len(), "signed in");
            state.write().await.apply_auth(Some(user), favorites);
        }
        None => {
            tracing::debug!("signed out");
            state.write().await.apply_auth(None, FavoriteSet::default());
        }
    }
}
