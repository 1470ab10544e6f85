use std::path::Path;

use tokio::sync::{mpsc, oneshot};

use filmscope_core::error::CoreError;
use filmscope_core::models::{AuthSession, FavoriteSet};
use filmscope_core::storage::Storage;

/// Async handle to the storage actor.
///
/// The SQLite connection is blocking, so it lives on a dedicated thread;
/// workflows talk to it through a command channel.
#[derive(Clone)]
pub struct DbHandle {
    tx: mpsc::UnboundedSender<DbCommand>,
}

enum DbCommand {
    LoadFavorites {
        user_id: String,
        reply: oneshot::Sender<Result<FavoriteSet, CoreError>>,
    },
    SaveFavorites {
        user_id: String,
        set: FavoriteSet,
        reply: oneshot::Sender<Result<(), CoreError>>,
    },
    SaveSession {
        session: Box<AuthSession>,
        reply: oneshot::Sender<Result<(), CoreError>>,
    },
    GetSession {
        reply: oneshot::Sender<Result<Option<AuthSession>, CoreError>>,
    },
    ClearSession {
        reply: oneshot::Sender<Result<(), CoreError>>,
    },
}

impl DbHandle {
    pub fn open(path: &Path) -> Option<Self> {
        let storage = Storage::open(path)
            .map_err(|e| tracing::error!("Failed to open database: {e}"))
            .ok()?;
        Self::spawn(storage)
    }

    /// In-memory storage (for tests).
    pub fn open_memory() -> Option<Self> {
        let storage = Storage::open_memory()
            .map_err(|e| tracing::error!("Failed to open database: {e}"))
            .ok()?;
        Self::spawn(storage)
    }

    fn spawn(storage: Storage) -> Option<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name("db-actor".into())
            .spawn(move || actor_loop(storage, rx))
            .map_err(|e| tracing::error!("Failed to spawn DB thread: {e}"))
            .ok()?;

        Some(Self { tx })
    }

    pub async fn load_favorites(&self, user_id: &str) -> Result<FavoriteSet, CoreError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::LoadFavorites {
            user_id: user_id.to_string(),
            reply,
        });
        rx.await
            .unwrap_or_else(|_| Err(CoreError::Config("DB actor closed".into())))
    }

    pub async fn save_favorites(
        &self,
        user_id: &str,
        set: FavoriteSet,
    ) -> Result<(), CoreError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::SaveFavorites {
            user_id: user_id.to_string(),
            set,
            reply,
        });
        rx.await
            .unwrap_or_else(|_| Err(CoreError::Config("DB actor closed".into())))
    }

    pub async fn save_session(&self, session: AuthSession) -> Result<(), CoreError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::SaveSession {
            session: Box::new(session),
            reply,
        });
        rx.await
            .unwrap_or_else(|_| Err(CoreError::Config("DB actor closed".into())))
    }

    pub async fn get_session(&self) -> Result<Option<AuthSession>, CoreError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::GetSession { reply });
        rx.await
            .unwrap_or_else(|_| Err(CoreError::Config("DB actor closed".into())))
    }

    pub async fn clear_session(&self) -> Result<(), CoreError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::ClearSession { reply });
        rx.await
            .unwrap_or_else(|_| Err(CoreError::Config("DB actor closed".into())))
    }
}

fn actor_loop(storage: Storage, mut rx: mpsc::UnboundedReceiver<DbCommand>) {
    while let Some(cmd) = rx.blocking_recv() {
        match cmd {
            DbCommand::LoadFavorites { user_id, reply } => {
                let _ = reply.send(storage.load_favorites(&user_id));
            }
            DbCommand::SaveFavorites {
                user_id,
                set,
                reply,
            } => {
                let _ = reply.send(storage.save_favorites(&user_id, &set));
            }
            DbCommand::SaveSession { session, reply } => {
                let _ = reply.send(storage.save_session(&session));
            }
            DbCommand::GetSession { reply } => {
                let _ = reply.send(storage.get_session());
            }
            DbCommand::ClearSession { reply } => {
                let _ = reply.send(storage.clear_session());
            }
        }
    }
}
