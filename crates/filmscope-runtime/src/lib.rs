mod auth;
mod db;
mod session;
mod view;

pub use auth::AuthChannel;
pub use db::DbHandle;
pub use session::{Page, SearchOutcome, SessionState, PAGE_SIZE};
pub use view::{NavLayout, ViewState};

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, RwLock};

use filmscope_api::catalog::CatalogClient;
use filmscope_api::identity::{IdentityClient, IdentityError};
use filmscope_api::omdb::OmdbClient;
use filmscope_api::traits::{CatalogSource, MovieSearch};
use filmscope_core::config::AppConfig;
use filmscope_core::models::{AuthUser, FavoriteChange, Movie};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("search error: {0}")]
    Search(String),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error("{0}")]
    Validation(String),
    #[error("not signed in")]
    NotSignedIn,
}

impl RuntimeError {
    /// The fixed user-facing message for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotSignedIn => "Please log in to bookmark movies.".into(),
            Self::Identity(e) => e.user_message().into(),
            Self::Search(_) => "Search failed. Please try again.".into(),
            Self::Config(_) | Self::Database(_) | Self::Catalog(_) => {
                "An error occurred. Please try again.".into()
            }
        }
    }
}

/// The application runtime: owns the session state, the storage actor,
/// and the auth-state channel, and exposes the user-triggered workflows.
pub struct Runtime {
    db: DbHandle,
    config: Arc<RwLock<AppConfig>>,
    state: Arc<RwLock<SessionState>>,
    auth: AuthChannel,
}

impl Runtime {
    pub fn new() -> Result<Self, RuntimeError> {
        let config = AppConfig::load().map_err(|e| RuntimeError::Config(e.to_string()))?;
        let db_path =
            AppConfig::ensure_db_path().map_err(|e| RuntimeError::Config(e.to_string()))?;
        let db = DbHandle::open(&db_path)
            .ok_or_else(|| RuntimeError::Database("failed to open database".into()))?;

        Ok(Self {
            db,
            config: Arc::new(RwLock::new(config)),
            state: Arc::new(RwLock::new(SessionState::new())),
            auth: AuthChannel::new(),
        })
    }

    pub async fn get_config(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    pub async fn update_config(&self, new_config: AppConfig) -> Result<(), RuntimeError> {
        new_config
            .save()
            .map_err(|e| RuntimeError::Config(e.to_string()))?;
        *self.config.write().await = new_config;
        Ok(())
    }

    // ── Catalog & search ────────────────────────────────────────

    /// Fetch the static catalog and replace the session's catalog cache.
    /// Returns the catalog size.
    pub async fn fetch_catalog(&self) -> Result<usize, RuntimeError> {
        let url = self.config.read().await.catalog.url.clone();
        let client = CatalogClient::new(&url).map_err(|e| RuntimeError::Config(e.to_string()))?;

        let movies = client.fetch().await.map_err(|e| {
            tracing::error!("Failed to fetch movies: {e}");
            RuntimeError::Catalog(e.to_string())
        })?;

        let mut state = self.state.write().await;
        state.replace_catalog(movies);
        Ok(state.catalog().len())
    }

    /// Search the external movie database and replace the catalog with the
    /// results. Transport failure leaves the prior catalog untouched.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, RuntimeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RuntimeError::Validation("Please enter a search term.".into()));
        }

        let api_key = self.config.read().await.search.api_key.clone();
        if api_key.is_empty() {
            return Err(RuntimeError::Config("search API key required".into()));
        }

        let client = OmdbClient::new(api_key);
        let movies = client.search(query).await.map_err(|e| {
            tracing::error!("Error searching movies: {e}");
            RuntimeError::Search(e.to_string())
        })?;

        Ok(self.state.write().await.apply_search_results(movies))
    }

    /// Advance pagination by one page.
    pub async fn next_page(&self) -> Page {
        self.state.write().await.next_page()
    }

    /// The catalog movies in the current favorite set.
    pub async fn favorite_movies(&self) -> Vec<Movie> {
        self.state.read().await.favorite_movies()
    }

    // ── Favorites ───────────────────────────────────────────────

    /// Toggle a movie in the signed-in user's favorites and persist the
    /// updated set. The caller re-derives [`ViewState`] afterwards to
    /// refresh bookmark indicators.
    pub async fn toggle_favorite(&self, movie_id: &str) -> Result<FavoriteChange, RuntimeError> {
        let mut state = self.state.write().await;
        let uid = state
            .user()
            .map(|u| u.uid.clone())
            .ok_or(RuntimeError::NotSignedIn)?;

        let change = state.toggle_favorite(movie_id)?;
        let favorites = state.favorites().clone();

        self.db
            .save_favorites(&uid, favorites)
            .await
            .map_err(|e| RuntimeError::Database(e.to_string()))?;
        Ok(change)
    }

    // ── Identity ────────────────────────────────────────────────

    /// Create an account. The user is sent to sign-in afterwards; no
    /// session is established here.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, RuntimeError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(RuntimeError::Validation("All fields are required.".into()));
        }

        let client = self.identity_client().await?;
        let token = client.sign_up(email.trim(), password).await?;
        Ok(AuthUser {
            uid: token.local_id,
            email: token.email,
        })
    }

    /// Sign in, persist the session, and emit the signed-in state.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, RuntimeError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(RuntimeError::Validation("Please fill out both fields.".into()));
        }

        let client = self.identity_client().await?;
        let token = client.sign_in(email, password).await?;
        let session = token.into_session(Utc::now());

        self.db
            .save_session(session.clone())
            .await
            .map_err(|e| RuntimeError::Database(e.to_string()))?;

        self.auth.emit(Some(session.user.clone()));
        Ok(session.user)
    }

    /// Drop the persisted session and emit the signed-out state.
    pub async fn sign_out(&self) -> Result<(), RuntimeError> {
        self.db
            .clear_session()
            .await
            .map_err(|e| RuntimeError::Database(e.to_string()))?;
        self.auth.emit(None);
        Ok(())
    }

    /// Re-emit a persisted, unexpired session at startup; stale sessions
    /// are discarded.
    pub async fn restore_session(&self) -> Result<Option<AuthUser>, RuntimeError> {
        let session = self
            .db
            .get_session()
            .await
            .map_err(|e| RuntimeError::Database(e.to_string()))?;

        match session {
            Some(session) if !session.is_expired(Utc::now()) => {
                self.auth.emit(Some(session.user.clone()));
                Ok(Some(session.user))
            }
            Some(_) => {
                self.db
                    .clear_session()
                    .await
                    .map_err(|e| RuntimeError::Database(e.to_string()))?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), RuntimeError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(RuntimeError::Validation(
                "Please enter an email address.".into(),
            ));
        }

        let client = self.identity_client().await?;
        client.send_password_reset(email).await?;
        Ok(())
    }

    /// Complete a password reset. `oob_code` is the `oobCode` URL query
    /// parameter; a missing code means the link is invalid or expired.
    pub async fn confirm_password_reset(
        &self,
        oob_code: Option<&str>,
        new_password: &str,
    ) -> Result<(), RuntimeError> {
        let oob_code = match oob_code {
            Some(code) if !code.is_empty() => code,
            _ => {
                return Err(RuntimeError::Validation("Invalid or expired link.".into()));
            }
        };
        let new_password = new_password.trim();
        if new_password.is_empty() {
            return Err(RuntimeError::Validation(
                "Please enter a new password.".into(),
            ));
        }

        let client = self.identity_client().await?;
        client.confirm_password_reset(oob_code, new_password).await?;
        Ok(())
    }

    async fn identity_client(&self) -> Result<IdentityClient, RuntimeError> {
        let api_key = self.config.read().await.identity.api_key.clone();
        if api_key.is_empty() {
            return Err(RuntimeError::Config("identity API key required".into()));
        }
        Ok(IdentityClient::new(api_key))
    }

    // ── Auth stream & view ──────────────────────────────────────

    pub fn subscribe_auth(&self) -> watch::Receiver<Option<AuthUser>> {
        self.auth.subscribe()
    }

    /// Spawn the auth-state reactor. Call exactly once, at startup; the
    /// subscription lives for the rest of the process.
    pub fn spawn_auth_reactor(&self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(auth::run_reactor(
            self.auth.subscribe(),
            self.db.clone(),
            self.state.clone(),
        ))
    }

    /// Derive the UI updates the current state requires.
    pub async fn view_state(&self) -> ViewState {
        ViewState::derive(&*self.state.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use filmscope_core::models::{AuthSession, FavoriteSet};

    fn test_runtime() -> Runtime {
        Runtime {
            db: DbHandle::open_memory().unwrap(),
            config: Arc::new(RwLock::new(AppConfig::default())),
            state: Arc::new(RwLock::new(SessionState::new())),
            auth: AuthChannel::new(),
        }
    }

    fn user(uid: &str) -> AuthUser {
        AuthUser {
            uid: uid.into(),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_toggle_favorite_requires_sign_in() {
        let rt = test_runtime();
        let err = rt.toggle_favorite("tt1").await.unwrap_err();
        assert!(matches!(err, RuntimeError::NotSignedIn));
        assert_eq!(err.user_message(), "Please log in to bookmark movies.");
        assert!(rt.db.load_favorites("uid-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_favorite_persists_each_mutation() {
        let rt = test_runtime();
        rt.state
            .write()
            .await
            .apply_auth(Some(user("uid-1")), FavoriteSet::default());

        assert_eq!(
            rt.toggle_favorite("tt1").await.unwrap(),
            FavoriteChange::Added
        );
        assert!(rt.db.load_favorites("uid-1").await.unwrap().contains("tt1"));

        assert_eq!(
            rt.toggle_favorite("tt1").await.unwrap(),
            FavoriteChange::Removed
        );
        assert!(rt.db.load_favorites("uid-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_validates_query_before_network() {
        let rt = test_runtime();
        let err = rt.search("   ").await.unwrap_err();
        assert!(matches!(err, RuntimeError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_requires_api_key() {
        // Default config ships without a key; the workflow refuses before
        // any network call.
        let rt = test_runtime();
        let err = rt.search("batman").await.unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
    }

    #[tokio::test]
    async fn test_confirm_password_reset_requires_oob_code() {
        let rt = test_runtime();

        let err = rt.confirm_password_reset(None, "secret").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid or expired link.");

        let err = rt
            .confirm_password_reset(Some("code"), "")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Please enter a new password.");
    }

    #[tokio::test]
    async fn test_restore_session() {
        let rt = test_runtime();
        assert!(rt.restore_session().await.unwrap().is_none());

        rt.db
            .save_session(AuthSession {
                user: user("uid-1"),
                id_token: "token".into(),
                refresh_token: None,
                expires_at: None,
            })
            .await
            .unwrap();
        let restored = rt.restore_session().await.unwrap().unwrap();
        assert_eq!(restored.uid, "uid-1");

        // An expired session is discarded.
        rt.db
            .save_session(AuthSession {
                user: user("uid-1"),
                id_token: "token".into(),
                refresh_token: None,
                expires_at: Some("2000-01-01T00:00:00Z".into()),
            })
            .await
            .unwrap();
        assert!(rt.restore_session().await.unwrap().is_none());
        assert!(rt.db.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_session_and_emits() {
        let rt = test_runtime();
        rt.spawn_auth_reactor();

        rt.db
            .save_favorites("uid-1", FavoriteSet::from_ids(vec!["tt1".into()]))
            .await
            .unwrap();
        rt.state
            .write()
            .await
            .apply_auth(Some(user("uid-1")), FavoriteSet::from_ids(vec!["tt1".into()]));

        let mut rx = rt.subscribe_auth();
        rt.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(rt.db.get_session().await.unwrap().is_none());
        // Durable favorites survive sign-out.
        assert!(rt.db.load_favorites("uid-1").await.unwrap().contains("tt1"));
    }

    #[tokio::test]
    async fn test_validation_messages() {
        let rt = test_runtime();

        let err = rt.sign_in("", "pw").await.unwrap_err();
        assert_eq!(err.user_message(), "Please fill out both fields.");

        let err = rt.sign_up("", "a@b.c", "pw").await.unwrap_err();
        assert_eq!(err.user_message(), "All fields are required.");

        let err = rt.send_password_reset(" ").await.unwrap_err();
        assert_eq!(err.user_message(), "Please enter an email address.");
    }
}
