use filmscope_core::models::{AuthUser, FavoriteChange, FavoriteSet, Movie};

use crate::RuntimeError;

/// Movies shown per "load more" step.
pub const PAGE_SIZE: usize = 10;

/// One pagination step over the catalog cache.
#[derive(Debug, Clone)]
pub struct Page {
    pub movies: Vec<Movie>,
    /// Whether another non-empty page remains; drives the load-more control.
    pub has_more: bool,
}

/// Result of applying a search response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Catalog replaced with this many results, cursor reset.
    Loaded(usize),
    /// The provider reported no matches; catalog is now empty.
    NoResults,
}

/// The application session state: catalog cache, pagination cursor,
/// in-memory favorite set, and the current authenticated user.
///
/// All methods are synchronous state transitions; network and storage
/// live in the [`Runtime`](crate::Runtime) workflows wrapping this.
#[derive(Debug, Default)]
pub struct SessionState {
    catalog: Vec<Movie>,
    cursor: usize,
    favorites: FavoriteSet,
    user: Option<AuthUser>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Catalog & pagination ────────────────────────────────────

    /// Replace the catalog wholesale and reset the pagination cursor.
    pub fn replace_catalog(&mut self, movies: Vec<Movie>) {
        self.catalog = movies;
        self.cursor = 0;
    }

    /// Apply a search response: success replaces the catalog, an empty
    /// result set leaves it empty. Either way the cursor resets.
    pub fn apply_search_results(&mut self, movies: Vec<Movie>) -> SearchOutcome {
        let outcome = if movies.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Loaded(movies.len())
        };
        self.replace_catalog(movies);
        outcome
    }

    /// Return the next page slice and advance the cursor (capped at the
    /// catalog length). Calling past the end yields an empty page and
    /// `has_more == false`, not an error.
    pub fn next_page(&mut self) -> Page {
        let end = (self.cursor + PAGE_SIZE).min(self.catalog.len());
        let movies = self.catalog[self.cursor..end].to_vec();
        self.cursor = end;
        Page {
            movies,
            has_more: self.has_more(),
        }
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.catalog.len()
    }

    pub fn catalog(&self) -> &[Movie] {
        &self.catalog
    }

    /// The movies paged into view so far.
    pub fn displayed(&self) -> &[Movie] {
        &self.catalog[..self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    // ── Favorites ───────────────────────────────────────────────

    /// Flip a movie's membership in the favorite set.
    ///
    /// Requires a signed-in user; otherwise no state changes and the
    /// unauthenticated condition is reported to the caller.
    pub fn toggle_favorite(&mut self, movie_id: &str) -> Result<FavoriteChange, RuntimeError> {
        if self.user.is_none() {
            return Err(RuntimeError::NotSignedIn);
        }
        Ok(self.favorites.toggle(movie_id))
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Catalog movies in the favorite set, in favorites order.
    pub fn favorite_movies(&self) -> Vec<Movie> {
        self.favorites
            .ids()
            .iter()
            .filter_map(|id| self.catalog.iter().find(|m| &m.id == id))
            .cloned()
            .collect()
    }

    // ── Auth ────────────────────────────────────────────────────

    /// Apply an auth-state transition: signing in installs that user's
    /// loaded favorites; signing out clears the in-memory set (durable
    /// storage is untouched). The catalog is never re-fetched here.
    pub fn apply_auth(&mut self, user: Option<AuthUser>, favorites: FavoriteSet) {
        match user {
            Some(user) => {
                self.user = Some(user);
                self.favorites = favorites;
            }
            None => {
                self.user = None;
                self.favorites.clear();
            }
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str) -> Movie {
        serde_json::from_str(&format!(r#"{{"id": "{id}", "title": "Movie {id}"}}"#)).unwrap()
    }

    fn catalog(n: usize) -> Vec<Movie> {
        (0..n).map(|i| movie(&format!("tt{i}"))).collect()
    }

    fn user() -> AuthUser {
        AuthUser {
            uid: "uid-1".into(),
            email: None,
        }
    }

    #[test]
    fn test_pagination_covers_catalog_exactly() {
        let mut state = SessionState::new();
        state.replace_catalog(catalog(25));

        let page = state.next_page();
        assert_eq!(page.movies.len(), 10);
        assert!(page.has_more);

        let page = state.next_page();
        assert_eq!(page.movies.len(), 10);
        assert!(page.has_more);

        let page = state.next_page();
        assert_eq!(page.movies.len(), 5);
        assert!(!page.has_more);

        // Past the end: empty, no more, no error.
        let page = state.next_page();
        assert!(page.movies.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_pagination_totals() {
        let n = 37;
        let mut state = SessionState::new();
        state.replace_catalog(catalog(n));

        let mut total = 0;
        let mut non_empty_pages = 0;
        loop {
            let page = state.next_page();
            if page.movies.is_empty() {
                break;
            }
            non_empty_pages += 1;
            total += page.movies.len();
        }
        assert_eq!(total, n);
        assert_eq!(non_empty_pages, n.div_ceil(PAGE_SIZE));
    }

    #[test]
    fn test_catalog_replacement_resets_cursor() {
        let mut state = SessionState::new();
        state.replace_catalog(catalog(25));
        state.next_page();
        state.next_page();
        assert_eq!(state.cursor(), 20);

        state.replace_catalog(catalog(5));
        assert_eq!(state.cursor(), 0);
        assert!(state.has_more());
    }

    #[test]
    fn test_search_outcomes() {
        let mut state = SessionState::new();
        state.replace_catalog(catalog(25));
        state.next_page();

        assert_eq!(
            state.apply_search_results(catalog(3)),
            SearchOutcome::Loaded(3)
        );
        assert_eq!(state.cursor(), 0);

        assert_eq!(
            state.apply_search_results(Vec::new()),
            SearchOutcome::NoResults
        );
        assert!(state.catalog().is_empty());
        assert!(!state.has_more());
    }

    #[test]
    fn test_toggle_requires_sign_in() {
        let mut state = SessionState::new();
        state.replace_catalog(catalog(3));

        let err = state.toggle_favorite("tt0").unwrap_err();
        assert!(matches!(err, RuntimeError::NotSignedIn));
        assert!(state.favorites().is_empty());
    }

    #[test]
    fn test_toggle_involution() {
        let mut state = SessionState::new();
        state.apply_auth(Some(user()), FavoriteSet::default());

        assert_eq!(state.toggle_favorite("tt1").unwrap(), FavoriteChange::Added);
        assert!(state.favorites().contains("tt1"));
        assert_eq!(
            state.toggle_favorite("tt1").unwrap(),
            FavoriteChange::Removed
        );
        assert!(state.favorites().is_empty());
    }

    #[test]
    fn test_sign_out_clears_favorites_but_not_catalog() {
        let mut state = SessionState::new();
        state.replace_catalog(catalog(5));
        state.apply_auth(
            Some(user()),
            FavoriteSet::from_ids(vec!["tt1".into(), "tt2".into()]),
        );
        state.next_page();

        state.apply_auth(None, FavoriteSet::default());
        assert!(state.user().is_none());
        assert!(state.favorites().is_empty());
        // Catalog and cursor survive the transition.
        assert_eq!(state.catalog().len(), 5);
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn test_favorite_movies_in_favorites_order() {
        let mut state = SessionState::new();
        state.replace_catalog(catalog(5));
        state.apply_auth(
            Some(user()),
            FavoriteSet::from_ids(vec!["tt3".into(), "tt0".into(), "gone".into()]),
        );

        let favorites = state.favorite_movies();
        let ids: Vec<&str> = favorites.iter().map(|m| m.id.as_str()).collect();
        // Ids not in the catalog are skipped.
        assert_eq!(ids, vec!["tt3", "tt0"]);
    }
}
