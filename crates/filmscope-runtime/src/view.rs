use serde::Serialize;

use crate::session::SessionState;

/// Which navigation layout the shell should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavLayout {
    SignedIn,
    SignedOut,
}

impl NavLayout {
    /// Login and sign-up links are only offered while signed out.
    pub fn shows_auth_links(&self) -> bool {
        matches!(self, Self::SignedOut)
    }

    /// Favorites link and logout control are only offered while signed in.
    pub fn shows_account_links(&self) -> bool {
        matches!(self, Self::SignedIn)
    }
}

/// A description of the UI updates the current state requires.
///
/// Derived as a pure function of [`SessionState`]; the rendering shell
/// applies it however it likes.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub nav: NavLayout,
    /// Ids among the currently displayed movies that carry a filled
    /// bookmark indicator.
    pub bookmarked: Vec<String>,
    pub load_more_visible: bool,
}

impl ViewState {
    pub fn derive(state: &SessionState) -> Self {
        let nav = if state.user().is_some() {
            NavLayout::SignedIn
        } else {
            NavLayout::SignedOut
        };

        let bookmarked = state
            .displayed()
            .iter()
            .filter(|m| state.favorites().contains(&m.id))
            .map(|m| m.id.clone())
            .collect();

        Self {
            nav,
            bookmarked,
            load_more_visible: state.has_more(),
        }
    }
}
