use serde::{Deserialize, Serialize};

/// Outcome of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

/// The set of favorited movie ids for one user.
///
/// Stored and serialized as an ordered sequence; membership is what matters.
/// Invariant: no duplicate ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, movie_id: &str) -> bool {
        self.ids.iter().any(|id| id == movie_id)
    }

    /// Flip membership: remove if present, insert otherwise.
    pub fn toggle(&mut self, movie_id: &str) -> FavoriteChange {
        if let Some(pos) = self.ids.iter().position(|id| id == movie_id) {
            self.ids.remove(pos);
            FavoriteChange::Removed
        } else {
            self.ids.push(movie_id.to_string());
            FavoriteChange::Added
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
