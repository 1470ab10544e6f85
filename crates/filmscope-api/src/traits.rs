//! Trait definitions for movie data sources.
//!
//! The catalog document and the search API both produce `Movie` records;
//! these traits keep the session workflows source-agnostic.

use std::future::Future;

use filmscope_core::models::Movie;

/// A source for the full browsable catalog.
pub trait CatalogSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the complete catalog.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send;
}

/// A movie database that can be searched by title.
pub trait MovieSearch: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Search by title. An empty result means "no matches", not an error.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send;
}
