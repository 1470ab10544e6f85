use reqwest::Client;

use filmscope_core::models::Movie;

use super::error::OmdbError;
use super::types::OmdbSearchResponse;
use crate::traits::MovieSearch;

const BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb search client.
pub struct OmdbClient {
    api_key: String,
    http: Client,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }
}

impl MovieSearch for OmdbClient {
    type Error = OmdbError;

    async fn search(&self, query: &str) -> Result<Vec<Movie>, OmdbError> {
        let resp = self
            .http
            .get(BASE_URL)
            .query(&[("apikey", self.api_key.as_str()), ("s", query)])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(OmdbError::Api {
                status,
                message: body,
            });
        }

        let body: OmdbSearchResponse = resp
            .json()
            .await
            .map_err(|e| OmdbError::Parse(e.to_string()))?;

        if !body.is_success() {
            tracing::debug!(
                error = body.error.as_deref().unwrap_or("unknown"),
                "no search results for {query:?}"
            );
            return Ok(Vec::new());
        }

        Ok(body
            .search
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.into_movie())
            .collect())
    }
}
