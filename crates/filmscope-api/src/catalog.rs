use reqwest::Client;
use thiserror::Error;
use url::Url;

use filmscope_core::models::Movie;

use crate::traits::CatalogSource;

/// Errors from the static catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Client for the static JSON movie catalog.
pub struct CatalogClient {
    url: Url,
    http: Client,
}

impl CatalogClient {
    pub fn new(url: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            url: Url::parse(url)?,
            http: Client::new(),
        })
    }
}

impl CatalogSource for CatalogClient {
    type Error = CatalogError;

    async fn fetch(&self) -> Result<Vec<Movie>, CatalogError> {
        let resp = self.http.get(self.url.clone()).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status,
                message: body,
            });
        }

        resp.json::<Vec<Movie>>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}
