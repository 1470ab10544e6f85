use serde::{Deserialize, Deserializer, Serialize};

/// Core movie entity, held in memory for the lifetime of one catalog load
/// or search result set. Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Larger artwork for the detail view; falls back to `image`.
    #[serde(default)]
    pub big_image: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub rating: Option<String>,
    #[serde(default, rename = "imdbid")]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub imdb_link: Option<String>,
}

impl Movie {
    /// Artwork for the detail view.
    pub fn detail_image(&self) -> Option<&str> {
        self.big_image.as_deref().or(self.image.as_deref())
    }

    /// IMDb page for this movie: the stored link, or one constructed from
    /// the IMDb id.
    pub fn imdb_url(&self) -> Option<String> {
        self.imdb_link.clone().or_else(|| {
            self.imdb_id
                .as_deref()
                .map(|id| format!("https://www.imdb.com/title/{id}"))
        })
    }
}

/// The catalog document stores `year`/`rating` as numbers while the search
/// API returns them as strings; accept either.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}
