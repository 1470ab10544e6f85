use serde::Deserialize;

use filmscope_core::models::Movie;

/// Sentinel genre list when the search result carries no genre data.
const GENRE_UNKNOWN: &str = "N/A";

/// Top-level search response. `response` is the string `"True"` or
/// `"False"`; on `"False"` the `error` field says why (usually
/// "Movie not found!").
#[derive(Debug, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search")]
    pub search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}

#[derive(Debug, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
}

impl OmdbSearchItem {
    pub fn into_movie(self) -> Movie {
        let genre = match self.genre.as_deref() {
            Some(g) if !g.is_empty() => g.split(", ").map(str::to_string).collect(),
            _ => vec![GENRE_UNKNOWN.to_string()],
        };

        let imdb_link = format!("https://www.imdb.com/title/{}", self.imdb_id);

        Movie {
            id: self.imdb_id.clone(),
            title: self.title,
            image: self.poster,
            big_image: None,
            year: self.year,
            genre,
            description: self.plot,
            rating: self.imdb_rating,
            imdb_id: Some(self.imdb_id),
            imdb_link: Some(imdb_link),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "Search": [
                {
                    "Title": "Batman Begins",
                    "Year": "2005",
                    "imdbID": "tt0372784",
                    "Type": "movie",
                    "Poster": "https://example.com/batman.jpg"
                }
            ],
            "totalResults": "1",
            "Response": "True"
        }"#;

        let resp: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_success());

        let items = resp.search.unwrap();
        let movie = items.into_iter().next().unwrap().into_movie();
        assert_eq!(movie.id, "tt0372784");
        assert_eq!(movie.title, "Batman Begins");
        assert_eq!(movie.year.as_deref(), Some("2005"));
        // Search results carry no genre data.
        assert_eq!(movie.genre, vec!["N/A"]);
        assert_eq!(
            movie.imdb_link.as_deref(),
            Some("https://www.imdb.com/title/tt0372784")
        );
    }

    #[test]
    fn test_genre_string_is_split() {
        let item = OmdbSearchItem {
            imdb_id: "tt1".into(),
            title: "X".into(),
            poster: None,
            year: None,
            genre: Some("Action, Crime, Drama".into()),
            plot: Some("A plot.".into()),
            imdb_rating: Some("8.1".into()),
        };
        let movie = item.into_movie();
        assert_eq!(movie.genre, vec!["Action", "Crime", "Drama"]);
        assert_eq!(movie.rating.as_deref(), Some("8.1"));
    }

    #[test]
    fn test_deserialize_no_results() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let resp: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.is_success());
        assert!(resp.search.is_none());
        assert_eq!(resp.error.as_deref(), Some("Movie not found!"));
    }
}
