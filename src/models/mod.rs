use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt::Display, str::FromStr};

pub mod recommendation;

pub use recommendation::{AxisRecommendations, MovieCard, RecommendationPage, SelectedMovie};

/// Opaque catalog identifier, used to query the metadata gateway
///
/// TMDB ids arrive as JSON numbers in the catalog file; both numbers and
/// strings are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(MovieId::from(id)),
            RawId::Text(id) if id.trim().is_empty() => {
                Err(serde::de::Error::custom("movie id cannot be empty"))
            }
            RawId::Text(id) => Ok(MovieId(id)),
        }
    }
}

/// Similarity dimension a recommendation is computed along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Storyline,
    Director,
    Cast,
}

impl Axis {
    /// All axes, in the order sections are presented
    pub const ALL: [Axis; 3] = [Axis::Storyline, Axis::Director, Axis::Cast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Storyline => "storyline",
            Axis::Director => "director",
            Axis::Cast => "cast",
        }
    }

    /// Section heading shown above the recommendations
    pub fn heading(&self) -> &'static str {
        match self {
            Axis::Storyline => "Based on Storyline",
            Axis::Director => "Based on Director",
            Axis::Cast => "Based on Cast",
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "storyline" => Ok(Axis::Storyline),
            "director" => Ok(Axis::Director),
            "cast" => Ok(Axis::Cast),
            other => Err(format!("unknown axis '{}'", other)),
        }
    }
}

/// Full display assets for the selected movie
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub genres: Vec<String>,
    pub homepage_url: Option<String>,
}

/// Poster lookup result for a recommended movie
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosterAsset {
    pub poster_url: Option<String>,
    pub homepage_url: Option<String>,
}

impl PosterAsset {
    /// A movie can only be shown when a non-empty poster reference exists
    pub fn is_renderable(&self) -> bool {
        self.poster_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from TMDB GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    #[allow(dead_code)]
    pub id: u64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_from_number() {
        let id: MovieId = serde_json::from_str("19995").unwrap();
        assert_eq!(id, MovieId::new("19995"));
        assert_eq!(format!("{}", id), "19995");
    }

    #[test]
    fn test_movie_id_from_string() {
        let id: MovieId = serde_json::from_str(r#""tt0499549""#).unwrap();
        assert_eq!(id.as_str(), "tt0499549");
    }

    #[test]
    fn test_movie_id_rejects_empty() {
        assert!(serde_json::from_str::<MovieId>(r#""  ""#).is_err());
    }

    #[test]
    fn test_movie_id_serializes_as_string() {
        let json = serde_json::to_string(&MovieId::from(285)).unwrap();
        assert_eq!(json, r#""285""#);
    }

    #[test]
    fn test_axis_serialization() {
        assert_eq!(
            serde_json::to_string(&Axis::Storyline).unwrap(),
            "\"storyline\""
        );
        let axis: Axis = serde_json::from_str("\"cast\"").unwrap();
        assert_eq!(axis, Axis::Cast);
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("Director".parse::<Axis>(), Ok(Axis::Director));
        assert!("genre".parse::<Axis>().is_err());
    }

    #[test]
    fn test_axis_heading() {
        assert_eq!(Axis::Cast.heading(), "Based on Cast");
    }

    #[test]
    fn test_poster_asset_renderable() {
        let asset = PosterAsset {
            poster_url: Some("https://image.tmdb.org/t/p/w500/a.jpg".to_string()),
            homepage_url: None,
        };
        assert!(asset.is_renderable());
        assert!(!PosterAsset::default().is_renderable());
        assert!(!PosterAsset {
            poster_url: Some(String::new()),
            homepage_url: None,
        }
        .is_renderable());
    }

    #[test]
    fn test_tmdb_movie_deserialization() {
        let json = r#"{
            "id": 19995,
            "title": "Avatar",
            "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg",
            "overview": "In the 22nd century, a paraplegic Marine...",
            "popularity": 150.437577,
            "genres": [{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}],
            "homepage": "http://www.avatarmovie.com/"
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(
            movie.poster_path,
            Some("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg".to_string())
        );
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.genres[1].name, "Adventure");
        assert_eq!(movie.homepage, Some("http://www.avatarmovie.com/".to_string()));
    }

    #[test]
    fn test_tmdb_movie_null_fields() {
        let json = r#"{"poster_path": null, "homepage": null, "overview": null}"#;
        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_path, None);
        assert!(movie.genres.is_empty());
    }
}
