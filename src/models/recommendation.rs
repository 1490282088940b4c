use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Axis, MovieDetails, MovieId};

/// A recommended movie ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub position: usize,
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    /// Link target for the poster, when TMDB knows the movie's homepage
    pub homepage_url: Option<String>,
}

/// Recommendations for one axis, split into the always-visible row and
/// the groups revealed on demand
#[derive(Debug, Clone, Serialize)]
pub struct AxisRecommendations {
    pub axis: Axis,
    pub heading: String,
    pub primary: Vec<MovieCard>,
    pub overflow: Vec<Vec<MovieCard>>,
}

impl AxisRecommendations {
    /// Number of movies shown across the primary row and all overflow groups
    pub fn displayed_count(&self) -> usize {
        self.primary.len() + self.overflow.iter().map(Vec::len).sum::<usize>()
    }
}

/// The movie the user picked, with its full details
#[derive(Debug, Clone, Serialize)]
pub struct SelectedMovie {
    pub position: usize,
    pub id: MovieId,
    pub title: String,
    pub details: MovieDetails,
}

/// Everything rendered after the user asks for recommendations
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationPage {
    pub selected: SelectedMovie,
    pub sections: Vec<AxisRecommendations>,
    pub generated_at: DateTime<Utc>,
}
