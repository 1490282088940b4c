use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use crate::{
    data::MovieIndex,
    error::AppResult,
    models::{
        Axis, AxisRecommendations, MovieCard, MovieDetails, PosterAsset, RecommendationPage,
        SelectedMovie,
    },
    services::{
        batcher::{PresentationBatcher, DEFAULT_OVERFLOW_CAP, DEFAULT_PRIMARY_SIZE},
        providers::{fetch_posters, MetadataGateway},
        recommender::{Candidate, Recommender, DEFAULT_LIMIT},
    },
};

const MISSING_OVERVIEW: &str = "There is no description available";
const UNKNOWN_GENRE: &str = "Unknown";

/// Tunables for building recommendation sections
#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    pub limit: usize,
    pub primary_size: usize,
    pub overflow_cap: usize,
    pub placeholder_poster_url: String,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            primary_size: DEFAULT_PRIMARY_SIZE,
            overflow_cap: DEFAULT_OVERFLOW_CAP,
            placeholder_poster_url:
                "https://via.placeholder.com/500x750?text=No+Poster+Available".to_string(),
        }
    }
}

/// Generates similar-movie recommendations for a selected title
///
/// Candidates come from the precomputed similarity indexes; every candidate's
/// poster is looked up through the metadata gateway and movies without one
/// are left out of the rendered sections.
pub struct RecommendationService {
    index: Arc<MovieIndex>,
    recommender: Recommender,
    batcher: PresentationBatcher,
    gateway: Arc<dyn MetadataGateway>,
    settings: RecommendationSettings,
}

impl RecommendationService {
    pub fn new(
        index: Arc<MovieIndex>,
        gateway: Arc<dyn MetadataGateway>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            recommender: Recommender::new(Arc::clone(&index)),
            batcher: PresentationBatcher::new(settings.primary_size, settings.overflow_cap),
            index,
            gateway,
            settings,
        }
    }

    pub fn index(&self) -> &MovieIndex {
        &self.index
    }

    /// Resolves the selected title and fetches its full details
    ///
    /// A failed lookup does not fail the request: the movie is shown with a
    /// placeholder poster and default text instead.
    #[instrument(skip(self))]
    pub async fn selected_movie(&self, title: &str) -> AppResult<SelectedMovie> {
        let catalog = self.index.catalog();
        let entry = catalog.record_at(catalog.position_of_title(title)?)?;

        let mut details = match self.gateway.fetch_full(&entry.id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(
                    movie_id = %entry.id,
                    provider = self.gateway.name(),
                    error = %e,
                    "Falling back to default movie details"
                );
                MovieDetails {
                    overview: Some(MISSING_OVERVIEW.to_string()),
                    genres: vec![UNKNOWN_GENRE.to_string()],
                    ..MovieDetails::default()
                }
            }
        };

        if details.poster_url.is_none() {
            details.poster_url = Some(self.settings.placeholder_poster_url.clone());
        }

        Ok(SelectedMovie {
            position: entry.position,
            id: entry.id.clone(),
            title: entry.title.clone(),
            details,
        })
    }

    /// Builds the primary row and overflow groups for one axis
    #[instrument(skip(self))]
    pub async fn recommend_axis(&self, title: &str, axis: Axis) -> AppResult<AxisRecommendations> {
        let candidates = self.recommender.recommend(title, axis, self.settings.limit)?;

        let ids = candidates.iter().map(|c| c.id.clone()).collect();
        let posters = fetch_posters(Arc::clone(&self.gateway), ids).await;

        let batches = self
            .batcher
            .batch(candidates.into_iter().zip(posters), |(_, poster)| {
                poster.as_ref().is_some_and(|p| p.is_renderable())
            })
            .map(|(candidate, poster)| to_card(candidate, poster.unwrap_or_default()));

        let section = AxisRecommendations {
            axis,
            heading: axis.heading().to_string(),
            primary: batches.primary,
            overflow: batches.overflow,
        };

        tracing::info!(
            title = %title,
            axis = %axis,
            primary = section.primary.len(),
            overflow = section.displayed_count() - section.primary.len(),
            "Recommendations generated"
        );

        Ok(section)
    }

    /// The selected movie plus recommendations along every axis
    pub async fn recommendation_page(&self, title: &str) -> AppResult<RecommendationPage> {
        let (selected, storyline, director, cast) = tokio::try_join!(
            self.selected_movie(title),
            self.recommend_axis(title, Axis::Storyline),
            self.recommend_axis(title, Axis::Director),
            self.recommend_axis(title, Axis::Cast),
        )?;

        Ok(RecommendationPage {
            selected,
            sections: vec![storyline, director, cast],
            generated_at: Utc::now(),
        })
    }
}

fn to_card(candidate: Candidate, poster: PosterAsset) -> MovieCard {
    MovieCard {
        position: candidate.position,
        id: candidate.id,
        title: candidate.title,
        poster_url: poster.poster_url.unwrap_or_default(),
        homepage_url: poster.homepage_url,
    }
}
