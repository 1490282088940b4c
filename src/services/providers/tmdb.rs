/// TMDB metadata provider
///
/// Both lookups hit the same endpoint, GET /movie/{id}; the poster lookup
/// just keeps fewer fields. Every request is retried with exponential backoff
/// on timeouts, connection failures, 429 and 5xx responses.
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieId, PosterAsset, TmdbMovie},
    services::providers::MetadataGateway,
};

const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Connection and retry settings for [`TmdbGateway`]
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub api_key: String,
    pub api_url: String,
    pub image_url: String,
    pub max_attempts: u32,
    pub timeout: Duration,
    pub backoff: Duration,
}

/// Outcome of a single failed request
enum AttemptError {
    Retryable(AppError),
    Fatal(AppError),
}

#[derive(Clone)]
pub struct TmdbGateway {
    http_client: HttpClient,
    settings: GatewaySettings,
}

impl TmdbGateway {
    pub fn new(settings: GatewaySettings) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    fn movie_url(&self, id: &MovieId) -> String {
        format!("{}/movie/{}", self.settings.api_url, id)
    }

    /// Full image URL for a TMDB poster path
    fn poster_url(&self, poster_path: Option<&str>) -> Option<String> {
        poster_path
            .filter(|path| !path.trim().is_empty())
            .map(|path| format!("{}{}", self.settings.image_url, path))
    }

    /// Delay before retrying after the given failed attempt (1-based)
    fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.settings
            .backoff
            .checked_mul(factor)
            .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
    }

    fn to_details(&self, movie: TmdbMovie) -> MovieDetails {
        MovieDetails {
            poster_url: self.poster_url(movie.poster_path.as_deref()),
            overview: movie.overview.filter(|o| !o.trim().is_empty()),
            popularity: movie.popularity,
            genres: movie.genres.into_iter().map(|g| g.name).collect(),
            homepage_url: non_empty(movie.homepage),
        }
    }

    fn to_poster(&self, movie: TmdbMovie) -> PosterAsset {
        PosterAsset {
            poster_url: self.poster_url(movie.poster_path.as_deref()),
            homepage_url: non_empty(movie.homepage),
        }
    }

    async fn fetch_movie(&self, id: &MovieId) -> AppResult<TmdbMovie> {
        let url = self.movie_url(id);
        let max_attempts = self.settings.max_attempts;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.request_movie(&url).await {
                Ok(movie) => return Ok(movie),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Retryable(e)) => {
                    tracing::warn!(
                        movie_id = %id,
                        attempt,
                        max_attempts,
                        error = %e,
                        "TMDB request failed"
                    );
                    last_error = Some(e);
                    if attempt < max_attempts {
                        tokio::time::sleep(self.backoff_for(attempt)).await;
                    }
                }
            }
        }

        Err(AppError::Gateway(format!(
            "TMDB lookup for movie {} failed after {} attempts: {}",
            id,
            max_attempts,
            last_error.map_or_else(|| "no attempts made".to_string(), |e| e.to_string())
        )))
    }

    async fn request_movie(&self, url: &str) -> Result<TmdbMovie, AttemptError> {
        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.settings.api_key.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = AppError::Gateway(format!(
                "TMDB API returned status {}: {}",
                status, body
            ));
            return Err(
                if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                    AttemptError::Retryable(error)
                } else {
                    AttemptError::Fatal(error)
                },
            );
        }

        let response_text = response.text().await.map_err(transport_error)?;
        tracing::trace!(response = %response_text, "Raw TMDB response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize TMDB response");
            AttemptError::Fatal(AppError::Gateway(format!(
                "Failed to parse TMDB response: {}",
                e
            )))
        })
    }
}

/// Only transient transport failures are worth another attempt; builder,
/// redirect and decode errors fail the same way every time
fn transport_error(e: reqwest::Error) -> AttemptError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        AttemptError::Retryable(e.into())
    } else {
        AttemptError::Fatal(e.into())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait::async_trait]
impl MetadataGateway for TmdbGateway {
    async fn fetch_full(&self, id: &MovieId) -> AppResult<MovieDetails> {
        let movie = self.fetch_movie(id).await?;
        let details = self.to_details(movie);

        tracing::info!(
            movie_id = %id,
            has_poster = details.poster_url.is_some(),
            genres = details.genres.len(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(details)
    }

    async fn fetch_poster(&self, id: &MovieId) -> AppResult<PosterAsset> {
        let movie = self.fetch_movie(id).await?;
        let poster = self.to_poster(movie);

        tracing::debug!(
            movie_id = %id,
            has_poster = poster.poster_url.is_some(),
            provider = "tmdb",
            "Poster fetched"
        );

        Ok(poster)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
