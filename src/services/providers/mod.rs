use std::sync::Arc;

/// Movie metadata provider abstraction
///
/// The recommendation core only needs two lookups from a metadata source:
/// full details for the selected movie and a poster for each candidate.
/// Transport, timeouts and retries live entirely behind this trait.
use crate::{
    error::AppResult,
    models::{MovieDetails, MovieId, PosterAsset},
};

pub mod tmdb;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataGateway: Send + Sync {
    /// Fetch every display asset for a single movie
    async fn fetch_full(&self, id: &MovieId) -> AppResult<MovieDetails>;

    /// Fetch only the poster and homepage link
    ///
    /// Called once per recommendation candidate, so providers should keep it
    /// as cheap as their API allows.
    async fn fetch_poster(&self, id: &MovieId) -> AppResult<PosterAsset>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetch posters for several movies in parallel
///
/// Results come back in input order regardless of completion order. A failed
/// lookup yields `None` for that movie and is only logged.
pub async fn fetch_posters(
    gateway: Arc<dyn MetadataGateway>,
    ids: Vec<MovieId>,
) -> Vec<Option<PosterAsset>> {
    let mut tasks = Vec::with_capacity(ids.len());

    for id in ids {
        let gateway = Arc::clone(&gateway);
        let task = tokio::spawn(async move {
            let result = gateway.fetch_poster(&id).await;
            (id, result)
        });
        tasks.push(task);
    }

    let mut posters = Vec::with_capacity(tasks.len());
    let mut failures = 0;

    for task in tasks {
        match task.await {
            Ok((_, Ok(poster))) => posters.push(Some(poster)),
            Ok((id, Err(e))) => {
                tracing::warn!(movie_id = %id, error = %e, "Poster lookup failed");
                failures += 1;
                posters.push(None);
            }
            Err(e) => {
                tracing::error!(error = %e, "Poster lookup task failed");
                failures += 1;
                posters.push(None);
            }
        }
    }

    if failures > 0 {
        tracing::warn!(
            provider = gateway.name(),
            success_count = posters.len() - failures,
            error_count = failures,
            "Partial poster fetch failure"
        );
    }

    posters
}
