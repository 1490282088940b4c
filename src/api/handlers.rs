use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Axis, AxisRecommendations, RecommendationPage, SelectedMovie},
};

use super::AppState;

// Request/Response types

/// `?title=` is optional at the extractor level so a missing value reaches
/// the handler and is reported with the usual JSON error body
#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub title: Option<String>,
}

impl TitleQuery {
    fn title(&self) -> AppResult<&str> {
        match self.title.as_deref() {
            None => Err(AppError::InvalidInput("title is required".to_string())),
            Some(title) if title.trim().is_empty() => {
                Err(AppError::InvalidInput("title cannot be empty".to_string()))
            }
            Some(title) => Ok(title),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TitlesResponse {
    pub count: usize,
    pub titles: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Every catalog title, in catalog order, for the movie selector
pub async fn list_titles(State(state): State<AppState>) -> Json<TitlesResponse> {
    let titles: Vec<String> = state
        .recommendations
        .index()
        .catalog()
        .all_titles()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(TitlesResponse {
        count: titles.len(),
        titles,
    })
}

/// Details for the selected movie
pub async fn get_movie(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<SelectedMovie>> {
    let movie = state.recommendations.selected_movie(query.title()?).await?;
    Ok(Json(movie))
}

/// Selected movie plus recommendations along all three axes
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<RecommendationPage>> {
    let title = query.title()?;
    tracing::info!(request_id = %request_id, title = %title, "Recommendation page requested");

    let page = state.recommendations.recommendation_page(title).await?;
    Ok(Json(page))
}

/// Recommendations along a single axis
pub async fn get_axis_recommendations(
    State(state): State<AppState>,
    Path(axis): Path<String>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<AxisRecommendations>> {
    let axis: Axis = axis.parse().map_err(AppError::InvalidInput)?;
    let section = state
        .recommendations
        .recommend_axis(query.title()?, axis)
        .await?;
    Ok(Json(section))
}
