use std::sync::Arc;

use crate::{
    data::MovieIndex,
    services::{MetadataGateway, RecommendationService, RecommendationSettings},
};

/// Shared application state
///
/// Everything behind it is read-only after startup, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
}

impl AppState {
    pub fn new(
        index: Arc<MovieIndex>,
        gateway: Arc<dyn MetadataGateway>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            recommendations: Arc::new(RecommendationService::new(index, gateway, settings)),
        }
    }
}
