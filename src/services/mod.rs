pub mod batcher;
pub mod providers;
pub mod recommendations;
pub mod recommender;

pub use batcher::{Batches, PresentationBatcher};
pub use providers::{tmdb::TmdbGateway, MetadataGateway};
pub use recommendations::{RecommendationService, RecommendationSettings};
pub use recommender::{Candidate, Recommender};
