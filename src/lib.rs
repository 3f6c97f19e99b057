// * Dealflow: deal extraction and semantic consolidation pipeline.
// * Turns noisy scraped restaurant text into clean, deduplicated,
// * schedule-accurate deal records with confidence scoring.

pub mod config;
pub mod consolidation;
pub mod extraction;
pub mod model;
pub mod patterns;
pub mod pipeline;
pub mod ranking;
pub mod validation;

// * Re-exports for convenient access
pub use extraction::{CandidateExtractor, DealAssembler, ExtractedDeal};
pub use model::{
    DayOfWeek, Deal, DealBuilder, DealType, RawExtractionCandidate, Restaurant, ScrapingConfig,
};
pub use pipeline::{run_batch, run_restaurant, RestaurantRun, RunStatus, TextBlock};
pub use ranking::{rank_deals, RankedDeal};
pub use validation::{validate_deal, Issue};
