// * Extraction: ordered pattern matching over scraped text, then
// * interpretation of each hit into a structured deal.

mod builder;
mod extractor;
pub mod patterns;

pub use builder::{DealAssembler, ExtractedDeal};
pub use extractor::CandidateExtractor;
