// * Core data model: deals, extraction candidates, and venue records

mod candidate;
mod deal;
mod restaurant;

pub use candidate::RawExtractionCandidate;
pub use deal::{DayOfWeek, Deal, DealBuilder, DealType};
pub use restaurant::{Restaurant, ScrapingConfig};
