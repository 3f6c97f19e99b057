// * Raw extraction candidate
// * The intermediate record between pattern matching and deal building.
// * Carries the matched span plus surrounding provenance so later stages
// * can re-parse, score, and deduplicate.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh64::xxh64;

/// One pattern hit inside a block of scraped text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExtractionCandidate {
    /// Venue identifier the source text belongs to.
    pub restaurant_slug: String,
    /// The matched span of text, plus a window of surrounding context.
    pub source_text: String,
    /// Tag of the pattern that produced this candidate.
    pub extraction_method: String,
    /// Time tokens found inside the span, in document order.
    pub raw_time_matches: Vec<String>,
    /// Day tokens found inside the span, in document order.
    pub raw_day_matches: Vec<String>,
    /// Price phrases found in the surrounding context window.
    pub raw_price_matches: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl RawExtractionCandidate {
    /// Stable fingerprint over the normalized span and its time tokens.
    /// Two candidates with the same fingerprint describe the same offer
    /// and only the first is kept.
    pub fn span_fingerprint(&self) -> u64 {
        let mut key = self.source_text.to_lowercase();
        key.retain(|c| !c.is_whitespace());
        for t in &self.raw_time_matches {
            key.push('|');
            key.push_str(&t.to_lowercase());
        }
        xxh64(key.as_bytes(), 0)
    }
}
