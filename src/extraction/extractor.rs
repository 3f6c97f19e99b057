// * Candidate extractor
// * Runs the pattern library over a block of scraped text and emits one
// * raw candidate per surviving match. Structural patterns always run;
// * fallback patterns run only when the structural pass found nothing.

use std::collections::HashSet;

use tracing::debug;

use crate::config::constants::MATCH_CONTEXT_CHARS;
use crate::extraction::patterns::{fallback_patterns, structural_patterns, DealPattern};
use crate::model::RawExtractionCandidate;
use crate::patterns::{day, price, time};

#[derive(Debug, Default)]
pub struct CandidateExtractor;

impl CandidateExtractor {
    pub fn new() -> CandidateExtractor {
        CandidateExtractor
    }

    /// Extract deal candidates from one block of text.
    ///
    /// Identical offers matched by more than one pattern collapse to a
    /// single candidate: the span fingerprint keeps the first hit, which
    /// by table order is the most specific pattern.
    pub fn extract(
        &self,
        restaurant_slug: &str,
        text: &str,
        source_url: Option<&str>,
    ) -> Vec<RawExtractionCandidate> {
        let mut seen: HashSet<u64> = HashSet::new();
        let mut candidates =
            self.run_patterns(structural_patterns(), restaurant_slug, text, source_url, &mut seen);

        if candidates.is_empty() {
            candidates =
                self.run_patterns(fallback_patterns(), restaurant_slug, text, source_url, &mut seen);
        }

        debug!(
            slug = restaurant_slug,
            count = candidates.len(),
            "candidate extraction complete"
        );
        candidates
    }

    fn run_patterns(
        &self,
        table: &[DealPattern],
        restaurant_slug: &str,
        text: &str,
        source_url: Option<&str>,
        seen: &mut HashSet<u64>,
    ) -> Vec<RawExtractionCandidate> {
        let mut out = Vec::new();
        for pattern in table {
            for m in pattern.regex.find_iter(text) {
                let span = m.as_str();
                let context = context_window(text, m.start(), m.end());

                // * Ranges first; fall back to loose tokens when the span
                // * carries times without a dash between them
                let ranges = time::find_time_ranges(span);
                let raw_time_matches: Vec<String> = if ranges.is_empty() {
                    time::find_time_tokens(span)
                } else {
                    ranges
                        .into_iter()
                        .flat_map(|(s, e)| [s, e])
                        .collect()
                };

                let candidate = RawExtractionCandidate {
                    restaurant_slug: restaurant_slug.to_string(),
                    source_text: span.to_string(),
                    extraction_method: pattern.tag.to_string(),
                    raw_time_matches,
                    raw_day_matches: day::find_day_tokens(span),
                    raw_price_matches: price::parse_price_list(context),
                    source_url: source_url.map(str::to_string),
                };

                if seen.insert(candidate.span_fingerprint()) {
                    debug!(
                        slug = restaurant_slug,
                        tag = pattern.tag,
                        span = span,
                        "pattern hit"
                    );
                    out.push(candidate);
                }
            }
        }
        out
    }
}

// * A window of text around a match, snapped to char boundaries so
// * multi-byte input cannot split a code point.
fn context_window(text: &str, start: usize, end: usize) -> &str {
    let mut lo = start.saturating_sub(MATCH_CONTEXT_CHARS);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + MATCH_CONTEXT_CHARS).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    &text[lo..hi]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<RawExtractionCandidate> {
        CandidateExtractor::new().extract("test-venue", text, None)
    }

    #[test]
    fn structured_text_yields_structural_candidate() {
        let candidates = extract("Happy Hour Monday-Friday 3:00 PM - 6:00 PM $5 beers");
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0].extraction_method, "day_range_schedule");
        assert_eq!(
            candidates[0].raw_time_matches,
            vec!["3:00 PM", "6:00 PM"]
        );
        assert!(candidates[0]
            .raw_price_matches
            .contains(&"$5 beers".to_string()));
    }

    #[test]
    fn fallback_only_runs_when_structural_pass_is_empty() {
        let candidates = extract("Join us for happy hour every day 3-6pm");
        assert!(candidates
            .iter()
            .all(|c| c.extraction_method != "keyword_only"));

        let candidates = extract("Come enjoy our happy hour specials!");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].extraction_method, "keyword_only");
    }

    #[test]
    fn duplicate_spans_collapse_to_first_pattern() {
        let text = "EVERY DAY 3-6PM & 9-10PM happy hour";
        let candidates = extract(text);
        let double: Vec<_> = candidates
            .iter()
            .filter(|c| c.extraction_method == "double_time_range_daily")
            .collect();
        assert_eq!(double.len(), 1);
        assert_eq!(
            double[0].raw_time_matches,
            vec!["3pm", "6PM", "9pm", "10PM"]
        );
    }

    #[test]
    fn no_keywords_no_candidates() {
        assert!(extract("We open at noon for lunch service.").is_empty());
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        let text = "café happy hour 3-6pm — cerveza y más 🍺";
        let candidates = extract(text);
        assert!(!candidates.is_empty());
    }
}
