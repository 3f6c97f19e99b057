// * Pipeline orchestration
// * Runs the full extract, assemble, consolidate, validate chain for one
// * venue, and fans out over many venues with bounded concurrency. One
// * venue blowing up must never take the batch down with it.

pub mod errors;

use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::constants::MAX_CONCURRENT_RESTAURANTS;
use crate::consolidation::consolidate;
use crate::extraction::{CandidateExtractor, DealAssembler};
use crate::model::Deal;
use crate::validation::validate_deal;

pub use errors::PipelineError;

/// One block of scraped text from a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub source_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Outcome class of a per-venue run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// At least one structurally extracted deal survived validation.
    Success,
    /// Only fallback-tier deals survived.
    Partial,
    /// Nothing extractable in the input.
    Failure,
    /// The run itself broke before producing a verdict.
    Error,
}

/// Result of processing one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRun {
    pub slug: String,
    pub status: RunStatus,
    pub deals: Vec<Deal>,
    /// Deals dropped by validation.
    pub rejected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RestaurantRun {
    fn errored(slug: &str, reason: String) -> RestaurantRun {
        RestaurantRun {
            slug: slug.to_string(),
            status: RunStatus::Error,
            deals: Vec::new(),
            rejected: 0,
            reason: Some(reason),
        }
    }
}

/// Process one venue's text blocks end to end.
pub fn run_restaurant(slug: &str, blocks: &[TextBlock]) -> RestaurantRun {
    let extractor = CandidateExtractor::new();
    let assembler = DealAssembler::new();

    let records: Vec<_> = blocks
        .iter()
        .flat_map(|block| {
            extractor.extract(slug, &block.source_text, block.source_url.as_deref())
        })
        .filter_map(|candidate| assembler.assemble(&candidate))
        .collect();

    let consolidated = consolidate(records);

    let mut rejected = 0usize;
    let mut survivors = Vec::new();
    for record in consolidated {
        let issues = validate_deal(&record.deal);
        if issues.is_empty() {
            survivors.push(record);
        } else {
            rejected += 1;
            let report: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
            warn!(
                slug = slug,
                title = record.deal.title.as_str(),
                issues = report.join("; "),
                "deal rejected by validation"
            );
        }
    }

    let any_structural = survivors.iter().any(|r| !r.from_fallback);
    let status = if survivors.is_empty() {
        RunStatus::Failure
    } else if any_structural {
        RunStatus::Success
    } else {
        RunStatus::Partial
    };

    let deals: Vec<Deal> = survivors.into_iter().map(|r| r.deal).collect();
    info!(
        slug = slug,
        status = ?status,
        deals = deals.len(),
        rejected,
        "restaurant run complete"
    );

    RestaurantRun {
        slug: slug.to_string(),
        status,
        deals,
        rejected,
        reason: None,
    }
}

/// Process a batch of venues with bounded concurrency. A panic inside
/// one venue's run is contained to that venue and reported as an
/// `ERROR` outcome.
pub async fn run_batch(
    input: BTreeMap<String, Vec<TextBlock>>,
) -> BTreeMap<String, RestaurantRun> {
    let results: Vec<(String, RestaurantRun)> = stream::iter(input)
        .map(|(slug, blocks)| async move {
            let name = slug.clone();
            let task = tokio::task::spawn_blocking(move || run_restaurant(&slug, &blocks));
            match task.await {
                Ok(run) => (name, run),
                Err(err) => {
                    error!(slug = name.as_str(), error = %err, "restaurant task failed");
                    let run = RestaurantRun::errored(&name, format!("task failed: {err}"));
                    (name, run)
                }
            }
        })
        .buffer_unordered(MAX_CONCURRENT_RESTAURANTS)
        .collect()
        .await;
    results.into_iter().collect()
}
