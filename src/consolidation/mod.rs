// * Semantic consolidation
// * Collapses near-duplicate deals by clustering on three signatures in
// * turn: time window, day set, and description content. Each cluster
// * keeps its single best representative.

use std::collections::BTreeMap;

use tracing::{debug, info};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::constants::{
    RICHNESS_NORM_CHARS, WEIGHT_COMPLETENESS, WEIGHT_CONFIDENCE, WEIGHT_METHOD, WEIGHT_RICHNESS,
};
use crate::extraction::ExtractedDeal;
use crate::model::{DayOfWeek, Deal};

// * Words that say nothing about what is actually on offer
const FILLER_WORDS: &[&str] = &[
    "happy", "hour", "hours", "deal", "deals", "special", "specials", "daily", "every", "day",
    "days", "all", "and", "the", "with", "our", "for", "from", "available", "join", "come",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "mon", "tue",
    "tues", "wed", "weds", "thu", "thur", "thurs", "fri", "sat", "sun", "weekday", "weekdays",
    "weekend", "weekends",
];

/// One planned merge: every member except the representative is
/// discarded when the plan is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub cluster_key: String,
    pub members: Vec<usize>,
    pub representative: usize,
}

// * "3:00 PM" -> "3:00pm"
fn compact(display: &str) -> String {
    display
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Canonical string describing a deal's time window.
pub fn time_signature(deal: &Deal) -> String {
    if deal.is_all_day {
        return "all_day".to_string();
    }
    match (&deal.start_time, &deal.end_time) {
        (Some(start), Some(end)) => format!("{}_{}", compact(start), compact(end)),
        _ => "no_time".to_string(),
    }
}

/// Canonical string describing a deal's day set.
pub fn day_signature(deal: &Deal) -> String {
    if deal.days_of_week.is_empty() {
        return "no_days".to_string();
    }
    if deal.days_of_week.len() == 7 {
        return "daily".to_string();
    }
    if deal.days_of_week.as_slice() == DayOfWeek::WEEKDAYS {
        return "weekdays".to_string();
    }
    if deal.days_of_week.as_slice() == DayOfWeek::WEEKEND {
        return "weekend".to_string();
    }
    if deal.days_of_week.len() == 1 {
        return format!("single_{}", deal.days_of_week[0].as_str());
    }
    deal.days_of_week
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join("_")
}

/// Up to three meaningful words from a description, sorted and joined.
/// Schedule vocabulary and filler are excluded so the key captures what
/// the offer is about, not when it runs.
pub fn content_key(description: &str) -> String {
    let lower = description.to_lowercase();
    let mut words: Vec<&str> = lower
        .unicode_words()
        .filter(|w| w.len() >= 3)
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .filter(|w| !FILLER_WORDS.contains(w))
        .collect();
    words.sort_unstable();
    words.dedup();
    words.truncate(3);
    if words.is_empty() {
        "empty".to_string()
    } else {
        words.join("_")
    }
}

/// Score a deal's fitness to represent its cluster. Confidence weighs
/// most, then schedule completeness, source-text richness, and how
/// precise the producing pattern was.
pub fn representative_score(record: &ExtractedDeal) -> f64 {
    let deal = &record.deal;
    let has_time = deal.is_all_day || (deal.start_time.is_some() && deal.end_time.is_some());
    let has_days = !deal.days_of_week.is_empty();
    let completeness =
        0.5 * f64::from(u8::from(has_time)) + 0.5 * f64::from(u8::from(has_days));
    let richness =
        (record.source_text.chars().count() as f64 / RICHNESS_NORM_CHARS as f64).min(1.0);
    let method = method_preference(&record.extraction_method);

    deal.confidence_score * WEIGHT_CONFIDENCE
        + completeness * WEIGHT_COMPLETENESS
        + richness * WEIGHT_RICHNESS
        + method * WEIGHT_METHOD
}

fn method_preference(tag: &str) -> f64 {
    match tag {
        "keyword_only" => 0.5,
        "keyword_near_time" => 0.6,
        "price_ladder" => 0.8,
        _ => 1.0,
    }
}

/// Build the full consolidation plan without applying it. Passes run in
/// a fixed order and clusters within a pass are visited in sorted key
/// order, so the plan is deterministic for a given input.
pub fn build_plan(records: &[ExtractedDeal]) -> Vec<PlanEntry> {
    let mut plan = Vec::new();
    let passes: [(&str, fn(&ExtractedDeal) -> String); 3] = [
        ("time", |r| time_signature(&r.deal)),
        ("days", |r| day_signature(&r.deal)),
        ("content", |r| {
            content_key(r.deal.description.as_deref().unwrap_or(""))
        }),
    ];

    for (pass, signature) in passes {
        let mut clusters: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            let key = signature(record);
            // * Degenerate keys mean "nothing known", not "identical"
            if matches!(key.as_str(), "no_time" | "no_days" | "empty") {
                continue;
            }
            clusters.entry(key).or_default().push(idx);
        }
        for (key, members) in clusters {
            if members.len() < 2 {
                continue;
            }
            let representative = members
                .iter()
                .copied()
                .max_by(|&a, &b| {
                    representative_score(&records[a])
                        .partial_cmp(&representative_score(&records[b]))
                        .unwrap_or(std::cmp::Ordering::Equal)
                        // * Ties go to the earlier deal
                        .then(b.cmp(&a))
                })
                .unwrap_or(members[0]);
            debug!(
                pass = pass,
                key = key.as_str(),
                members = members.len(),
                representative,
                "cluster planned"
            );
            plan.push(PlanEntry {
                cluster_key: format!("{}:{}", pass, key),
                members,
                representative,
            });
        }
    }
    plan
}

/// Apply consolidation: plan, then discard every non-representative
/// cluster member. A deal discarded by one entry stays discarded even
/// if a later entry would have kept it.
pub fn consolidate(records: Vec<ExtractedDeal>) -> Vec<ExtractedDeal> {
    let plan = build_plan(&records);
    let mut discarded = vec![false; records.len()];
    for entry in &plan {
        for &member in &entry.members {
            if member != entry.representative {
                discarded[member] = true;
            }
        }
    }
    let kept = discarded.iter().filter(|d| !**d).count();
    if records.len() != kept {
        info!(
            before = records.len(),
            after = kept,
            clusters = plan.len(),
            "consolidated duplicate deals"
        );
    }
    records
        .into_iter()
        .zip(discarded)
        .filter_map(|(record, dropped)| (!dropped).then_some(record))
        .collect()
}
