// * End-to-end scenarios through the full extract/consolidate/validate
// * chain, driven the same way the binary drives it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dealflow::pipeline::{run_batch, run_restaurant, RestaurantRun, RunStatus, TextBlock};
use dealflow::ranking::rank_deals;
use dealflow::{DayOfWeek, Deal};

fn block(text: &str) -> TextBlock {
    TextBlock {
        source_text: text.to_string(),
        source_url: Some("https://example.com/happy-hour".to_string()),
    }
}

fn run(text: &str) -> RestaurantRun {
    run_restaurant("test-venue", &[block(text)])
}

#[test]
fn weekday_schedule_with_prices() {
    let run = run("Happy Hour Monday-Friday 3:00 PM - 6:00 PM $5 beers");
    assert_eq!(run.status, RunStatus::Success);

    let deal = &run.deals[0];
    assert_eq!(deal.title, "Weekday Happy Hour");
    assert_eq!(deal.days_of_week, DayOfWeek::WEEKDAYS.to_vec());
    assert_eq!(deal.start_time.as_deref(), Some("3:00 PM"));
    assert_eq!(deal.end_time.as_deref(), Some("6:00 PM"));
    assert_eq!(deal.start_time_24h.as_deref(), Some("15:00"));
    assert_eq!(deal.end_time_24h.as_deref(), Some("18:00"));
    assert!(deal.prices.contains(&"$5 beers".to_string()));
    assert!(deal.confidence_score >= 0.7);
}

#[test]
fn shouted_full_week_all_day() {
    let run = run("Happy Hour! SUN - SAT - All Day");
    assert_eq!(run.status, RunStatus::Success);

    let deal = &run.deals[0];
    assert_eq!(deal.days_of_week.len(), 7);
    assert!(deal.is_all_day);
    assert_eq!(deal.start_time, None);
    assert_eq!(deal.title, "All Day Happy Hour");
}

#[test]
fn overlapping_mentions_consolidate_to_one() {
    // * The same 3-6 window described two ways on the same page
    let run = run_restaurant(
        "test-venue",
        &[
            block("Happy Hour Monday-Friday 3:00 PM - 6:00 PM half-price appetizers"),
            block("Join us 3-6pm every day for drink specials"),
        ],
    );
    assert_eq!(run.status, RunStatus::Success);
    let same_window: Vec<&Deal> = run
        .deals
        .iter()
        .filter(|d| d.start_time_24h.as_deref() == Some("15:00"))
        .collect();
    assert_eq!(same_window.len(), 1);
}

#[test]
fn tuesday_afternoon_ranking_prefers_the_active_deal() {
    let run = run_restaurant(
        "test-venue",
        &[
            block("Happy Hour Tuesday - Thursday 3:00 PM - 6:00 PM $6 sake"),
            block("50% off wine every Monday, all day"),
        ],
    );
    assert_eq!(run.status, RunStatus::Success);

    let tuesday_330 = NaiveDate::from_ymd_opt(2026, 3, 3)
        .unwrap()
        .and_hms_opt(15, 30, 0)
        .unwrap();
    let ranked = rank_deals(&run.deals, tuesday_330);
    assert!(!ranked.is_empty());
    assert!(ranked[0].deal.scheduled_on(DayOfWeek::Tuesday));
    assert!(ranked[0].reasons.contains(&"happening now"));
    // * The confident Monday-only deal is held back on a Tuesday
    assert!(ranked.iter().all(|r| !r.deal.scheduled_on(DayOfWeek::Monday)));
}

#[test]
fn fallback_blocks_do_not_downgrade_a_structured_run() {
    // * A bare keyword block next to a structured one: the structured
    // * deal carries the run to SUCCESS
    let run = run_restaurant(
        "test-venue",
        &[
            block("happy hour!"),
            block("Happy Hour Monday-Friday 3:00 PM - 6:00 PM"),
        ],
    );
    assert_eq!(run.status, RunStatus::Success);
}

#[tokio::test]
async fn batch_outcomes_are_per_venue() {
    let mut input = BTreeMap::new();
    input.insert(
        "structured".to_string(),
        vec![block("Happy Hour Monday-Friday 3:00 PM - 6:00 PM")],
    );
    input.insert(
        "keyword-only".to_string(),
        vec![block("Ask about our happy hour!")],
    );
    input.insert("nothing".to_string(), vec![block("Now hiring line cooks.")]);

    let runs = run_batch(input).await;
    assert_eq!(runs["structured"].status, RunStatus::Success);
    assert_eq!(runs["keyword-only"].status, RunStatus::Partial);
    assert_eq!(runs["nothing"].status, RunStatus::Failure);
}

#[test]
fn deal_json_shape_round_trips() {
    let run = run("Happy Hour Monday-Friday 3:00 PM - 6:00 PM $5 beers");
    let json = serde_json::to_string(&run).unwrap();
    let back: RestaurantRun = serde_json::from_str(&json).unwrap();
    assert_eq!(run, back);
    assert!(json.contains("\"SUCCESS\""));
    assert!(json.contains("\"days_of_week\""));
    assert!(json.contains("\"monday\""));
}
