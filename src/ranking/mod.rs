// * Relevance ranking
// * Scores deals against the current local wall-clock and surfaces the
// * top few. Scoring is additive and deliberately coarse: the goal is
// * "what should a reader see first", not a probability.

use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::debug;

use crate::config::constants::{
    LATER_TODAY_WINDOW_MIN, RANK_CONFIDENCE_FLOOR, RANK_TODAY_ONLY_CONFIDENCE,
    SCORE_ALL_DAY, SCORE_CONFIDENCE_SCALE, SCORE_HAPPENING_NOW, SCORE_LATER_TODAY,
    SCORE_OFFER_KEYWORDS, SCORE_STARTING_SOON, SCORE_TODAY, SCORE_UNPARSEABLE_TIME,
    STARTING_SOON_WINDOW_MIN, TOP_DEALS_LIMIT,
};
use crate::model::{DayOfWeek, Deal};
use crate::patterns::time;

// * Words that signal a concrete offer rather than boilerplate
const OFFER_KEYWORDS: &[&str] = &[
    "$", "%", "off", "free", "half", "maki", "sake", "sushi", "cocktail", "beer", "wine",
    "draft", "wings", "margarita", "taco",
];

/// A deal with its relevance score and the reasons it earned it.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDeal {
    pub deal: Deal,
    pub score: i64,
    pub reasons: Vec<&'static str>,
}

/// Rank deals for display at the given local time. Low-confidence deals
/// are filtered at the floor; confident deals not scheduled today are
/// held back entirely. Returns at most the top few, best first, with
/// input order breaking ties.
pub fn rank_deals(deals: &[Deal], now: NaiveDateTime) -> Vec<RankedDeal> {
    let today = DayOfWeek::from(now.date().weekday());
    let now_minutes = i64::from(now.hour()) * 60 + i64::from(now.minute());

    let mut ranked: Vec<RankedDeal> = deals
        .iter()
        .filter_map(|deal| score_deal(deal, today, now_minutes))
        .collect();

    // * Stable sort keeps input order for equal scores
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(TOP_DEALS_LIMIT);
    debug!(surfaced = ranked.len(), total = deals.len(), "ranking complete");
    ranked
}

fn score_deal(deal: &Deal, today: DayOfWeek, now_minutes: i64) -> Option<RankedDeal> {
    if deal.confidence_score < RANK_CONFIDENCE_FLOOR {
        return None;
    }

    // * Deals with no day set are treated as possibly-today; curated
    // * static deals survive this way
    let is_today = deal.days_of_week.is_empty() || deal.scheduled_on(today);
    if !is_today && deal.confidence_score >= RANK_TODAY_ONLY_CONFIDENCE {
        return None;
    }

    let mut score = SCORE_TODAY;
    let mut reasons = vec!["relevant today"];

    if deal.is_all_day {
        score += SCORE_ALL_DAY;
        reasons.push("all day");
    } else {
        let window = deal
            .start_time
            .as_deref()
            .and_then(time::to_minutes)
            .zip(deal.end_time.as_deref().and_then(time::to_minutes));
        match window {
            Some((start, mut end)) => {
                // * A window ending "before" it starts runs past midnight
                if end < start {
                    end += 24 * 60;
                }
                if (start..=end).contains(&now_minutes) {
                    score += SCORE_HAPPENING_NOW;
                    reasons.push("happening now");
                } else if now_minutes < start && start - now_minutes <= STARTING_SOON_WINDOW_MIN {
                    score += SCORE_STARTING_SOON;
                    reasons.push("starting soon");
                } else if now_minutes < start && start - now_minutes <= LATER_TODAY_WINDOW_MIN {
                    score += SCORE_LATER_TODAY;
                    reasons.push("later today");
                }
            }
            None if deal.start_time.is_some() || deal.end_time.is_some() => {
                // * "Close", "Open", or anything else without a clock value
                score += SCORE_UNPARSEABLE_TIME;
                reasons.push("unparsed time");
            }
            None => {}
        }
    }

    if has_offer_keywords(deal) {
        score += SCORE_OFFER_KEYWORDS;
        reasons.push("concrete offer");
    }

    score += (deal.confidence_score * SCORE_CONFIDENCE_SCALE) as i64;

    Some(RankedDeal {
        deal: deal.clone(),
        score,
        reasons,
    })
}

fn has_offer_keywords(deal: &Deal) -> bool {
    let mut text = deal.title.to_lowercase();
    if let Some(desc) = &deal.description {
        text.push(' ');
        text.push_str(&desc.to_lowercase());
    }
    for price in &deal.prices {
        text.push(' ');
        text.push_str(&price.to_lowercase());
    }
    OFFER_KEYWORDS.iter().any(|kw| text.contains(kw))
}
