// * Candidate-to-deal assembly
// * Interprets a raw pattern hit into a structured Deal: day resolution,
// * time normalization, price attachment, description cleaning, title
// * generation, and tiered confidence scoring.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::constants::{
    CONFIDENCE_KEYWORD_ONLY, CONFIDENCE_PRICE_ONLY, CONFIDENCE_STRUCTURED, MIN_DESCRIPTION_LEN,
};
use crate::extraction::patterns::{kind_for_tag, PatternKind};
use crate::model::{DayOfWeek, Deal, DealBuilder, DealType, RawExtractionCandidate};
use crate::patterns::{day, time};

// * Scrub regexes for description cleaning
static RE_SCRUB_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)?\s*(?:-|–|to|until)\s*(?:\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)?|close)\b|\b\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)",
    )
    .expect("time scrub regex")
});

static RE_SCRUB_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:mondays?|tuesdays?|wednesdays?|thursdays?|fridays?|saturdays?|sundays?|mon|tues?|weds?|thurs?|thu|fri|sat|sun)\b\s*(?:-|–|through|to)?\s*",
    )
    .expect("day scrub regex")
});

static RE_SCRUB_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:happy\s+hours?|every\s*day|everyday|every|daily|all\s*day|weekdays?|weekends?)\b",
    )
    .expect("phrase scrub regex")
});

static RE_SCRUB_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\d+(?:\.\d{2})?(?:\s*-\s*\$?\d+(?:\.\d{2})?)?").expect("price scrub regex")
});

/// A built deal together with the provenance the consolidation engine
/// scores representatives by.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDeal {
    pub deal: Deal,
    pub source_text: String,
    pub extraction_method: String,
    pub from_fallback: bool,
}

/// Turns raw extraction candidates into deals.
#[derive(Debug, Default)]
pub struct DealAssembler {
    rules: time::TimeRules,
}

impl DealAssembler {
    pub fn new() -> DealAssembler {
        DealAssembler::default()
    }

    pub fn with_rules(rules: time::TimeRules) -> DealAssembler {
        DealAssembler { rules }
    }

    /// Interpret one candidate. Returns `None` when the hit cannot be
    /// anchored to a schedule at all, which keeps unanchored noise out
    /// of the deal set.
    pub fn assemble(&self, candidate: &RawExtractionCandidate) -> Option<ExtractedDeal> {
        let kind = kind_for_tag(&candidate.extraction_method)?;
        let span = candidate.source_text.as_str();

        let days = self.resolve_days(kind, span, &candidate.raw_day_matches);
        let (start, end, extra_window) = self.resolve_times(kind, &candidate.raw_time_matches);

        let all_day = match kind {
            PatternKind::FullWeekAllDay
            | PatternKind::DiscountDayAllDay
            | PatternKind::SingleDayAllDay => true,
            // * Price and keyword hits carry no schedule; presume
            // * always-available rather than inventing one
            PatternKind::PriceLadder
            | PatternKind::KeywordNearTime
            | PatternKind::KeywordOnly => true,
            _ => false,
        };

        if days.is_empty() && !all_day {
            debug!(
                slug = candidate.restaurant_slug,
                tag = candidate.extraction_method,
                "candidate has no schedule anchor, dropping"
            );
            return None;
        }

        let confidence = match kind {
            PatternKind::PriceLadder => CONFIDENCE_PRICE_ONLY,
            PatternKind::KeywordNearTime | PatternKind::KeywordOnly => CONFIDENCE_KEYWORD_ONLY,
            _ => CONFIDENCE_STRUCTURED,
        };

        let title = generate_title(kind, &days, all_day);
        let description = clean_description(span, &title);

        let mut builder = DealBuilder::new()
            .title(title.clone())
            .description(description)
            .days(days)
            .all_day(all_day)
            .prices(candidate.raw_price_matches.iter().cloned())
            .confidence(confidence);

        if kind == PatternKind::LateNightClose {
            builder = builder.deal_type(DealType::LateNight);
        } else {
            builder = builder.deal_type(DealType::classify(&format!("{} {}", title, span)));
        }

        if let Some(s) = start {
            builder = builder.start_time(s);
        }
        if let Some(e) = end {
            builder = builder.end_time(e);
        }
        if let Some((s, e)) = extra_window {
            builder = builder.note(format!("Also {} - {}", s, e));
        }
        if let Some(url) = &candidate.source_url {
            builder = builder.source_url(url.clone());
        }

        Some(ExtractedDeal {
            deal: builder.build(),
            source_text: span.to_string(),
            extraction_method: candidate.extraction_method.clone(),
            from_fallback: matches!(
                kind,
                PatternKind::KeywordNearTime | PatternKind::KeywordOnly
            ),
        })
    }

    fn resolve_days(
        &self,
        kind: PatternKind,
        span: &str,
        raw_days: &[String],
    ) -> Vec<DayOfWeek> {
        match kind {
            PatternKind::DoubleTimeRangeDaily
            | PatternKind::TimeRangeDaily
            | PatternKind::FullWeekAllDay => DayOfWeek::ALL.to_vec(),
            PatternKind::PriceLadder | PatternKind::KeywordNearTime | PatternKind::KeywordOnly => {
                Vec::new()
            }
            PatternKind::WeekpartTimeRange => {
                let lower = span.to_lowercase();
                if lower.contains("weekend") {
                    DayOfWeek::WEEKEND.to_vec()
                } else {
                    DayOfWeek::WEEKDAYS.to_vec()
                }
            }
            PatternKind::DiscountDayAllDay | PatternKind::SingleDayAllDay => raw_days
                .first()
                .and_then(|t| day::normalize_day(t))
                .map(|d| vec![d])
                .unwrap_or_default(),
            PatternKind::DayRangeSchedule
            | PatternKind::DayListSchedule
            | PatternKind::LateNightClose => {
                if let Some((range_start, range_end)) = day::find_day_range(span) {
                    let expanded = day::expand_day_range(range_start, range_end);
                    if !expanded.is_empty() {
                        // * A literal Saturday/Sunday endpoint pair is
                        // * venue shorthand for the whole week
                        return day::resolve_day_mentions(&expanded);
                    }
                    // * Backwards span: Sunday-to-Saturday still means
                    // * the whole week, anything else is ambiguous
                    // * wraparound and resolves to nothing
                    if matches!(
                        (range_start, range_end),
                        (DayOfWeek::Sunday, DayOfWeek::Saturday)
                    ) {
                        return DayOfWeek::ALL.to_vec();
                    }
                    return Vec::new();
                }
                if let Some(phrase) = day::find_day_phrase(span) {
                    if let Some(days) = day::parse_day_phrase(&phrase) {
                        return days;
                    }
                }
                let named: Vec<DayOfWeek> = raw_days
                    .iter()
                    .filter_map(|t| day::normalize_day(t))
                    .collect();
                day::resolve_day_mentions(&named)
            }
        }
    }

    // * First recognized window becomes the deal's times; a second
    // * window is reported back so the caller can keep it as a note
    #[allow(clippy::type_complexity)]
    fn resolve_times(
        &self,
        kind: PatternKind,
        raw_times: &[String],
    ) -> (Option<String>, Option<String>, Option<(String, String)>) {
        if matches!(kind, PatternKind::FullWeekAllDay | PatternKind::KeywordOnly) {
            return (None, None, None);
        }
        let normalize = |t: &String| time::normalize_display_with(t, &self.rules);
        let start = raw_times.first().and_then(normalize);
        let end = raw_times.get(1).and_then(normalize);
        let extra = match (raw_times.get(2), raw_times.get(3)) {
            (Some(s), Some(e)) => match (normalize(s), normalize(e)) {
                (Some(s), Some(e)) => Some((s, e)),
                _ => None,
            },
            _ => None,
        };
        (start, end, extra)
    }
}

// * Title generation mirrors how venues name their own specials
fn generate_title(kind: PatternKind, days: &[DayOfWeek], all_day: bool) -> String {
    if kind == PatternKind::LateNightClose {
        return "Late Night Happy Hour".to_string();
    }
    let mut sorted: Vec<DayOfWeek> = days.to_vec();
    sorted.sort_by_key(|d| d.index());
    sorted.dedup();
    if sorted.len() == 7 {
        return if all_day {
            "All Day Happy Hour".to_string()
        } else {
            "Daily Happy Hour".to_string()
        };
    }
    if sorted.as_slice() == DayOfWeek::WEEKDAYS {
        return "Weekday Happy Hour".to_string();
    }
    if sorted.as_slice() == DayOfWeek::WEEKEND {
        return "Weekend Happy Hour".to_string();
    }
    if sorted.len() == 1 {
        return format!("{} Happy Hour", sorted[0].display_name());
    }
    "Happy Hour".to_string()
}

/// Strip schedule and price tokens out of promotional copy. When
/// nothing readable survives, substitute a summary inferred from the
/// menu keywords in the original span.
fn clean_description(span: &str, title: &str) -> String {
    let mut text = RE_SCRUB_TIME.replace_all(span, " ").into_owned();
    text = RE_SCRUB_DAY.replace_all(&text, " ").into_owned();
    text = RE_SCRUB_PHRASE.replace_all(&text, " ").into_owned();
    text = RE_SCRUB_PRICE.replace_all(&text, " ").into_owned();

    let cleaned: String = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string();

    if cleaned.len() >= MIN_DESCRIPTION_LEN {
        return cleaned;
    }
    infer_description(span, title)
}

fn infer_description(span: &str, title: &str) -> String {
    let lower = span.to_lowercase();
    if lower.contains("vegan") && lower.contains("maki") {
        return "Discounted vegan maki rolls and plant-based options".to_string();
    }
    if lower.contains("sake") {
        return "Discounted sake and Japanese beverages".to_string();
    }
    if lower.contains("sushi") || lower.contains("maki") || lower.contains("roll") {
        return "Happy hour sushi and specialty rolls".to_string();
    }
    if lower.contains("appetizer") || lower.contains("food") || lower.contains("bites") {
        return "Discounted appetizers and food specials".to_string();
    }
    if lower.contains("drink")
        || lower.contains("cocktail")
        || lower.contains("beer")
        || lower.contains("wine")
    {
        return "Discounted drinks and beverage specials".to_string();
    }

    let title_lower = title.to_lowercase();
    if title_lower.contains("late night") {
        "Late night food and drink specials".to_string()
    } else if title_lower.contains("all day") {
        "All-day happy hour specials and discounts".to_string()
    } else if title_lower.contains("daily") {
        "Daily happy hour with discounted food and drinks".to_string()
    } else {
        "Happy hour food and drink specials".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::CandidateExtractor;

    fn assemble_all(text: &str) -> Vec<ExtractedDeal> {
        let extractor = CandidateExtractor::new();
        let assembler = DealAssembler::new();
        extractor
            .extract("test-venue", text, None)
            .iter()
            .filter_map(|c| assembler.assemble(c))
            .collect()
    }

    #[test]
    fn structured_weekday_deal() {
        let deals = assemble_all("Happy Hour Monday-Friday 3:00 PM - 6:00 PM $5 beers");
        let deal = &deals[0].deal;
        assert_eq!(deal.title, "Weekday Happy Hour");
        assert_eq!(deal.days_of_week, DayOfWeek::WEEKDAYS.to_vec());
        assert_eq!(deal.start_time.as_deref(), Some("3:00 PM"));
        assert_eq!(deal.end_time.as_deref(), Some("6:00 PM"));
        assert_eq!(deal.start_time_24h.as_deref(), Some("15:00"));
        assert!(deal.prices.contains(&"$5 beers".to_string()));
        assert_eq!(deal.confidence_score, CONFIDENCE_STRUCTURED);
        assert!(!deals[0].from_fallback);
    }

    #[test]
    fn full_week_all_day_deal() {
        let deals = assemble_all("Happy Hour! SUN - SAT - All Day");
        let deal = &deals[0].deal;
        assert_eq!(deal.days_of_week.len(), 7);
        assert!(deal.is_all_day);
        assert_eq!(deal.title, "All Day Happy Hour");
        assert_eq!(deal.start_time, None);
        assert_eq!(deal.confidence_score, CONFIDENCE_STRUCTURED);
    }

    #[test]
    fn double_window_keeps_second_as_note() {
        let deals = assemble_all("EVERY DAY 3-6PM & 9-10PM happy hour specials");
        let deal = deals
            .iter()
            .find(|d| d.extraction_method == "double_time_range_daily")
            .map(|d| &d.deal)
            .unwrap();
        assert_eq!(deal.start_time.as_deref(), Some("3:00 PM"));
        assert_eq!(deal.end_time.as_deref(), Some("6:00 PM"));
        assert_eq!(deal.special_notes, vec!["Also 9:00 PM - 10:00 PM"]);
        assert_eq!(deal.days_of_week.len(), 7);
    }

    #[test]
    fn price_ladder_scores_price_only_tier() {
        let deals = assemble_all("$3 $6 $9 HAPPY HOUR");
        let deal = &deals[0].deal;
        assert_eq!(deal.confidence_score, CONFIDENCE_PRICE_ONLY);
        assert!(deal.is_all_day);
        assert!(!deal.prices.is_empty());
    }

    #[test]
    fn late_night_close_deal() {
        let deals = assemble_all("Happy hour 10pm-close Thu - Sat in the bar");
        let deal = deals
            .iter()
            .find(|d| d.extraction_method == "late_night_close")
            .map(|d| &d.deal)
            .unwrap();
        assert_eq!(deal.title, "Late Night Happy Hour");
        assert_eq!(deal.deal_type, DealType::LateNight);
        assert_eq!(deal.start_time.as_deref(), Some("10:00 PM"));
        assert_eq!(deal.end_time.as_deref(), Some("Close"));
        assert_eq!(deal.end_time_24h, None);
        assert_eq!(
            deal.days_of_week,
            vec![DayOfWeek::Thursday, DayOfWeek::Friday, DayOfWeek::Saturday]
        );
    }

    #[test]
    fn discount_day_keeps_offer_description() {
        let deals = assemble_all("50% off sake every Monday, all day");
        let deal = &deals[0].deal;
        assert_eq!(deal.days_of_week, vec![DayOfWeek::Monday]);
        assert!(deal.is_all_day);
        assert_eq!(deal.description.as_deref(), Some("50% off sake"));
        assert_eq!(deal.title, "Monday Happy Hour");
    }

    #[test]
    fn bare_schedule_with_sake_keyword_infers_summary() {
        let desc = clean_description("sake happy hour 3-6pm", "Happy Hour");
        assert_eq!(desc, "Discounted sake and Japanese beverages");
    }

    #[test]
    fn keyword_fallback_is_low_confidence_all_day() {
        let deals = assemble_all("Come join us for happy hour specials!");
        assert_eq!(deals.len(), 1);
        let deal = &deals[0].deal;
        assert_eq!(deal.confidence_score, CONFIDENCE_KEYWORD_ONLY);
        assert!(deal.is_all_day);
        assert!(deals[0].from_fallback);
    }

    #[test]
    fn weekend_time_range_deal() {
        let deals = assemble_all("half-price wine 2-5pm weekends");
        let deal = &deals[0].deal;
        assert_eq!(deal.days_of_week, DayOfWeek::WEEKEND.to_vec());
        assert_eq!(deal.title, "Weekend Happy Hour");
        assert_eq!(deal.start_time.as_deref(), Some("2:00 PM"));
    }

    #[test]
    fn strict_rules_drop_bare_clock_times() {
        let extractor = CandidateExtractor::new();
        let candidates =
            extractor.extract("test-venue", "happy hour drinks 3:30-6:30 weekdays", None);
        let candidate = candidates
            .iter()
            .find(|c| c.extraction_method == "weekpart_time_range")
            .unwrap();

        let relaxed = DealAssembler::new().assemble(candidate).unwrap();
        assert_eq!(relaxed.deal.start_time.as_deref(), Some("3:30 PM"));
        assert_eq!(relaxed.deal.end_time.as_deref(), Some("6:30 PM"));

        // * Without the afternoon heuristic the bare clocks are
        // * ambiguous; the schedule's days survive on their own
        let strict = DealAssembler::with_rules(time::TimeRules {
            assume_pm_for_bare_digit: false,
        });
        let deal = strict.assemble(candidate).unwrap().deal;
        assert_eq!(deal.start_time, None);
        assert_eq!(deal.end_time, None);
        assert_eq!(deal.days_of_week, DayOfWeek::WEEKDAYS.to_vec());
    }

    #[test]
    fn cleaned_description_keeps_menu_words() {
        let desc = clean_description(
            "Happy Hour Monday-Friday 3:00 PM - 6:00 PM half-price appetizers and draft pours",
            "Weekday Happy Hour",
        );
        assert_eq!(desc, "half-price appetizers and draft pours");
    }

    #[test]
    fn empty_description_falls_back_to_inferred_summary() {
        let desc = clean_description("Happy Hour Monday-Friday 3:00 PM - 6:00 PM", "Weekday Happy Hour");
        assert_eq!(desc, "Happy hour food and drink specials");
    }
}
