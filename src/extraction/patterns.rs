// * Ordered deal pattern table
// * Structural patterns run first, most specific to most generic.
// * Fallback patterns run only when no structural pattern fires anywhere
// * in a text block, so a noisy page cannot drown a precise match.

use std::sync::LazyLock;

use regex::Regex;

// * Shared regex fragments
const DAY: &str = r"\b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tues?|weds?|thurs?|thu|fri|sat|sun)\b";
const T12: &str = r"\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)";
const T_LOOSE: &str = r"\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)?";

/// How the builder should interpret a pattern hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Keyword plus an explicit day range and time range.
    DayRangeSchedule,
    /// Two time windows on the same daily schedule.
    DoubleTimeRangeDaily,
    /// One time window, every day of the week.
    TimeRangeDaily,
    /// A run of bare dollar amounts next to the keyword, no schedule.
    PriceLadder,
    /// Evening window running until close on named days.
    LateNightClose,
    /// A percentage or half-off discount, all day on one named day.
    DiscountDayAllDay,
    /// "every <day>" single-day schedule.
    SingleDayAllDay,
    /// Time window scoped to weekdays or weekends.
    WeekpartTimeRange,
    /// Sunday-through-Saturday span marked all day.
    FullWeekAllDay,
    /// Keyword with day mentions and a time range in loose order.
    DayListSchedule,
    /// Keyword with a nearby time range but no recognizable days.
    KeywordNearTime,
    /// Bare keyword, nothing else recognized.
    KeywordOnly,
}

/// One entry in the pattern library.
#[derive(Debug)]
pub struct DealPattern {
    pub tag: &'static str,
    pub kind: PatternKind,
    pub regex: Regex,
}

impl DealPattern {
    fn new(tag: &'static str, kind: PatternKind, pattern: &str) -> DealPattern {
        DealPattern {
            tag,
            kind,
            regex: Regex::new(pattern).expect(tag),
        }
    }
}

static STRUCTURAL: LazyLock<Vec<DealPattern>> = LazyLock::new(|| {
    vec![
        DealPattern::new(
            "day_range_schedule",
            PatternKind::DayRangeSchedule,
            &format!(
                r"(?i)happy\s+hours?!?\s*:?\s*{DAY}\s*(?:-|–|through|to)\s*{DAY}\s*[:,]?\s*{T_LOOSE}\s*(?:-|–|to|until)\s*(?:{T_LOOSE}|close)"
            ),
        ),
        DealPattern::new(
            "double_time_range_daily",
            PatternKind::DoubleTimeRangeDaily,
            &format!(
                r"(?i)every\s*day\s+{T_LOOSE}\s*(?:-|–)\s*{T_LOOSE}\s*&\s*{T_LOOSE}\s*(?:-|–)\s*{T_LOOSE}"
            ),
        ),
        DealPattern::new(
            "time_range_daily",
            PatternKind::TimeRangeDaily,
            &format!(
                r"(?i)(?:every\s*day\s+{T_LOOSE}\s*(?:-|–)\s*{T_LOOSE}|{T_LOOSE}\s*(?:-|–)\s*{T_LOOSE}\s+every\s*day|happy\s+hours?!?\s*:?\s*daily\s*[:,]?\s*{T_LOOSE}\s*(?:-|–|to|until)\s*(?:{T_LOOSE}|close))"
            ),
        ),
        DealPattern::new(
            "price_ladder",
            PatternKind::PriceLadder,
            r"(?i)(?:\$\d+\s*){2,}happy\s+hour",
        ),
        DealPattern::new(
            "late_night_close",
            PatternKind::LateNightClose,
            &format!(
                r"(?i){T_LOOSE}\s*(?:-|–|to|until)\s*close[^.\n]*?{DAY}\s*(?:-|–|through|to)\s*{DAY}"
            ),
        ),
        DealPattern::new(
            "discount_day_all_day",
            PatternKind::DiscountDayAllDay,
            &format!(r"(?i)(?:\d+%\s*off|half[\s-]*off)[^.\n]*?every\s+{DAY}[^.\n]*?all\s*day"),
        ),
        DealPattern::new(
            "full_week_all_day",
            PatternKind::FullWeekAllDay,
            r"(?i)(?:sun(?:day)?\s*(?:-|–|through|to)\s*sat(?:urday)?|sat(?:urday)?\s*(?:-|–|through|to)\s*sun(?:day)?)[^.\n]*?all\s*day",
        ),
        DealPattern::new(
            "weekpart_time_range",
            PatternKind::WeekpartTimeRange,
            &format!(
                r"(?i)(?:{T_LOOSE}\s*(?:-|–|to)\s*(?:{T_LOOSE}|close)\s*(?:on\s+)?week(?:days?|ends?)|week(?:days?|ends?)\s*[:,]?\s*{T_LOOSE}\s*(?:-|–|to)\s*(?:{T_LOOSE}|close))"
            ),
        ),
        DealPattern::new(
            "single_day_all_day",
            PatternKind::SingleDayAllDay,
            &format!(r"(?i)every\s+{DAY}\b(?:\s*,?\s*all\s*day)?"),
        ),
        DealPattern::new(
            "day_list_schedule",
            PatternKind::DayListSchedule,
            &format!(
                r"(?i)happy\s+hours?!?[^.\n]*?{DAY}[^.\n]*?{T_LOOSE}\s*(?:-|–|to|until)\s*(?:{T_LOOSE}|close)|{DAY}[^.\n]*?{T12}\s*(?:-|–|to|until)\s*(?:{T12}|close)[^.\n]*?happy\s+hours?"
            ),
        ),
    ]
});

static FALLBACK: LazyLock<Vec<DealPattern>> = LazyLock::new(|| {
    vec![
        DealPattern::new(
            "keyword_near_time",
            PatternKind::KeywordNearTime,
            &format!(
                r"(?i)(?:happy\s+hours?|drink\s+specials?|bar\s+specials?).{{0,80}}?{T12}|{T12}.{{0,80}}?(?:happy\s+hours?|drink\s+specials?|bar\s+specials?)"
            ),
        ),
        DealPattern::new(
            "keyword_only",
            PatternKind::KeywordOnly,
            r"(?i)\b(?:happy\s+hours?|drink\s+specials?|bar\s+specials?)\b",
        ),
    ]
});

/// Structural patterns in priority order.
pub fn structural_patterns() -> &'static [DealPattern] {
    &STRUCTURAL
}

/// Fallback patterns, consulted only when the structural pass is empty.
pub fn fallback_patterns() -> &'static [DealPattern] {
    &FALLBACK
}

/// Resolve a candidate's pattern tag back to its interpretation kind.
pub fn kind_for_tag(tag: &str) -> Option<PatternKind> {
    STRUCTURAL
        .iter()
        .chain(FALLBACK.iter())
        .find(|p| p.tag == tag)
        .map(|p| p.kind)
}
