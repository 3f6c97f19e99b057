// * Day token normalization and range expansion

use std::sync::LazyLock;

use regex::Regex;

use crate::model::DayOfWeek;

// * Day names and common abbreviations inside free text
static RE_DAY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(mondays?|tuesdays?|wednesdays?|thursdays?|fridays?|saturdays?|sundays?|mon|tues?|weds?|thurs?|thu|fri|sat|sun)\b",
    )
    .expect("day token regex")
});

// * Two day tokens joined by a range separator
static RE_DAY_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(mondays?|tuesdays?|wednesdays?|thursdays?|fridays?|saturdays?|sundays?|mon|tues?|weds?|thurs?|thu|fri|sat|sun)\b\s*(?:-|–|through|to)\s*\b(mondays?|tuesdays?|wednesdays?|thursdays?|fridays?|saturdays?|sundays?|mon|tues?|weds?|thurs?|thu|fri|sat|sun)\b",
    )
    .expect("day range regex")
});

// * Whole-week phrases: "weekdays", "weekends", "daily", "every day"
static RE_DAY_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(weekdays?|weekends?|daily|every\s*day|everyday|all\s+week|7\s+days)\b")
        .expect("day phrase regex")
});

/// Map one day token to its [`DayOfWeek`], accepting full names, plural
/// forms, and the usual abbreviations.
pub fn normalize_day(token: &str) -> Option<DayOfWeek> {
    let lower = token.trim().trim_end_matches('.').to_lowercase();
    let day = match lower.as_str() {
        "monday" | "mondays" | "mon" => DayOfWeek::Monday,
        "tuesday" | "tuesdays" | "tue" | "tues" => DayOfWeek::Tuesday,
        "wednesday" | "wednesdays" | "wed" | "weds" => DayOfWeek::Wednesday,
        "thursday" | "thursdays" | "thu" | "thur" | "thurs" => DayOfWeek::Thursday,
        "friday" | "fridays" | "fri" => DayOfWeek::Friday,
        "saturday" | "saturdays" | "sat" => DayOfWeek::Saturday,
        "sunday" | "sundays" | "sun" => DayOfWeek::Sunday,
        _ => return None,
    };
    Some(day)
}

/// Expand an inclusive forward range of days: Monday through Friday
/// yields all five weekdays. A backwards pair (Friday through Monday)
/// is ambiguous wraparound and yields the empty set; the caller decides
/// what to do with it.
pub fn expand_day_range(start: DayOfWeek, end: DayOfWeek) -> Vec<DayOfWeek> {
    if start.index() > end.index() {
        return Vec::new();
    }
    (start.index()..=end.index())
        .map(DayOfWeek::from_index)
        .collect()
}

/// Interpret a whole-week phrase like "weekdays" or "every day".
pub fn parse_day_phrase(phrase: &str) -> Option<Vec<DayOfWeek>> {
    let lower = phrase.trim().to_lowercase();
    if lower.starts_with("weekday") {
        return Some(DayOfWeek::WEEKDAYS.to_vec());
    }
    if lower.starts_with("weekend") {
        return Some(DayOfWeek::WEEKEND.to_vec());
    }
    let collapsed: String = lower.split_whitespace().collect::<Vec<_>>().join(" ");
    if matches!(
        collapsed.as_str(),
        "daily" | "everyday" | "every day" | "all week" | "7 days"
    ) {
        return Some(DayOfWeek::ALL.to_vec());
    }
    None
}

/// Resolve a bare list of day mentions into a schedule. Venue copy that
/// names exactly Monday and Friday nearly always means the whole
/// Monday-through-Friday span, and a Sunday/Saturday pair in either
/// order spans the whole week.
pub fn resolve_day_mentions(days: &[DayOfWeek]) -> Vec<DayOfWeek> {
    let mut sorted: Vec<DayOfWeek> = days.to_vec();
    sorted.sort_by_key(|d| d.index());
    sorted.dedup();
    if sorted == [DayOfWeek::Monday, DayOfWeek::Friday] {
        return DayOfWeek::WEEKDAYS.to_vec();
    }
    if sorted == [DayOfWeek::Saturday, DayOfWeek::Sunday] {
        return DayOfWeek::ALL.to_vec();
    }
    sorted
}

/// First explicit day range in a block of text, as normalized endpoints.
pub fn find_day_range(text: &str) -> Option<(DayOfWeek, DayOfWeek)> {
    let caps = RE_DAY_RANGE.captures(text)?;
    let start = normalize_day(caps.get(1)?.as_str())?;
    let end = normalize_day(caps.get(2)?.as_str())?;
    Some((start, end))
}

/// All individual day mentions inside a block of text, in document order.
pub fn find_day_tokens(text: &str) -> Vec<String> {
    RE_DAY_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First whole-week phrase inside a block of text, if any.
pub fn find_day_phrase(text: &str) -> Option<String> {
    RE_DAY_PHRASE.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations_normalize() {
        assert_eq!(normalize_day("Mon"), Some(DayOfWeek::Monday));
        assert_eq!(normalize_day("tues"), Some(DayOfWeek::Tuesday));
        assert_eq!(normalize_day("Thurs"), Some(DayOfWeek::Thursday));
        assert_eq!(normalize_day("SUNDAYS"), Some(DayOfWeek::Sunday));
        assert_eq!(normalize_day("noday"), None);
    }

    #[test]
    fn forward_ranges_expand_inclusively() {
        assert_eq!(
            expand_day_range(DayOfWeek::Monday, DayOfWeek::Friday),
            DayOfWeek::WEEKDAYS.to_vec()
        );
        assert_eq!(
            expand_day_range(DayOfWeek::Wednesday, DayOfWeek::Wednesday),
            vec![DayOfWeek::Wednesday]
        );
    }

    #[test]
    fn backwards_range_is_empty() {
        assert!(expand_day_range(DayOfWeek::Friday, DayOfWeek::Monday).is_empty());
    }

    #[test]
    fn whole_week_phrases() {
        assert_eq!(
            parse_day_phrase("Weekdays"),
            Some(DayOfWeek::WEEKDAYS.to_vec())
        );
        assert_eq!(
            parse_day_phrase("weekend"),
            Some(DayOfWeek::WEEKEND.to_vec())
        );
        assert_eq!(parse_day_phrase("every day"), Some(DayOfWeek::ALL.to_vec()));
        assert_eq!(parse_day_phrase("sometimes"), None);
    }

    #[test]
    fn monday_friday_pair_means_weekdays() {
        let resolved = resolve_day_mentions(&[DayOfWeek::Monday, DayOfWeek::Friday]);
        assert_eq!(resolved, DayOfWeek::WEEKDAYS.to_vec());
    }

    #[test]
    fn saturday_sunday_pair_means_whole_week() {
        let resolved = resolve_day_mentions(&[DayOfWeek::Sunday, DayOfWeek::Saturday]);
        assert_eq!(resolved, DayOfWeek::ALL.to_vec());
        let resolved = resolve_day_mentions(&[DayOfWeek::Saturday, DayOfWeek::Sunday]);
        assert_eq!(resolved, DayOfWeek::ALL.to_vec());
    }

    #[test]
    fn other_mentions_pass_through_sorted() {
        let resolved = resolve_day_mentions(&[DayOfWeek::Friday, DayOfWeek::Tuesday]);
        assert_eq!(resolved, vec![DayOfWeek::Tuesday, DayOfWeek::Friday]);
    }

    #[test]
    fn day_range_found_in_free_text() {
        assert_eq!(
            find_day_range("Happy Hour Monday-Friday 3:00 PM"),
            Some((DayOfWeek::Monday, DayOfWeek::Friday))
        );
        assert_eq!(
            find_day_range("open Thu through Sat"),
            Some((DayOfWeek::Thursday, DayOfWeek::Saturday))
        );
        assert_eq!(find_day_range("open every day"), None);
    }

    #[test]
    fn day_tokens_found_in_free_text() {
        let tokens = find_day_tokens("Happy Hour Mon - Fri and all day Sundays");
        assert_eq!(tokens, vec!["Mon", "Fri", "Sundays"]);
    }
}
