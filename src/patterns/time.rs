// * Time token normalization
// * Canonical display form is "H:MM AM/PM" plus the literals "Close",
// * "Open", and "All Day". The 24-hour companion form is "HH:MM".

use std::sync::LazyLock;

use regex::Regex;

// * One clock token: "3", "3pm", "3:30 pm", "15:00", "9:30"
static RE_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?\s*(a\.?m\.?|p\.?m\.?)?$").expect("clock regex")
});

// * Clock tokens inside free text, meridiem-bearing or H:MM
static RE_TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)|\b\d{1,2}:\d{2}\b")
        .expect("time token regex")
});

// * Time ranges like "3-6pm", "3:00 PM - 6:00 PM", "10pm - close"
static RE_TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)?)\s*(?:-|–|to|until)\s*(\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)?|close)\b",
    )
    .expect("time range regex")
});

/// Tunable heuristics for ambiguous time tokens.
#[derive(Debug, Clone, Copy)]
pub struct TimeRules {
    /// Happy-hour text like "3-6" almost always means afternoon. When
    /// set, a bare hour from 2 through 11 with no meridiem is read as PM
    /// and other bare hours as AM. When unset, bare 12-hour tokens are
    /// rejected as ambiguous.
    pub assume_pm_for_bare_digit: bool,
}

impl Default for TimeRules {
    fn default() -> Self {
        TimeRules {
            assume_pm_for_bare_digit: true,
        }
    }
}

/// Normalize a raw time token to its canonical display form.
///
/// `"3pm"` becomes `"3:00 PM"`, `"15:00"` becomes `"3:00 PM"`, the
/// literals `"close"`, `"open"`, and `"all day"` canonicalize their
/// capitalization. Returns `None` for anything unparseable.
pub fn normalize_display(raw: &str) -> Option<String> {
    normalize_display_with(raw, &TimeRules::default())
}

pub fn normalize_display_with(raw: &str, rules: &TimeRules) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "close" | "closing" => return Some("Close".to_string()),
        "open" | "opening" => return Some("Open".to_string()),
        "all day" | "all-day" | "allday" => return Some("All Day".to_string()),
        _ => {}
    }

    let caps = RE_CLOCK.captures(trimmed)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if minute > 59 {
        return None;
    }

    if let Some(meridiem) = caps.get(3) {
        // * Explicit 12-hour token
        if hour == 0 || hour > 12 {
            return None;
        }
        let suffix = if meridiem.as_str().to_lowercase().starts_with('a') {
            "AM"
        } else {
            "PM"
        };
        return Some(format!("{}:{:02} {}", hour, minute, suffix));
    }

    if hour > 23 {
        return None;
    }
    if hour >= 13 {
        // * Unambiguous 24-hour token
        return Some(format!("{}:{:02} PM", hour - 12, minute));
    }
    if hour == 0 {
        return Some(format!("12:{:02} AM", minute));
    }

    // * Bare 12-hour token, meridiem inferred
    if !rules.assume_pm_for_bare_digit {
        return None;
    }
    let suffix = if (2..=11).contains(&hour) { "PM" } else { "AM" };
    Some(format!("{}:{:02} {}", hour, minute, suffix))
}

/// Convert a canonical display time to its 24-hour `"HH:MM"` companion.
/// The literals (`"Close"`, `"Open"`, `"All Day"`) have no clock value
/// and map to `None`. Idempotent: a 24-hour input passes through.
pub fn to_24h(display: &str) -> Option<String> {
    let caps = RE_CLOCK.captures(display.trim())?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if minute > 59 {
        return None;
    }
    match caps.get(3) {
        Some(meridiem) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            let is_am = meridiem.as_str().to_lowercase().starts_with('a');
            let hour24 = match (hour, is_am) {
                (12, true) => 0,
                (12, false) => 12,
                (h, true) => h,
                (h, false) => h + 12,
            };
            Some(format!("{:02}:{:02}", hour24, minute))
        }
        None => {
            if hour > 23 {
                return None;
            }
            Some(format!("{:02}:{:02}", hour, minute))
        }
    }
}

/// Minutes after midnight for any recognized clock token, display or
/// 24-hour form. Literals return `None`.
pub fn to_minutes(token: &str) -> Option<i64> {
    let hhmm = to_24h(token)?;
    let (h, m) = hhmm.split_once(':')?;
    let h: i64 = h.parse().ok()?;
    let m: i64 = m.parse().ok()?;
    Some(h * 60 + m)
}

/// All clock tokens inside a block of free text, in document order.
pub fn find_time_tokens(text: &str) -> Vec<String> {
    RE_TIME_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Time ranges inside free text, as raw (start, end) token pairs.
///
/// Promotional copy writes the meridiem once for the whole range
/// ("3-6pm"), so an end-token meridiem is distributed onto a bare
/// start token. Ranges where neither side carries a recognizable clock
/// or meridiem are skipped.
pub fn find_time_ranges(text: &str) -> Vec<(String, String)> {
    let mut ranges = Vec::new();
    for caps in RE_TIME_RANGE.captures_iter(text) {
        let (Some(start), Some(end)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let start_raw = start.as_str().trim();
        let end_raw = end.as_str().trim();
        let end_lower = end_raw.to_lowercase();

        let has_meridiem = |t: &str| {
            let l = t.to_lowercase();
            l.contains("am") || l.contains("pm") || l.contains("a.m") || l.contains("p.m")
        };

        // * Skip bare numeric pairs like "2-4" in "2-4 people"
        if !has_meridiem(start_raw)
            && !has_meridiem(end_raw)
            && end_lower != "close"
            && !start_raw.contains(':')
            && !end_raw.contains(':')
        {
            continue;
        }

        let start_token = if !has_meridiem(start_raw) && has_meridiem(end_raw) {
            let suffix = if end_lower.contains('p') { "pm" } else { "am" };
            format!("{}{}", start_raw, suffix)
        } else {
            start_raw.to_string()
        };
        ranges.push((start_token, end_raw.to_string()));
    }
    ranges
}
